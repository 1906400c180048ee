//! Floorplan CLI - Shopfloor layout conversion from the terminal
//!
//! File-based front end over the floorplan library: turn topology snapshots
//! into grids and back, check grids, and replay recorded edits.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Floorplan CLI - Shopfloor layout tools
#[derive(Parser)]
#[command(name = "floorplan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert, validate and edit shopfloor layouts")]
#[command(long_about = r#"
Floorplan converts between the graph form of a shopfloor (modules,
intersections and roads) and the grid used to edit it.

Examples:
  floorplan grid shopfloor.json --map        # Show the grid as a cell map
  floorplan grid shopfloor.json -o grid.json # Write the grid
  floorplan export grid.json                 # Grid back to a topology
  floorplan validate grid.json --strict      # Check layout rules
  floorplan replay shopfloor.json edits.json # Apply recorded edits and save
"#)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.floorplan/config.toml
    #[arg(long, global = true, env = "FLOORPLAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a topology snapshot into a grid
    Grid {
        /// Topology JSON file
        input: PathBuf,

        /// Write the grid here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a cell map instead of JSON
        #[arg(long)]
        map: bool,
    },

    /// Convert a grid back into a topology
    Export {
        /// Grid JSON file
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a grid against the layout rules
    Validate {
        /// Grid JSON file
        input: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Convert a topology to a grid and back, and compare
    Roundtrip {
        /// Topology JSON file
        input: PathBuf,
    },

    /// Apply recorded edit intents to a topology and save the result
    Replay {
        /// Topology JSON file
        topology: PathBuf,

        /// JSON array of edit intents
        intents: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the JSON schema of the topology format
    Schema,

    /// Configuration management
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set a configuration value (key=value)
        #[arg(long)]
        set: Option<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("floorplan={},warn", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(config::Config::config_path);
    let config = config::Config::load_from(&config_path)?;

    match cli.command {
        Commands::Grid { input, output, map } => {
            commands::convert_to_grid(&config, &input, output.as_deref(), map)?;
        }
        Commands::Export { input, output } => {
            commands::export_topology(&config, &input, output.as_deref())?;
        }
        Commands::Validate { input, strict } => {
            commands::validate_grid(&config, &input, strict)?;
        }
        Commands::Roundtrip { input } => {
            commands::roundtrip(&config, &input)?;
        }
        Commands::Replay {
            topology,
            intents,
            output,
        } => {
            commands::replay(&config, &topology, &intents, output.as_deref())?;
        }
        Commands::Schema => {
            commands::print_schema(&config)?;
        }
        Commands::Config { show, set } => {
            if show {
                commands::show_config(&config, &config_path)?;
            } else if let Some(kv) = set {
                commands::set_config(&kv, &config_path)?;
            } else {
                commands::show_config(&config, &config_path)?;
            }
        }
    }

    Ok(())
}
