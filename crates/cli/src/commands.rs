//! CLI subcommand handlers
//!
//! Every command reads JSON files, runs the library and prints either JSON
//! (when no output file is given) or a colored report.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use floorplan::{
    EditIntent, FloorplanError, GraphToGrid, GridLayout, GridToTopology, LayoutSession,
    LayoutSummary, LayoutValidator, Topology, TopologyChannel, TopologyMessage,
};
use serde::de::DeserializeOwned;

use crate::{config::Config, output::OutputHandler};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write JSON to `output`, or to stdout when no file is given
fn emit(output: &OutputHandler, json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output.print_success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn handler(config: &Config) -> OutputHandler {
    OutputHandler::new(config.output.pretty, config.output.color)
}

/// Convert a topology snapshot into a grid
pub fn convert_to_grid(
    config: &Config,
    input: &Path,
    output_path: Option<&Path>,
    map: bool,
) -> Result<()> {
    let output = handler(config);
    let topology: Topology = read_json(input)?;
    let grid = GraphToGrid::new(&config.layout).convert(&topology);

    if map {
        output.print_header(&format!("Grid for {}", input.display()));
        output.print_grid(&grid);
        println!();
        output.print_summary(&LayoutSummary::of(&grid));
        return Ok(());
    }

    emit(&output, &output.to_json(&grid)?, output_path)
}

/// Convert an edited grid back into a topology
pub fn export_topology(config: &Config, input: &Path, output_path: Option<&Path>) -> Result<()> {
    let output = handler(config);
    let grid: GridLayout = read_json(input)?;

    match GridToTopology::new(config.layout.road_lengths).convert(&grid) {
        Ok(topology) => emit(&output, &output.to_json(&topology)?, output_path),
        Err(e @ FloorplanError::InconsistentConnections(_)) => {
            output.print_error(&e.to_string());
            output.print_violations(e.violations());
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Check a grid against every layout rule
pub fn validate_grid(config: &Config, input: &Path, strict: bool) -> Result<()> {
    let output = handler(config);
    let grid: GridLayout = read_json(input)?;

    let validator =
        LayoutValidator::new().with_strict_mode(strict || config.layout.strict_validation);
    let violations = validator.check_all(&grid);
    let errors = validator.errors(&grid);

    output.print_header(&format!("Validating {}", input.display()));
    output.print_summary(&LayoutSummary::of(&grid));
    println!();

    if violations.is_empty() {
        output.print_success("No violations");
        return Ok(());
    }

    output.print_violations(&violations);
    println!();
    if errors.is_empty() {
        output.print_warning(&format!("{} warning(s), layout can be saved", violations.len()));
        Ok(())
    } else {
        anyhow::bail!("{} error(s), layout cannot be saved", errors.len())
    }
}

/// Convert a topology to a grid and back, and compare
pub fn roundtrip(config: &Config, input: &Path) -> Result<()> {
    let output = handler(config);
    let topology: Topology = read_json(input)?;

    let grid = GraphToGrid::new(&config.layout).convert(&topology);
    let exported = GridToTopology::new(config.layout.road_lengths).convert(&grid)?;

    output.print_header(&format!("Round trip of {}", input.display()));
    output.print_topology_counts(&topology);
    output.print_summary(&LayoutSummary::of(&grid));
    output.print_topology_counts(&exported);
    println!();

    if exported.same_network(&topology) {
        output.print_success("Network survives the round trip");
        Ok(())
    } else {
        output.print_warning(
            "Road lengths, dropped roads or unattached modules changed the network",
        );
        anyhow::bail!("Round trip changed the network")
    }
}

fn describe(intent: &EditIntent) -> String {
    match intent {
        EditIntent::AddIntersection => "add intersection".to_string(),
        EditIntent::AddModule { module } => {
            format!("add module {} ({})", module.id, module.module_type)
        }
        EditIntent::DeleteTile { tile_id } => format!("delete {}", tile_id),
        EditIntent::MoveTile { tile_id, x, y } => format!("move {} to ({}, {})", tile_id, x, y),
        EditIntent::RotateModule { tile_id } => format!("rotate {}", tile_id),
    }
}

/// Replay recorded edit intents against a topology and save the result
pub fn replay(
    config: &Config,
    topology_path: &Path,
    intents_path: &Path,
    output_path: Option<&Path>,
) -> Result<()> {
    let output = handler(config);
    let topology: Topology = read_json(topology_path)?;
    let intents: Vec<EditIntent> = read_json(intents_path)?;

    let channel = TopologyChannel::new(config.layout.channel_capacity);
    let mut saved_rx = channel.subscribe();
    let mut session = LayoutSession::new(config.layout.clone(), channel);
    session.apply_snapshot(&topology);

    output.print_header(&format!("Replaying {} edit(s)", intents.len()));
    for (step, intent) in intents.into_iter().enumerate() {
        let label = describe(&intent);
        match session.handle_intent(intent) {
            Ok(outcome) => output.print_outcome(step + 1, &label, &outcome),
            Err(e) => output.print_error(&format!("{:>3}. {}: {}", step + 1, label, e)),
        }
    }
    println!();
    output.print_grid(session.grid());
    println!();

    match session.save() {
        Ok(saved) => {
            if let Ok(TopologyMessage::LayoutSaved { session_id, .. }) = saved_rx.try_recv() {
                tracing::debug!("Session {} published its layout", session_id);
            }
            output.print_topology_counts(&saved);
            emit(&output, &output.to_json(&saved)?, output_path)
        }
        Err(e) => {
            output.print_error(&e.to_string());
            output.print_violations(e.violations());
            Err(e.into())
        }
    }
}

/// Print the JSON schema of the topology wire format
pub fn print_schema(config: &Config) -> Result<()> {
    let output = handler(config);
    let schema = schemars::schema_for!(Topology);
    println!("{}", output.to_json(&schema)?);
    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config, path: &Path) -> Result<()> {
    let output = handler(config);

    output.print_header("Configuration");

    println!();
    for key in Config::KEYS {
        if let Some(value) = config.get(key) {
            println!("  {} = {}", key.dimmed(), value);
        }
    }

    println!();
    println!("  {} {}", "Config file:".dimmed(), path.display());

    Ok(())
}

/// Set a configuration value
pub fn set_config(kv: &str, path: &Path) -> Result<()> {
    let output = OutputHandler::new(true, true);

    let Some((key, value)) = kv.split_once('=') else {
        output.print_error("Invalid format. Use: key=value");
        return Ok(());
    };
    let key = key.trim();
    let value = value.trim().trim_matches('"');

    let mut config = Config::load_from(path)?;
    match config.set(key, value) {
        Ok(()) => {
            config.save_to(path)?;
            output.print_success(&format!("Set {} = \"{}\"", key, value));
        }
        Err(e) => {
            output.print_error(&format!("Failed to set config: {}", e));
        }
    }

    Ok(())
}
