//! Output formatting and terminal rendering
//!
//! Colored status lines, violation reports and a cell map of the grid.

use colored::Colorize;
use floorplan::{
    EditOutcome, GridLayout, GridTile, LayoutSummary, LayoutViolation, Topology,
    ViolationSeverity,
};

/// Output handler for terminal display
pub struct OutputHandler {
    pub pretty_json: bool,
}

impl OutputHandler {
    pub fn new(pretty_json: bool, color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { pretty_json }
    }

    /// Print a section header
    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", format!("▶ {}", text).bright_yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    /// Print a success message
    pub fn print_success(&self, text: &str) {
        println!("{} {}", "✓".bright_green(), text.bright_white());
    }

    /// Print an error message
    pub fn print_error(&self, text: &str) {
        println!("{} {}", "✗".bright_red(), text.bright_red());
    }

    /// Print a warning message
    pub fn print_warning(&self, text: &str) {
        println!("{} {}", "⚠".bright_yellow(), text.yellow());
    }

    /// Print an info message
    pub fn print_info(&self, text: &str) {
        println!("{} {}", "ℹ".bright_blue(), text);
    }

    /// Serialize a value the way the config asks for
    pub fn to_json<T: serde::Serialize>(&self, value: &T) -> serde_json::Result<String> {
        if self.pretty_json {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }

    pub fn print_violations(&self, violations: &[LayoutViolation]) {
        for violation in violations {
            let label = match violation.severity {
                ViolationSeverity::Error => "error".bright_red().bold(),
                ViolationSeverity::Warning => "warning".bright_yellow().bold(),
            };
            println!("  {} {}", label, violation.to_string().bright_white());
            if let Some(fix) = &violation.suggested_fix {
                println!("      {} {}", "fix:".dimmed(), fix.dimmed());
            }
        }
    }

    pub fn print_summary(&self, summary: &LayoutSummary) {
        println!(
            "  {} {} intersections, {} modules",
            "Tiles:".dimmed(),
            summary.road_tiles,
            summary.module_tiles
        );
        println!(
            "  {} {} x {}",
            "Size:".dimmed(),
            summary.width,
            summary.height
        );
        if summary.unattached_modules > 0 {
            println!(
                "  {} {}",
                "Unattached:".dimmed(),
                summary.unattached_modules.to_string().yellow()
            );
        }
        let valid = if summary.valid {
            "yes".bright_green()
        } else {
            "no".bright_red()
        };
        println!("  {} {}", "Valid:".dimmed(), valid);
    }

    pub fn print_topology_counts(&self, topology: &Topology) {
        println!(
            "  {} {} modules, {} intersections, {} roads",
            "Topology:".dimmed(),
            topology.modules.len(),
            topology.intersections.len(),
            topology.roads.len()
        );
    }

    /// One line per replayed edit
    pub fn print_outcome(&self, step: usize, label: &str, outcome: &EditOutcome) {
        let status = match outcome {
            EditOutcome::Applied => "applied".bright_green(),
            EditOutcome::Reverted { .. } => "reverted".bright_yellow(),
        };
        println!("  {:>3}. {:<40} {}", step, label, status);
    }

    /// Character map of the grid: `+` intersections, module cells by the
    /// first letter of their type, `?` for unattached modules
    pub fn print_grid(&self, grid: &GridLayout) {
        let Some(bounds) = grid.bounds() else {
            self.print_info("Grid is empty");
            return;
        };

        for y in bounds.y..bounds.bottom() {
            let mut line = String::from("  ");
            for x in bounds.x..bounds.right() {
                let cell = match grid.tile_at(x, y) {
                    None => "·".dimmed().to_string(),
                    Some(GridTile::Road(_)) => "+".bright_cyan().to_string(),
                    Some(GridTile::Module(m)) if !m.is_attached() => "?".bright_red().to_string(),
                    Some(GridTile::Module(m)) => m
                        .module_type
                        .as_str()
                        .chars()
                        .next()
                        .unwrap_or('M')
                        .to_string()
                        .bright_white()
                        .to_string(),
                };
                line.push_str(&cell);
            }
            println!("{}", line);
        }
    }
}
