//! Configuration management for the floorplan CLI
//!
//! Handles loading and saving configuration from ~/.floorplan/config.toml

use std::path::{Path, PathBuf};

use anyhow::Result;
use floorplan::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the floorplan CLI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON written by the CLI
    #[serde(default = "default_true")]
    pub pretty: bool,

    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            color: true,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".floorplan")
            .join("config.toml")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Every key accepted by `get` and `set`, spelled as in the TOML file
    pub const KEYS: &'static [&'static str] = &[
        "layout.roadLengths.intersection",
        "layout.roadLengths.module",
        "layout.roadLengths.charger",
        "layout.componentGap",
        "layout.spawnGap",
        "layout.strictValidation",
        "layout.channelCapacity",
        "output.pretty",
        "output.color",
    ];

    /// Get a configuration value by key path (e.g., "layout.spawnGap")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        let layout = &self.layout;

        match parts.as_slice() {
            ["layout", "roadLengths", "intersection"] => {
                Some(layout.road_lengths.intersection.to_string())
            }
            ["layout", "roadLengths", "module"] => Some(layout.road_lengths.module.to_string()),
            ["layout", "roadLengths", "charger"] => Some(layout.road_lengths.charger.to_string()),
            ["layout", "componentGap"] => Some(layout.component_gap.to_string()),
            ["layout", "spawnGap"] => Some(layout.spawn_gap.to_string()),
            ["layout", "strictValidation"] => Some(layout.strict_validation.to_string()),
            ["layout", "channelCapacity"] => Some(layout.channel_capacity.to_string()),
            ["output", "pretty"] => Some(self.output.pretty.to_string()),
            ["output", "color"] => Some(self.output.color.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key path
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        let layout = &mut self.layout;

        match parts.as_slice() {
            ["layout", "roadLengths", "intersection"] => {
                layout.road_lengths.intersection = value.parse()?
            }
            ["layout", "roadLengths", "module"] => layout.road_lengths.module = value.parse()?,
            ["layout", "roadLengths", "charger"] => layout.road_lengths.charger = value.parse()?,
            ["layout", "componentGap"] => layout.component_gap = value.parse()?,
            ["layout", "spawnGap"] => layout.spawn_gap = value.parse()?,
            ["layout", "strictValidation"] => layout.strict_validation = value.parse()?,
            ["layout", "channelCapacity"] => layout.channel_capacity = value.parse()?,
            ["output", "pretty"] => self.output.pretty = value.parse()?,
            ["output", "color"] => self.output.color = value.parse()?,
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }

        Ok(())
    }
}
