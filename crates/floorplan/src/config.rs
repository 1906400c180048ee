//! Configuration for layout conversion and editing sessions

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::topology::ModuleType;

/// Road lengths written when a grid is turned back into a topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct RoadLengths {
    /// Between two intersections
    #[serde(default = "default_intersection_length")]
    pub intersection: u32,
    /// From a module to its intersection
    #[serde(default = "default_module_length")]
    pub module: u32,
    /// From a charging station to its intersection
    #[serde(default = "default_charger_length")]
    pub charger: u32,
}

fn default_intersection_length() -> u32 {
    380
}

fn default_module_length() -> u32 {
    200
}

fn default_charger_length() -> u32 {
    360
}

impl Default for RoadLengths {
    fn default() -> Self {
        Self {
            intersection: default_intersection_length(),
            module: default_module_length(),
            charger: default_charger_length(),
        }
    }
}

impl RoadLengths {
    /// Length of the road attaching a module of this type
    pub fn for_module(&self, module_type: &ModuleType) -> u32 {
        if module_type.is_charger() {
            self.charger
        } else {
            self.module
        }
    }
}

/// Core configuration for layout sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default)]
    pub road_lengths: RoadLengths,
    /// Column offset between disconnected components of an inbound topology,
    /// never less than 3
    #[serde(default = "default_component_gap")]
    pub component_gap: i32,
    /// Empty rows between the grid and newly added tiles, never less than 0
    #[serde(default = "default_spawn_gap")]
    pub spawn_gap: i32,
    /// Misaligned connections block saving
    #[serde(default)]
    pub strict_validation: bool,
    /// Buffered messages per topology channel subscriber
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_component_gap() -> i32 {
    3
}

fn default_spawn_gap() -> i32 {
    1
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            road_lengths: RoadLengths::default(),
            component_gap: default_component_gap(),
            spawn_gap: default_spawn_gap(),
            strict_validation: false,
            channel_capacity: default_channel_capacity(),
        }
    }
}
