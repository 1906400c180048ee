//! Graph-form shopfloor topology as exchanged with the configuration channel

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use ts_rs::TS;

use super::direction::Direction;
use crate::Result;

/// A routing waypoint in the road network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Intersection {
    pub id: String,
}

impl Intersection {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A directed road between two network entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Road {
    pub from_id: String,
    pub to_id: String,
    /// Direction travelled from `from_id` to reach `to_id`
    pub direction: Direction,
    pub length: u32,
}

impl Road {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        direction: Direction,
        length: u32,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            direction,
            length,
        }
    }

    /// The same road described from the other end
    pub fn reversed(&self) -> Self {
        Self {
            from_id: self.to_id.clone(),
            to_id: self.from_id.clone(),
            direction: self.direction.inverse(),
            length: self.length,
        }
    }

    /// The road written from its north or west end, so both descriptions
    /// of one physical road compare equal
    pub fn canonical(&self) -> Self {
        match self.direction {
            Direction::North | Direction::West => self.reversed(),
            Direction::East | Direction::South => self.clone(),
        }
    }

    pub fn touches(&self, id: &str) -> bool {
        self.from_id == id || self.to_id == id
    }
}

/// Kind of production or transport station.
///
/// Unknown type names are kept verbatim so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleType {
    Mill,
    Drill,
    Oven,
    /// AI quality station
    Aiqs,
    /// Dispatch station
    Dps,
    /// High-bay warehouse
    Hbw,
    /// Charging station
    Chrg,
    Other(String),
}

impl ModuleType {
    pub fn as_str(&self) -> &str {
        match self {
            ModuleType::Mill => "MILL",
            ModuleType::Drill => "DRILL",
            ModuleType::Oven => "OVEN",
            ModuleType::Aiqs => "AIQS",
            ModuleType::Dps => "DPS",
            ModuleType::Hbw => "HBW",
            ModuleType::Chrg => "CHRG",
            ModuleType::Other(name) => name,
        }
    }

    /// High-bay storage and dispatch stations span two grid cells
    pub fn is_double_cell(&self) -> bool {
        matches!(self, ModuleType::Hbw | ModuleType::Dps)
    }

    pub fn is_charger(&self) -> bool {
        matches!(self, ModuleType::Chrg)
    }
}

impl From<String> for ModuleType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "MILL" => ModuleType::Mill,
            "DRILL" => ModuleType::Drill,
            "OVEN" => ModuleType::Oven,
            "AIQS" => ModuleType::Aiqs,
            "DPS" => ModuleType::Dps,
            "HBW" => ModuleType::Hbw,
            "CHRG" => ModuleType::Chrg,
            _ => ModuleType::Other(value),
        }
    }
}

impl From<&str> for ModuleType {
    fn from(value: &str) -> Self {
        ModuleType::from(value.to_string())
    }
}

impl From<ModuleType> for String {
    fn from(value: ModuleType) -> Self {
        match value {
            ModuleType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station attached to the road network at one intersection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Serial number of the station
    pub id: String,
    #[ts(type = "string")]
    #[schemars(with = "String")]
    pub module_type: ModuleType,
    /// Direction of the road from the module to its intersection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub attach_direction: Option<Direction>,
}

impl Module {
    pub fn new(id: impl Into<String>, module_type: impl Into<ModuleType>) -> Self {
        Self {
            id: id.into(),
            module_type: module_type.into(),
            attach_direction: None,
        }
    }

    pub fn with_attach_direction(mut self, direction: Direction) -> Self {
        self.attach_direction = Some(direction);
        self
    }
}

/// Snapshot of the whole shopfloor network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub intersections: Vec<Intersection>,
    #[serde(default)]
    pub roads: Vec<Road>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.intersections.is_empty() && self.roads.is_empty()
    }

    pub fn get_module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn has_intersection(&self, id: &str) -> bool {
        self.intersections.iter().any(|i| i.id == id)
    }

    /// Roads with an intersection at both ends
    pub fn intersection_roads(&self) -> Vec<&Road> {
        self.roads
            .iter()
            .filter(|r| self.has_intersection(&r.from_id) && self.has_intersection(&r.to_id))
            .collect()
    }

    /// Roads touching the given entity
    pub fn roads_of(&self, id: &str) -> Vec<&Road> {
        self.roads.iter().filter(|r| r.touches(id)).collect()
    }

    /// True when both describe the same network: the same intersections,
    /// the same modules by id and type, and the same physical roads no
    /// matter which end each road was written from
    pub fn same_network(&self, other: &Topology) -> bool {
        fn intersections(t: &Topology) -> HashSet<&str> {
            t.intersections.iter().map(|i| i.id.as_str()).collect()
        }
        fn modules(t: &Topology) -> HashSet<(&str, &str)> {
            t.modules
                .iter()
                .map(|m| (m.id.as_str(), m.module_type.as_str()))
                .collect()
        }
        fn roads(t: &Topology) -> HashSet<Road> {
            t.roads.iter().map(Road::canonical).collect()
        }

        self.roads.len() == other.roads.len()
            && intersections(self) == intersections(other)
            && modules(self) == modules(other)
            && roads(self) == roads(other)
    }
}
