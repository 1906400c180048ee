//! Layout validation - rules an edited grid must satisfy before it is saved
//!
//! The connectivity check is the save gate proper. The finer-grained rules
//! report why a grid fails and catch grids whose connection slots disagree,
//! which would otherwise export duplicate or missing roads.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use ts_rs::TS;

use super::collision::CollisionDetector;
use super::layout::GridLayout;
use super::tile::GridTile;

/// A violated layout rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct LayoutViolation {
    pub rule: ViolationRule,
    pub severity: ViolationSeverity,
    pub message: String,
    pub tile_ids: Vec<String>,
    pub suggested_fix: Option<String>,
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    UnattachedModule,
    DanglingReference,
    AsymmetricConnection,
    MisalignedConnection,
    OverlappingTiles,
    DisconnectedLayout,
}

impl fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViolationRule::UnattachedModule => "unattached_module",
            ViolationRule::DanglingReference => "dangling_reference",
            ViolationRule::AsymmetricConnection => "asymmetric_connection",
            ViolationRule::MisalignedConnection => "misaligned_connection",
            ViolationRule::OverlappingTiles => "overlapping_tiles",
            ViolationRule::DisconnectedLayout => "disconnected_layout",
        };
        f.write_str(name)
    }
}

/// Severity levels for layout violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// Suspicious but exportable
    Warning,
    /// Blocks saving
    Error,
}

/// Validator for edited grids
#[derive(Debug, Clone, Default)]
pub struct LayoutValidator {
    /// Treat warnings as errors
    strict_mode: bool,
}

impl LayoutValidator {
    pub fn new() -> Self {
        Self { strict_mode: false }
    }

    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// True when every module is attached and every tile is reachable from
    /// the first tile through road connections and module attachments
    pub fn validate_grid_layout(grid: &GridLayout) -> bool {
        let all_attached = grid.module_tiles().all(|m| {
            m.intersection_id
                .as_deref()
                .is_some_and(|id| grid.road(id).is_some())
        });
        if !all_attached {
            return false;
        }

        let Some(root) = grid.ids().next() else {
            return true;
        };
        reachable_from(grid, root).len() == grid.len()
    }

    /// Run every rule against the grid
    pub fn check_all(&self, grid: &GridLayout) -> Vec<LayoutViolation> {
        let mut violations = Vec::new();

        violations.extend(self.check_unattached_modules(grid));
        violations.extend(Self::check_connection_symmetry(grid));
        violations.extend(self.check_alignment(grid));
        violations.extend(self.check_overlaps(grid));
        violations.extend(self.check_connectivity(grid));

        if self.strict_mode {
            for v in &mut violations {
                if v.severity == ViolationSeverity::Warning {
                    v.severity = ViolationSeverity::Error;
                }
            }
        }

        violations
    }

    /// Only the violations that block saving
    pub fn errors(&self, grid: &GridLayout) -> Vec<LayoutViolation> {
        self.check_all(grid)
            .into_iter()
            .filter(|v| v.severity == ViolationSeverity::Error)
            .collect()
    }

    /// Every link must point at a present tile and be answered from the
    /// other side
    pub fn check_connection_symmetry(grid: &GridLayout) -> Vec<LayoutViolation> {
        let mut violations = Vec::new();

        for road in grid.road_tiles() {
            for (direction, target_id) in road.connections.iter() {
                let answered = match grid.get(target_id) {
                    None => {
                        violations.push(LayoutViolation {
                            rule: ViolationRule::DanglingReference,
                            severity: ViolationSeverity::Error,
                            message: format!(
                                "Road tile {} connects {} to missing tile {}",
                                road.id, direction, target_id
                            ),
                            tile_ids: vec![road.id.clone()],
                            suggested_fix: Some("Move the road tile to rebuild its connections".to_string()),
                        });
                        continue;
                    }
                    Some(GridTile::Road(target)) => {
                        target.connections.get(direction.inverse()) == Some(road.id.as_str())
                    }
                    Some(GridTile::Module(target)) => {
                        target.intersection_id.as_deref() == Some(road.id.as_str())
                    }
                };

                if !answered {
                    violations.push(LayoutViolation {
                        rule: ViolationRule::AsymmetricConnection,
                        severity: ViolationSeverity::Error,
                        message: format!(
                            "Road tile {} connects {} to {}, which does not link back",
                            road.id, direction, target_id
                        ),
                        tile_ids: vec![road.id.clone(), target_id.to_string()],
                        suggested_fix: Some("Move either tile to rebuild its connections".to_string()),
                    });
                }
            }
        }

        for module in grid.module_tiles() {
            let Some(intersection_id) = module.intersection_id.as_deref() else {
                continue;
            };
            match grid.get(intersection_id) {
                Some(GridTile::Road(road)) => {
                    if !road.connections.iter().any(|(_, id)| id == module.id) {
                        violations.push(LayoutViolation {
                            rule: ViolationRule::AsymmetricConnection,
                            severity: ViolationSeverity::Error,
                            message: format!(
                                "Module {} is attached to {}, which does not link back",
                                module.id, intersection_id
                            ),
                            tile_ids: vec![module.id.clone(), road.id.clone()],
                            suggested_fix: Some("Move the module to re-attach it".to_string()),
                        });
                    }
                }
                _ => violations.push(LayoutViolation {
                    rule: ViolationRule::DanglingReference,
                    severity: ViolationSeverity::Error,
                    message: format!(
                        "Module {} is attached to {}, which is not a road tile",
                        module.id, intersection_id
                    ),
                    tile_ids: vec![module.id.clone()],
                    suggested_fix: Some("Move the module next to an intersection".to_string()),
                }),
            }
        }

        violations
    }

    fn check_unattached_modules(&self, grid: &GridLayout) -> Vec<LayoutViolation> {
        grid.module_tiles()
            .filter(|m| !m.is_attached())
            .map(|m| LayoutViolation {
                rule: ViolationRule::UnattachedModule,
                severity: ViolationSeverity::Error,
                message: format!("Module {} ({}) is not attached to any intersection", m.id, m.module_type),
                tile_ids: vec![m.id.clone()],
                suggested_fix: Some("Move the module next to an intersection".to_string()),
            })
            .collect()
    }

    /// Linked tiles should sit in the neighbouring cell the slot names
    fn check_alignment(&self, grid: &GridLayout) -> Vec<LayoutViolation> {
        let mut violations = Vec::new();

        for road in grid.road_tiles() {
            for (direction, target_id) in road.connections.iter() {
                let expected = direction.step(road.x, road.y);
                let aligned = match grid.get(target_id) {
                    Some(GridTile::Road(target)) => (target.x, target.y) == expected,
                    Some(GridTile::Module(target)) => {
                        target.anchor() == expected && target.direction == direction.inverse()
                    }
                    None => continue,
                };
                if !aligned {
                    violations.push(LayoutViolation {
                        rule: ViolationRule::MisalignedConnection,
                        severity: ViolationSeverity::Warning,
                        message: format!(
                            "Road tile {} links {} to {}, which is not in the neighbouring cell {:?}",
                            road.id, direction, target_id, expected
                        ),
                        tile_ids: vec![road.id.clone(), target_id.to_string()],
                        suggested_fix: None,
                    });
                }
            }
        }

        violations
    }

    fn check_overlaps(&self, grid: &GridLayout) -> Vec<LayoutViolation> {
        CollisionDetector::find_overlaps(grid)
            .into_iter()
            .map(|(a, b)| LayoutViolation {
                rule: ViolationRule::OverlappingTiles,
                severity: ViolationSeverity::Error,
                message: format!("Tiles {} and {} overlap", a, b),
                tile_ids: vec![a, b],
                suggested_fix: Some("Move one of the tiles to a free cell".to_string()),
            })
            .collect()
    }

    fn check_connectivity(&self, grid: &GridLayout) -> Vec<LayoutViolation> {
        let Some(root) = grid.ids().next() else {
            return Vec::new();
        };
        let reached = reachable_from(grid, root);
        let unreached: Vec<String> = grid
            .ids()
            .filter(|id| !reached.contains(id))
            .map(str::to_string)
            .collect();

        if unreached.is_empty() {
            return Vec::new();
        }

        vec![LayoutViolation {
            rule: ViolationRule::DisconnectedLayout,
            severity: ViolationSeverity::Error,
            message: format!(
                "{} tile(s) are not connected to tile {}: {}",
                unreached.len(),
                root,
                unreached.join(", ")
            ),
            tile_ids: unreached,
            suggested_fix: Some("Link the separated tiles with intersections".to_string()),
        }]
    }
}

/// Undirected neighbour lists built from road slots and module attachments
fn adjacency(grid: &GridLayout) -> HashMap<&str, Vec<&str>> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();

    for tile in grid.tiles() {
        let from = tile.id();
        let targets: Vec<&str> = match tile {
            GridTile::Road(road) => road.connections.iter().map(|(_, id)| id).collect(),
            GridTile::Module(module) => module.intersection_id.as_deref().into_iter().collect(),
        };
        for target in targets {
            let Some(target_tile) = grid.get(target) else {
                continue;
            };
            let to = target_tile.id();
            adjacency.entry(from).or_default().push(to);
            adjacency.entry(to).or_default().push(from);
        }
    }

    adjacency
}

/// Tiles reachable from `root`, stack-based traversal
fn reachable_from<'a>(grid: &'a GridLayout, root: &'a str) -> HashSet<&'a str> {
    let adjacency = adjacency(grid);
    let mut visited = HashSet::new();
    let mut stack = vec![root];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(neighbors) = adjacency.get(current) {
            stack.extend(neighbors.iter().copied().filter(|n| !visited.contains(n)));
        }
    }

    visited
}
