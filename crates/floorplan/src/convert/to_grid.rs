//! Graph-to-grid conversion
//!
//! Places every intersection on an integer grid by walking the road graph,
//! then hangs each module off the side of its intersection.

use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::grid::{CollisionDetector, Footprint, GridLayout, ModuleTile, RoadTile};
use crate::topology::{Direction, Module, Topology};

/// Smallest column gap between components that keeps the modules hanging
/// off their outer intersections apart
const MIN_COMPONENT_GAP: i32 = 3;

/// Neighbours of one intersection as (direction from it, neighbour id)
type Adjacency<'a> = IndexMap<&'a str, Vec<(Direction, &'a str)>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Intersection,
    Module,
    Unknown,
}

/// Converter from a topology snapshot to a baseline grid
#[derive(Debug, Clone)]
pub struct GraphToGrid {
    component_gap: i32,
}

impl Default for GraphToGrid {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl GraphToGrid {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            component_gap: config.component_gap.max(MIN_COMPONENT_GAP),
        }
    }

    pub fn convert(&self, topology: &Topology) -> GridLayout {
        let intersection_ids: IndexSet<&str> = topology
            .intersections
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        let module_ids: HashSet<&str> = topology.modules.iter().map(|m| m.id.as_str()).collect();
        let endpoint = |id: &str| {
            if intersection_ids.contains(id) {
                Endpoint::Intersection
            } else if module_ids.contains(id) {
                Endpoint::Module
            } else {
                Endpoint::Unknown
            }
        };

        let mut adjacency: Adjacency<'_> = intersection_ids
            .iter()
            .map(|id| (*id, Vec::new()))
            .collect();
        // (module, intersection, direction from module to intersection)
        let mut attachments: Vec<(&str, &str, Direction)> = Vec::new();

        for road in &topology.roads {
            let (from, to) = (road.from_id.as_str(), road.to_id.as_str());
            match (endpoint(from), endpoint(to)) {
                (Endpoint::Intersection, Endpoint::Intersection) if from != to => {
                    if let Some(neighbors) = adjacency.get_mut(from) {
                        neighbors.push((road.direction, to));
                    }
                    if let Some(neighbors) = adjacency.get_mut(to) {
                        neighbors.push((road.direction.inverse(), from));
                    }
                }
                (Endpoint::Module, Endpoint::Intersection) => {
                    attachments.push((from, to, road.direction));
                }
                (Endpoint::Intersection, Endpoint::Module) => {
                    attachments.push((to, from, road.direction.inverse()));
                }
                _ => {
                    tracing::warn!(
                        "Skipping road {} -> {}: endpoints are not an intersection pair or a module attachment",
                        from,
                        to
                    );
                }
            }
        }

        let positions = self.assign_coordinates(&intersection_ids, &adjacency);

        let mut grid = GridLayout::new();
        for id in &intersection_ids {
            let (x, y) = positions.get(id).copied().unwrap_or_default();
            let mut tile = RoadTile::new(*id, x, y);
            for (direction, neighbor) in adjacency.get(id).into_iter().flatten() {
                if tile.connections.get(*direction).is_none() {
                    tile.connections.set(*direction, *neighbor);
                } else {
                    tracing::debug!(
                        "Intersection {} already has a {} neighbour, ignoring {}",
                        id,
                        direction,
                        neighbor
                    );
                }
            }
            grid.insert(tile);
        }

        let mut unplaced: Vec<&Module> = Vec::new();
        for module in &topology.modules {
            if grid.contains(&module.id) {
                tracing::warn!("Duplicate tile id {}, skipping module", module.id);
                continue;
            }

            let mut candidates = attachments.iter().filter(|(m, _, _)| *m == module.id);
            let Some((_, intersection_id, direction)) = candidates.next() else {
                tracing::warn!("Module {} has no road to an intersection", module.id);
                unplaced.push(module);
                continue;
            };
            if candidates.next().is_some() {
                tracing::debug!("Module {} has several attachments, using {}", module.id, intersection_id);
            }

            let Some((ix, iy)) = positions.get(intersection_id).copied() else {
                unplaced.push(module);
                continue;
            };
            let slot = direction.inverse();
            let (ax, ay) = slot.step(ix, iy);
            let mut tile = ModuleTile::new(&module.id, module.module_type.clone(), *direction, ax, ay);

            let slot_taken = grid
                .road(intersection_id)
                .and_then(|road| road.connections.get(slot))
                .is_some();
            let rect = tile.footprint().rect_at(ax, ay);
            if slot_taken || CollisionDetector::has_overlapping_item(&grid, &module.id, &rect) {
                tracing::warn!(
                    "Module {} cannot take side {} of intersection {}, parking it",
                    module.id,
                    slot,
                    intersection_id
                );
                unplaced.push(module);
                continue;
            }

            tile.intersection_id = Some(intersection_id.to_string());
            if let Some(road) = grid.road_mut(intersection_id) {
                road.connections.set(slot, &module.id);
            }
            grid.insert(tile);
        }

        grid.normalize();
        park_unplaced(&mut grid, &unplaced);
        grid
    }

    /// Depth-first coordinate assignment, one walk per connected component.
    /// Components after the first are moved right of everything placed so far.
    fn assign_coordinates<'a>(
        &self,
        ids: &IndexSet<&'a str>,
        adjacency: &Adjacency<'a>,
    ) -> HashMap<&'a str, (i32, i32)> {
        let mut positions: HashMap<&'a str, (i32, i32)> = HashMap::new();
        let mut placed_max_x: Option<i32> = None;

        for root in ids {
            if positions.contains_key(root) {
                continue;
            }
            let component = traverse(*root, adjacency);

            let shift_x = match placed_max_x {
                None => 0,
                Some(max_x) => {
                    let min_x = component.values().map(|(x, _)| *x).min().unwrap_or(0);
                    tracing::warn!(
                        "Intersection graph is disconnected; placing the {} intersection(s) reached from {} beside the rest",
                        component.len(),
                        root
                    );
                    max_x + self.component_gap - min_x
                }
            };

            for (id, (x, y)) in component {
                positions.insert(id, (x + shift_x, y));
            }
            placed_max_x = positions.values().map(|(x, _)| *x).max();
        }

        positions
    }
}

/// Coordinates of everything reachable from `root`, relative to it
fn traverse<'a>(root: &'a str, adjacency: &Adjacency<'a>) -> IndexMap<&'a str, (i32, i32)> {
    let mut coords: IndexMap<&'a str, (i32, i32)> = IndexMap::new();
    coords.insert(root, (0, 0));
    let mut stack = vec![root];

    while let Some(current) = stack.pop() {
        let Some((cx, cy)) = coords.get(current).copied() else {
            continue;
        };
        for (direction, neighbor) in adjacency.get(current).into_iter().flatten() {
            if coords.contains_key(neighbor) {
                continue;
            }
            coords.insert(*neighbor, direction.step(cx, cy));
            stack.push(*neighbor);
        }
    }

    coords
}

/// Lines up unattached modules in a row below the grid
fn park_unplaced(grid: &mut GridLayout, modules: &[&Module]) {
    if modules.is_empty() {
        return;
    }
    let mut x = 0;
    let y = grid.bounds().map(|b| b.bottom() + 1).unwrap_or(0);

    for module in modules {
        let direction = module.attach_direction.unwrap_or(Direction::North);
        let fp = Footprint::of(&module.module_type, direction);
        let tile = ModuleTile::new(&module.id, module.module_type.clone(), direction, x - fp.dx, y - fp.dy);
        x += fp.cols + 1;
        grid.insert(tile);
    }
}

/// Converts with the default configuration
pub fn layout_to_grid_layout(topology: &Topology) -> GridLayout {
    GraphToGrid::default().convert(topology)
}
