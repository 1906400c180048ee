//! Grid-to-topology conversion for saving an edited grid

use crate::config::RoadLengths;
use crate::grid::{GridLayout, GridTile, LayoutValidator};
use crate::topology::{Direction, Intersection, Module, Road, Topology};
use crate::{FloorplanError, Result};

/// Converter from an edited grid back to a topology snapshot
#[derive(Debug, Clone, Default)]
pub struct GridToTopology {
    lengths: RoadLengths,
}

impl GridToTopology {
    pub fn new(lengths: RoadLengths) -> Self {
        Self { lengths }
    }

    /// Regenerates the topology.
    ///
    /// Each undirected intersection link is written once, from the tile that
    /// holds it in its NORTH or EAST slot, so the grid's slots must agree on
    /// both ends; one-sided or dangling links are refused.
    pub fn convert(&self, grid: &GridLayout) -> Result<Topology> {
        let inconsistent = LayoutValidator::check_connection_symmetry(grid);
        if !inconsistent.is_empty() {
            return Err(FloorplanError::InconsistentConnections(inconsistent));
        }

        let mut topology = Topology::new();

        for tile in grid.tiles() {
            match tile {
                GridTile::Module(module) => {
                    let Some(intersection_id) = module.intersection_id.as_deref() else {
                        tracing::debug!("Module {} is not attached, leaving it out", module.id);
                        continue;
                    };
                    topology.modules.push(
                        Module::new(&module.id, module.module_type.clone())
                            .with_attach_direction(module.direction),
                    );
                    topology.roads.push(Road::new(
                        &module.id,
                        intersection_id,
                        module.direction,
                        self.lengths.for_module(&module.module_type),
                    ));
                }
                GridTile::Road(road) => {
                    topology.intersections.push(Intersection::new(&road.id));
                    for direction in [Direction::North, Direction::East] {
                        let Some(neighbor) = road.connections.get(direction) else {
                            continue;
                        };
                        if grid.road(neighbor).is_some() {
                            topology.roads.push(Road::new(
                                &road.id,
                                neighbor,
                                direction,
                                self.lengths.intersection,
                            ));
                        }
                    }
                }
            }
        }

        Ok(topology)
    }
}

/// Converts with the default road lengths
pub fn grid_layout_to_topology(grid: &GridLayout) -> Result<Topology> {
    GridToTopology::default().convert(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ModuleTile, RoadTile};
    use crate::topology::ModuleType;

    /// 2 north of 1, 3 east of 1, charger south of 1, mill west of 3
    fn sample_grid() -> GridLayout {
        let mut one = RoadTile::new("1", 0, 1);
        one.connections.set(Direction::North, "2");
        one.connections.set(Direction::East, "3");
        one.connections.set(Direction::South, "C");
        let mut two = RoadTile::new("2", 0, 0);
        two.connections.set(Direction::South, "1");
        let mut three = RoadTile::new("3", 1, 1);
        three.connections.set(Direction::West, "1");
        three.connections.set(Direction::North, "M");

        let mut charger = ModuleTile::new("C", ModuleType::Chrg, Direction::North, 0, 2);
        charger.intersection_id = Some("1".to_string());
        let mut mill = ModuleTile::new("M", ModuleType::Mill, Direction::South, 1, 0);
        mill.intersection_id = Some("3".to_string());

        GridLayout::from(vec![
            one.into(),
            two.into(),
            three.into(),
            charger.into(),
            mill.into(),
        ])
    }

    #[test]
    fn test_emits_each_intersection_link_once() {
        let topology = grid_layout_to_topology(&sample_grid()).unwrap();

        let links: Vec<_> = topology
            .roads
            .iter()
            .filter(|r| topology.has_intersection(&r.from_id) && topology.has_intersection(&r.to_id))
            .collect();
        assert_eq!(links.len(), 2);
        assert!(links.contains(&&Road::new("1", "2", Direction::North, 380)));
        assert!(links.contains(&&Road::new("1", "3", Direction::East, 380)));
    }

    #[test]
    fn test_module_roads_come_from_module_side() {
        let topology = grid_layout_to_topology(&sample_grid()).unwrap();

        assert!(topology.roads.contains(&Road::new("C", "1", Direction::North, 360)));
        assert!(topology.roads.contains(&Road::new("M", "3", Direction::South, 200)));
        // the north slot of 3 holds a module and must not produce a second road
        assert!(!topology.roads.iter().any(|r| r.from_id == "3"));
        assert_eq!(topology.roads.len(), 4);
    }

    #[test]
    fn test_modules_carry_attach_direction() {
        let topology = grid_layout_to_topology(&sample_grid()).unwrap();
        let charger = topology.get_module("C").unwrap();
        assert_eq!(charger.module_type, ModuleType::Chrg);
        assert_eq!(charger.attach_direction, Some(Direction::North));
        assert_eq!(topology.intersections.len(), 3);
    }

    #[test]
    fn test_custom_lengths() {
        let lengths = RoadLengths {
            intersection: 500,
            module: 100,
            charger: 150,
        };
        let topology = GridToTopology::new(lengths).convert(&sample_grid()).unwrap();
        assert!(topology.roads.contains(&Road::new("1", "2", Direction::North, 500)));
        assert!(topology.roads.contains(&Road::new("C", "1", Direction::North, 150)));
    }

    #[test]
    fn test_one_sided_link_is_refused() {
        let mut grid = sample_grid();
        grid.road_mut("2").unwrap().connections.unset(Direction::South);

        let err = grid_layout_to_topology(&grid).unwrap_err();
        match err {
            FloorplanError::InconsistentConnections(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].tile_ids, vec!["1".to_string(), "2".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_grid_gives_empty_topology() {
        let topology = grid_layout_to_topology(&GridLayout::new()).unwrap();
        assert!(topology.is_empty());
    }
}
