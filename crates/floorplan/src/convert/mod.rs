//! Conversions between the topology graph and the editing grid

pub mod to_grid;
pub mod to_topology;

pub use to_grid::{layout_to_grid_layout, GraphToGrid};
pub use to_topology::{grid_layout_to_topology, GridToTopology};
