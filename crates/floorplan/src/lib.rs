//! # Floorplan - Shopfloor Layout Conversion and Editing
//!
//! Turns the graph-shaped description of an automated shopfloor (modules,
//! intersections and the roads between them) into a 2D grid that can be
//! edited, and turns the edited grid back into a topology.
//!
//! ## Core Capabilities
//!
//! - **Graph to Grid**: Lays intersections and modules out on integer cells
//! - **Grid Editing**: Transactional add/move/rotate/delete with overlap rollback
//! - **Validation**: Connectivity, attachment and consistency rules gate saving
//! - **Grid to Graph**: Regenerates roads and lengths from the edited grid
//! - **Sessions**: Bind an editor to the topology channel for snapshots and saves

pub mod channel;
pub mod config;
pub mod convert;
pub mod editor;
pub mod grid;
pub mod session;
pub mod topology;


pub use channel::{TopologyChannel, TopologyMessage};
pub use config::{LayoutConfig, RoadLengths};
pub use convert::{grid_layout_to_topology, layout_to_grid_layout, GraphToGrid, GridToTopology};
pub use editor::{EditOutcome, GridEditor, RevertReason};
pub use grid::{
    CollisionDetector, Connections, Footprint, GridLayout, GridTile, LayoutValidator,
    LayoutViolation, ModuleTile, Rect, RoadTile, ViolationRule, ViolationSeverity,
};
pub use session::{EditIntent, LayoutSession, ModuleDescriptor, SnapshotOutcome};
pub use topology::{Direction, Intersection, Module, ModuleType, Road, Topology};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Main error types for floorplan operations
#[derive(Debug, thiserror::Error)]
pub enum FloorplanError {
    #[error("Tile not found: {0}")]
    TileNotFound(String),

    #[error("Tile already exists: {0}")]
    DuplicateTile(String),

    #[error("Tile is not a module: {0}")]
    NotAModule(String),

    #[error("Layout is not valid: {} violation(s)", .0.len())]
    InvalidLayout(Vec<LayoutViolation>),

    #[error("Grid connections are inconsistent: {} violation(s)", .0.len())]
    InconsistentConnections(Vec<LayoutViolation>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FloorplanError {
    /// Rule violations carried by the error, empty for other kinds
    pub fn violations(&self) -> &[LayoutViolation] {
        match self {
            FloorplanError::InvalidLayout(v) | FloorplanError::InconsistentConnections(v) => v,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, FloorplanError>;

/// Summary of a grid for status displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub road_tiles: usize,
    pub module_tiles: usize,
    pub unattached_modules: usize,
    pub width: i32,
    pub height: i32,
    pub valid: bool,
}

impl LayoutSummary {
    pub fn of(grid: &GridLayout) -> Self {
        let (width, height) = grid.bounds().map_or((0, 0), |b| (b.cols, b.rows));
        Self {
            road_tiles: grid.road_tiles().count(),
            module_tiles: grid.module_tiles().count(),
            unattached_modules: grid.module_tiles().filter(|m| !m.is_attached()).count(),
            width,
            height,
            valid: LayoutValidator::validate_grid_layout(grid),
        }
    }
}
