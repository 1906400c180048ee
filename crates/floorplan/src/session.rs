//! Editing session - one grid editor bound to the topology channel
//!
//! A session turns inbound topology snapshots into grids, applies edit
//! intents from the user, and publishes the edited topology on save.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use ts_rs::TS;
use uuid::Uuid;

use crate::channel::{TopologyChannel, TopologyMessage};
use crate::config::LayoutConfig;
use crate::convert::{GraphToGrid, GridToTopology};
use crate::editor::{EditOutcome, GridEditor};
use crate::grid::{GridLayout, GridTile, LayoutValidator, ModuleTile, RoadTile};
use crate::topology::{Direction, ModuleType, Topology};
use crate::{FloorplanError, Result};

/// A module about to be placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub id: String,
    #[ts(type = "string")]
    pub module_type: ModuleType,
}

/// User edit requests, as sent by the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditIntent {
    AddIntersection,
    AddModule {
        module: ModuleDescriptor,
    },
    #[serde(rename_all = "camelCase")]
    DeleteTile {
        tile_id: String,
    },
    #[serde(rename_all = "camelCase")]
    MoveTile {
        tile_id: String,
        x: i32,
        y: i32,
    },
    #[serde(rename_all = "camelCase")]
    RotateModule {
        tile_id: String,
    },
}

/// What happened to an inbound snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub enum SnapshotOutcome {
    /// The working grid now shows the snapshot
    Applied,
    /// Kept as baseline only; the working grid has unsaved edits
    Deferred,
}

pub struct LayoutSession {
    id: Uuid,
    config: LayoutConfig,
    editor: GridEditor,
    channel: TopologyChannel,
}

impl LayoutSession {
    pub fn new(config: LayoutConfig, channel: TopologyChannel) -> Self {
        let id = Uuid::new_v4();
        tracing::info!("Layout session {} opened", id);
        Self {
            id,
            config,
            editor: GridEditor::default(),
            channel,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The working grid for the rendering layer
    pub fn grid(&self) -> &GridLayout {
        self.editor.grid()
    }

    pub fn editor(&self) -> &GridEditor {
        &self.editor
    }

    pub fn is_modified(&self) -> bool {
        self.editor.is_modified()
    }

    /// Regenerates the baseline from a topology snapshot
    pub fn apply_snapshot(&mut self, topology: &Topology) -> SnapshotOutcome {
        let grid = GraphToGrid::new(&self.config).convert(topology);
        let tiles = grid.len();

        if self.editor.replace_baseline(grid) {
            tracing::info!("Session {} showing new layout ({} tiles)", self.id, tiles);
            SnapshotOutcome::Applied
        } else {
            tracing::info!(
                "Session {} has unsaved edits, new layout kept as baseline",
                self.id
            );
            SnapshotOutcome::Deferred
        }
    }

    /// Applies every snapshot waiting on `receiver` without blocking.
    /// Returns the outcome of the last one, if any arrived.
    pub fn drain_inbound(
        &mut self,
        receiver: &mut broadcast::Receiver<TopologyMessage>,
    ) -> Option<SnapshotOutcome> {
        let mut last = None;
        loop {
            match receiver.try_recv() {
                Ok(TopologyMessage::LayoutChanged { topology, .. }) => {
                    last = Some(self.apply_snapshot(&topology));
                }
                Ok(TopologyMessage::LayoutSaved { session_id, .. }) => {
                    tracing::debug!("Ignoring layout saved by session {}", session_id);
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "Session {} missed {} topology messages",
                        self.id,
                        skipped
                    );
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
        last
    }

    /// Applies one user edit to the working grid
    pub fn handle_intent(&mut self, intent: EditIntent) -> Result<EditOutcome> {
        tracing::debug!("Session {} handling {:?}", self.id, intent);

        match intent {
            EditIntent::AddIntersection => {
                let (x, y) = self.spawn_origin();
                let id = self.editor.next_id();
                self.editor.add_tile(RoadTile::new(id, x, y))
            }
            EditIntent::AddModule { module } => {
                let (x, y) = self.spawn_origin();
                self.editor.add_tile(spawn_module(module, x, y))
            }
            EditIntent::DeleteTile { tile_id } => {
                self.editor.delete_tile(&tile_id)?;
                Ok(EditOutcome::Applied)
            }
            EditIntent::MoveTile { tile_id, x, y } => self.editor.move_tile(&tile_id, x, y),
            EditIntent::RotateModule { tile_id } => self.editor.rotate_module(&tile_id),
        }
    }

    /// Validates the working grid and publishes it as a topology.
    ///
    /// Nothing is published when the grid fails validation. Whether orders
    /// are running on the shopfloor is for the caller to check.
    pub fn save(&mut self) -> Result<Topology> {
        let grid = self.editor.grid();
        let errors = LayoutValidator::new()
            .with_strict_mode(self.config.strict_validation)
            .errors(grid);
        if !errors.is_empty() {
            tracing::warn!(
                "Session {} refused to save: {} violation(s)",
                self.id,
                errors.len()
            );
            return Err(FloorplanError::InvalidLayout(errors));
        }

        let topology = GridToTopology::new(self.config.road_lengths).convert(grid)?;
        self.channel
            .publish(TopologyMessage::layout_saved(self.id, topology.clone()));
        self.editor.mark_clean();

        tracing::info!(
            "Session {} saved layout: {} modules, {} intersections, {} roads",
            self.id,
            topology.modules.len(),
            topology.intersections.len(),
            topology.roads.len()
        );
        Ok(topology)
    }

    /// Drops every unsaved edit
    pub fn reset(&mut self) {
        self.editor.reset();
        tracing::info!("Session {} reset to baseline", self.id);
    }

    /// Top-left cell for a new tile: first column, below the current grid
    fn spawn_origin(&self) -> (i32, i32) {
        let gap = self.config.spawn_gap.max(0);
        self.editor
            .grid()
            .bounds()
            .map_or((0, 0), |b| (0, b.bottom() + gap))
    }
}

/// New module facing north with its top-left cell on `(x, y)`
fn spawn_module(module: ModuleDescriptor, x: i32, y: i32) -> GridTile {
    let mut tile = ModuleTile::new(module.id, module.module_type, Direction::North, x, y);
    let (ax, ay) = tile.anchor_for_origin(x, y);
    tile.place(ax, ay, Direction::North);
    tile.into()
}
