//! Grid editor - the working copy of a grid and the edit operations on it
//!
//! Every operation runs against a snapshot of the working grid. If the tile
//! being placed would overlap another tile the snapshot is restored, so an
//! edit either commits completely or leaves no trace.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grid::{CollisionDetector, Footprint, GridLayout, GridTile, LayoutValidator, Rect};
use crate::topology::Direction;
use crate::{FloorplanError, Result};

/// Result of an edit that was accepted for processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum EditOutcome {
    /// The working grid now reflects the edit
    Applied,
    /// The edit was rolled back
    Reverted { reason: RevertReason },
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub enum RevertReason {
    /// The tile would have covered a cell that is already taken
    Overlap,
}

/// Owner of the baseline grid and the working copy being edited
#[derive(Debug, Clone, Default)]
pub struct GridEditor {
    baseline: GridLayout,
    working: GridLayout,
    modified: bool,
}

impl GridEditor {
    pub fn new(baseline: GridLayout) -> Self {
        let working = baseline.clone();
        Self {
            baseline,
            working,
            modified: false,
        }
    }

    /// The working grid, as handed to the rendering layer
    pub fn grid(&self) -> &GridLayout {
        &self.working
    }

    pub fn baseline(&self) -> &GridLayout {
        &self.baseline
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Called after a successful save. The saved working copy becomes the
    /// baseline and later snapshots may overwrite it again.
    pub fn mark_clean(&mut self) {
        self.baseline = self.working.clone();
        self.modified = false;
    }

    /// Throws away every edit
    pub fn reset(&mut self) {
        self.working = self.baseline.clone();
        self.modified = false;
    }

    /// Installs a new baseline. The working copy follows only while there are
    /// no unsaved edits; returns whether it did.
    pub fn replace_baseline(&mut self, baseline: GridLayout) -> bool {
        self.baseline = baseline;
        if self.modified {
            tracing::debug!("Working grid has unsaved edits, keeping it");
            return false;
        }
        self.working = self.baseline.clone();
        true
    }

    /// Adds a tile and connects it as if it had been moved to its position
    pub fn add_tile(&mut self, tile: impl Into<GridTile>) -> Result<EditOutcome> {
        let tile = tile.into();
        let id = tile.id().to_string();
        if self.working.contains(&id) {
            return Err(FloorplanError::DuplicateTile(id));
        }

        let rect = tile.rect();
        self.commit(|grid| {
            grid.insert(tile);
            place(grid, &id, rect.x, rect.y)
        })
    }

    /// Removes a tile and clears every reference to it
    pub fn delete_tile(&mut self, id: &str) -> Result<GridTile> {
        let removed = self
            .working
            .remove(id)
            .ok_or_else(|| FloorplanError::TileNotFound(id.to_string()))?;
        let changed = self.working.clear_references_to(id);
        self.modified = true;

        tracing::debug!("Deleted tile {}, unlinked {:?}", id, changed);
        Ok(removed)
    }

    /// Moves a tile so its top-left cell is `(x, y)` and rebuilds its links
    pub fn move_tile(&mut self, id: &str, x: i32, y: i32) -> Result<EditOutcome> {
        if !self.working.contains(id) {
            return Err(FloorplanError::TileNotFound(id.to_string()));
        }
        self.commit(|grid| place(grid, id, x, y))
    }

    /// Turns a module clockwise around its anchor cell. An attached module
    /// ends up facing the first road it can reach searching clockwise from the
    /// new direction, which may leave the grid as it was.
    pub fn rotate_module(&mut self, id: &str) -> Result<EditOutcome> {
        let tile = self
            .working
            .get(id)
            .ok_or_else(|| FloorplanError::TileNotFound(id.to_string()))?;
        let module = tile
            .as_module()
            .ok_or_else(|| FloorplanError::NotAModule(id.to_string()))?;
        let (ax, ay) = module.anchor();
        let direction = module.direction.clockwise();

        self.commit(|grid| place_module(grid, id, ax, ay, direction))
    }

    /// Fresh id for a new intersection: one above the largest numeric road
    /// tile id
    pub fn next_id(&self) -> String {
        self.working
            .road_tiles()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1)
            .to_string()
    }

    pub fn validate(&self) -> bool {
        LayoutValidator::validate_grid_layout(&self.working)
    }

    pub fn has_overlapping_item(&self, tile: &GridTile) -> bool {
        CollisionDetector::tile_overlaps(&self.working, tile)
    }

    fn commit<F>(&mut self, op: F) -> Result<EditOutcome>
    where
        F: FnOnce(&mut GridLayout) -> Result<EditOutcome>,
    {
        let snapshot = self.working.clone();
        match op(&mut self.working) {
            Ok(EditOutcome::Applied) => {
                self.working.normalize();
                if self.working != snapshot {
                    self.modified = true;
                }
                Ok(EditOutcome::Applied)
            }
            Ok(reverted) => {
                tracing::debug!("Edit reverted: {:?}", reverted);
                self.working = snapshot;
                Ok(reverted)
            }
            Err(e) => {
                self.working = snapshot;
                Err(e)
            }
        }
    }
}

/// Places tile `id` with its top-left cell at `(x, y)`
fn place(grid: &mut GridLayout, id: &str, x: i32, y: i32) -> Result<EditOutcome> {
    match grid.get(id) {
        Some(GridTile::Road(_)) => place_road(grid, id, x, y),
        Some(GridTile::Module(module)) => {
            let (ax, ay) = module.anchor_for_origin(x, y);
            let direction = module.direction;
            place_module(grid, id, ax, ay, direction)
        }
        None => Err(FloorplanError::TileNotFound(id.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Neighbor {
    Road,
    FreeModule,
    AttachedModule,
}

fn place_road(grid: &mut GridLayout, id: &str, x: i32, y: i32) -> Result<EditOutcome> {
    if CollisionDetector::has_overlapping_item(grid, id, &Rect::cell(x, y)) {
        return Ok(EditOutcome::Reverted {
            reason: RevertReason::Overlap,
        });
    }

    grid.detach(id);
    {
        let road = grid
            .road_mut(id)
            .ok_or_else(|| FloorplanError::TileNotFound(id.to_string()))?;
        road.x = x;
        road.y = y;
    }

    for direction in Direction::ALL {
        let (nx, ny) = direction.step(x, y);
        let (neighbor_id, kind) = match grid.tile_at(nx, ny) {
            None => continue,
            Some(GridTile::Road(road)) => (road.id.clone(), Neighbor::Road),
            Some(GridTile::Module(module)) if module.is_attached() => {
                (module.id.clone(), Neighbor::AttachedModule)
            }
            Some(GridTile::Module(module)) => (module.id.clone(), Neighbor::FreeModule),
        };

        let linked = match kind {
            Neighbor::Road => {
                if let Some(neighbor) = grid.road_mut(&neighbor_id) {
                    neighbor.connections.set(direction.inverse(), id);
                }
                true
            }
            Neighbor::FreeModule => {
                attach_module(grid, &neighbor_id, id, direction.inverse(), nx, ny)
            }
            Neighbor::AttachedModule => false,
        };

        if linked {
            if let Some(road) = grid.road_mut(id) {
                road.connections.set(direction, neighbor_id);
            }
        }
    }

    Ok(EditOutcome::Applied)
}

fn place_module(
    grid: &mut GridLayout,
    id: &str,
    ax: i32,
    ay: i32,
    direction: Direction,
) -> Result<EditOutcome> {
    let module_type = grid
        .module(id)
        .ok_or_else(|| FloorplanError::NotAModule(id.to_string()))?
        .module_type
        .clone();

    // First road around the anchor, searching clockwise, that the module can
    // face without covering another tile
    let layout: &GridLayout = grid;
    let attachment = direction.rotation().into_iter().find_map(|side| {
        let (nx, ny) = side.step(ax, ay);
        let road_id = layout.tile_at(nx, ny)?.as_road()?.id.clone();
        let rect = Footprint::of(&module_type, side).rect_at(ax, ay);
        (!CollisionDetector::has_overlapping_item(layout, id, &rect)).then_some((side, road_id))
    });

    let Some((facing, road_id)) = attachment else {
        let rect = Footprint::of(&module_type, direction).rect_at(ax, ay);
        if CollisionDetector::has_overlapping_item(grid, id, &rect) {
            return Ok(EditOutcome::Reverted {
                reason: RevertReason::Overlap,
            });
        }
        grid.detach(id);
        if let Some(module) = grid.module_mut(id) {
            module.place(ax, ay, direction);
        }
        tracing::debug!("Module {} has no free intersection next to it", id);
        return Ok(EditOutcome::Applied);
    };

    grid.detach(id);
    if let Some(module) = grid.module_mut(id) {
        module.place(ax, ay, facing);
        module.intersection_id = Some(road_id.clone());
    }
    if let Some(road) = grid.road_mut(&road_id) {
        road.connections.set(facing.inverse(), id);
    }
    tracing::debug!("Module {} attached to {} facing {}", id, road_id, facing);
    Ok(EditOutcome::Applied)
}

/// Points module `module_id` at road `road_id`, anchoring it on `(ax, ay)`
/// and facing `direction`. Leaves the module untouched and returns false
/// when the re-oriented footprint would overlap another tile.
fn attach_module(
    grid: &mut GridLayout,
    module_id: &str,
    road_id: &str,
    direction: Direction,
    ax: i32,
    ay: i32,
) -> bool {
    let Some(module) = grid.module(module_id) else {
        return false;
    };
    let rect = Footprint::of(&module.module_type, direction).rect_at(ax, ay);
    if CollisionDetector::has_overlapping_item(grid, module_id, &rect) {
        tracing::debug!(
            "Module {} cannot face {} towards {} without overlapping, leaving it",
            module_id,
            direction,
            road_id
        );
        return false;
    }

    if let Some(module) = grid.module_mut(module_id) {
        module.place(ax, ay, direction);
        module.intersection_id = Some(road_id.to_string());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ModuleTile, RoadTile};
    use crate::topology::ModuleType;

    /// 1 -E- 2 with mill M below 1
    fn base_grid() -> GridLayout {
        let mut one = RoadTile::new("1", 0, 0);
        one.connections.set(Direction::East, "2");
        one.connections.set(Direction::South, "M");
        let mut two = RoadTile::new("2", 1, 0);
        two.connections.set(Direction::West, "1");
        let mut mill = ModuleTile::new("M", ModuleType::Mill, Direction::North, 0, 1);
        mill.intersection_id = Some("1".to_string());
        GridLayout::from(vec![one.into(), two.into(), mill.into()])
    }

    fn editor() -> GridEditor {
        GridEditor::new(base_grid())
    }

    fn references_to(grid: &GridLayout, id: &str) -> usize {
        grid.tiles()
            .filter(|t| match t {
                GridTile::Road(r) => r.connections.iter().any(|(_, n)| n == id),
                GridTile::Module(m) => m.intersection_id.as_deref() == Some(id),
            })
            .count()
    }

    #[test]
    fn test_new_editor_is_clean_copy_of_baseline() {
        let editor = editor();
        assert!(!editor.is_modified());
        assert_eq!(editor.grid(), editor.baseline());
        assert!(editor.validate());
    }

    #[test]
    fn test_add_intersection_links_with_neighbor() {
        let mut editor = editor();
        let outcome = editor.add_tile(RoadTile::new("3", 2, 0)).unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(editor.grid().road("3").unwrap().connections.get(Direction::West), Some("2"));
        assert_eq!(editor.grid().road("2").unwrap().connections.get(Direction::East), Some("3"));
        assert!(editor.is_modified());
        assert!(editor.validate());
    }

    #[test]
    fn test_add_duplicate_id_is_error() {
        let mut editor = editor();
        let err = editor.add_tile(RoadTile::new("2", 5, 5)).unwrap_err();
        assert!(matches!(err, FloorplanError::DuplicateTile(id) if id == "2"));
    }

    #[test]
    fn test_add_onto_taken_cell_is_reverted() {
        let mut editor = editor();
        let outcome = editor.add_tile(RoadTile::new("3", 0, 1)).unwrap();

        assert!(!outcome.is_applied());
        assert!(!editor.grid().contains("3"));
        assert_eq!(editor.grid(), &base_grid());
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_move_road_onto_module_is_reverted() {
        let mut editor = editor();
        let outcome = editor.move_tile("2", 0, 1).unwrap();

        assert_eq!(
            outcome,
            EditOutcome::Reverted {
                reason: RevertReason::Overlap
            }
        );
        assert_eq!(editor.grid(), &base_grid());
    }

    #[test]
    fn test_move_road_away_drops_links() {
        let mut editor = editor();
        editor.move_tile("2", 5, 5).unwrap();

        assert_eq!(editor.grid().road("1").unwrap().connections.get(Direction::East), None);
        assert!(editor.grid().road("2").unwrap().connections.is_empty());
        assert!(!editor.validate());
    }

    #[test]
    fn test_move_to_negative_coordinates_renormalizes() {
        let mut editor = editor();
        editor.move_tile("2", -1, 0).unwrap();

        let grid = editor.grid();
        assert_eq!(grid.road("2").map(|r| (r.x, r.y)), Some((0, 0)));
        assert_eq!(grid.road("1").map(|r| (r.x, r.y)), Some((1, 0)));
        assert_eq!(grid.module("M").map(|m| (m.x, m.y)), Some((1, 1)));
        assert_eq!(grid.road("1").unwrap().connections.get(Direction::West), Some("2"));
        assert_eq!(grid.road("2").unwrap().connections.get(Direction::East), Some("1"));
        assert!(editor.validate());
    }

    #[test]
    fn test_move_road_next_to_free_module_attaches_it() {
        let mut grid = base_grid();
        grid.insert(ModuleTile::new("F", ModuleType::Drill, Direction::West, 3, 1));
        let mut editor = GridEditor::new(grid);

        editor.move_tile("2", 3, 0).unwrap();

        let free = editor.grid().module("F").unwrap();
        assert_eq!(free.intersection_id.as_deref(), Some("2"));
        assert_eq!(free.direction, Direction::North);
        assert_eq!(editor.grid().road("2").unwrap().connections.get(Direction::South), Some("F"));
    }

    #[test]
    fn test_neighbor_module_left_alone_when_reorienting_overlaps() {
        let mut grid = base_grid();
        // high-bay warehouse covering (3,2) and (3,3), anchored on (3,3)
        let hbw = ModuleTile::new("H", ModuleType::Hbw, Direction::East, 3, 3);
        grid.insert(hbw.clone());
        grid.insert(RoadTile::new("B", 3, 1));
        let mut editor = GridEditor::new(grid);

        let outcome = editor.add_tile(RoadTile::new("X", 4, 2)).unwrap();

        assert!(outcome.is_applied());
        assert_eq!(editor.grid().module("H"), Some(&hbw));
        assert_eq!(editor.grid().road("X").unwrap().connections.get(Direction::West), None);
    }

    #[test]
    fn test_move_module_attaches_to_adjacent_road() {
        let mut grid = base_grid();
        grid.insert(ModuleTile::new("D", ModuleType::Drill, Direction::North, 5, 5));
        let mut editor = GridEditor::new(grid);

        editor.move_tile("D", 1, 1).unwrap();

        let drill = editor.grid().module("D").unwrap();
        assert_eq!((drill.x, drill.y), (1, 1));
        assert_eq!(drill.intersection_id.as_deref(), Some("2"));
        assert_eq!(drill.direction, Direction::North);
        assert_eq!(editor.grid().road("2").unwrap().connections.get(Direction::South), Some("D"));
        assert!(editor.validate());
    }

    #[test]
    fn test_module_searches_clockwise_from_its_direction() {
        let mut grid = base_grid();
        grid.insert(RoadTile::new("3", 3, 1));
        grid.insert(ModuleTile::new("D", ModuleType::Drill, Direction::South, 8, 8));
        let mut editor = GridEditor::new(grid);

        // (2,1): road 2 to the north-west is not adjacent; road 3 east
        editor.move_tile("D", 2, 1).unwrap();
        let drill = editor.grid().module("D").unwrap();
        assert_eq!(drill.intersection_id.as_deref(), Some("3"));
        assert_eq!(drill.direction, Direction::East);
    }

    #[test]
    fn test_move_module_into_open_space_leaves_it_unattached() {
        let mut editor = editor();
        let outcome = editor.move_tile("M", 3, 3).unwrap();

        assert!(outcome.is_applied());
        assert!(editor.grid().module("M").unwrap().intersection_id.is_none());
        assert_eq!(editor.grid().road("1").unwrap().connections.get(Direction::South), None);
        assert!(!editor.validate());
    }

    #[test]
    fn test_double_cell_move_uses_top_left_cell() {
        let mut grid = base_grid();
        grid.insert(ModuleTile::new("K", ModuleType::Dps, Direction::North, 6, 6));
        let mut editor = GridEditor::new(grid);

        // facing north the anchor is the right-hand cell: (1,1) -> anchor (2,1)
        editor.add_tile(RoadTile::new("3", 2, 0)).unwrap();
        editor.move_tile("K", 1, 1).unwrap();

        let dps = editor.grid().module("K").unwrap();
        assert_eq!((dps.x, dps.y, dps.cols, dps.rows), (1, 1, 2, 1));
        assert_eq!(dps.anchor(), (2, 1));
        assert_eq!(dps.intersection_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_delete_clears_every_reference() {
        let mut editor = editor();
        let removed = editor.delete_tile("1").unwrap();

        assert_eq!(removed.id(), "1");
        assert_eq!(references_to(editor.grid(), "1"), 0);
        assert!(editor.grid().module("M").unwrap().intersection_id.is_none());
        assert!(editor.is_modified());
        assert!(!editor.validate());
    }

    #[test]
    fn test_delete_unknown_tile_is_error() {
        let mut editor = editor();
        assert!(matches!(
            editor.delete_tile("nope"),
            Err(FloorplanError::TileNotFound(_))
        ));
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_rotate_free_module_four_times_restores_it() {
        let mut grid = base_grid();
        let hbw = ModuleTile::new("H", ModuleType::Hbw, Direction::North, 5, 5);
        grid.insert(hbw.clone());
        let mut editor = GridEditor::new(grid);

        let mut seen = Vec::new();
        for _ in 0..4 {
            assert!(editor.rotate_module("H").unwrap().is_applied());
            seen.push(editor.grid().module("H").unwrap().direction);
        }

        assert_eq!(
            seen,
            vec![Direction::East, Direction::South, Direction::West, Direction::North]
        );
        assert_eq!(editor.grid().module("H"), Some(&hbw));
    }

    #[test]
    fn test_rotate_attached_module_keeps_facing_its_road() {
        let mut editor = editor();
        let before = editor.grid().clone();

        for _ in 0..4 {
            assert!(editor.rotate_module("M").unwrap().is_applied());
            let mill = editor.grid().module("M").unwrap();
            assert_eq!(mill.direction, Direction::North);
            assert_eq!(mill.intersection_id.as_deref(), Some("1"));
        }
        assert_eq!(editor.grid(), &before);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_rotate_attached_warehouse_stays_on_its_road() {
        let mut grid = base_grid();
        // anchored on (2,0) east of road 2, extra cell at (2,1)
        let mut hbw = ModuleTile::new("H", ModuleType::Hbw, Direction::West, 2, 0);
        hbw.intersection_id = Some("2".to_string());
        grid.road_mut("2").unwrap().connections.set(Direction::East, "H");
        grid.insert(hbw.clone());
        let mut editor = GridEditor::new(grid);
        let before = editor.grid().clone();

        for _ in 0..4 {
            assert_eq!(editor.rotate_module("H").unwrap(), EditOutcome::Applied);
        }
        assert_eq!(editor.grid().module("H"), Some(&hbw));
        assert_eq!(editor.grid(), &before);
        assert!(!editor.is_modified());
        assert!(editor.validate());
    }

    #[test]
    fn test_rotate_double_cell_module_moves_to_next_road() {
        let mut south = RoadTile::new("S", 1, 2);
        south.connections.set(Direction::North, "H");
        let mut hbw = ModuleTile::new("H", ModuleType::Hbw, Direction::South, 1, 1);
        hbw.intersection_id = Some("S".to_string());
        let grid = GridLayout::from(vec![
            RoadTile::new("N", 1, 0).into(),
            south.into(),
            hbw.into(),
        ]);
        let mut editor = GridEditor::new(grid);

        // west of the anchor is empty, north is road N
        assert!(editor.rotate_module("H").unwrap().is_applied());

        let grid = editor.grid();
        let hbw = grid.module("H").unwrap();
        assert_eq!(hbw.direction, Direction::North);
        assert_eq!((hbw.x, hbw.y, hbw.cols, hbw.rows), (0, 1, 2, 1));
        assert_eq!(hbw.intersection_id.as_deref(), Some("N"));
        assert_eq!(grid.road("N").unwrap().connections.get(Direction::South), Some("H"));
        assert_eq!(grid.road("S").unwrap().connections.get(Direction::North), None);
        assert!(CollisionDetector::find_overlaps(grid).is_empty());
        assert!(editor.is_modified());
    }

    #[test]
    fn test_rotation_into_taken_cell_is_reverted() {
        let mut grid = base_grid();
        // facing east the warehouse would need (5,4)
        grid.insert(ModuleTile::new("H", ModuleType::Hbw, Direction::North, 5, 5));
        grid.insert(ModuleTile::new("B", ModuleType::Mill, Direction::North, 5, 4));
        let mut editor = GridEditor::new(grid);
        let before = editor.grid().clone();

        let outcome = editor.rotate_module("H").unwrap();
        assert!(!outcome.is_applied());
        assert_eq!(editor.grid(), &before);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_rotate_road_is_error() {
        let mut editor = editor();
        assert!(matches!(
            editor.rotate_module("1"),
            Err(FloorplanError::NotAModule(_))
        ));
    }

    #[test]
    fn test_next_id() {
        let mut editor = editor();
        assert_eq!(editor.next_id(), "3");

        editor.add_tile(RoadTile::new("junction", 9, 9)).unwrap();
        assert_eq!(editor.next_id(), "3");

        assert_eq!(GridEditor::default().next_id(), "1");
    }

    #[test]
    fn test_reset_restores_baseline() {
        let mut editor = editor();
        editor.move_tile("2", 4, 4).unwrap();
        assert!(editor.is_modified());

        editor.reset();
        assert!(!editor.is_modified());
        assert_eq!(editor.grid(), &base_grid());
    }

    #[test]
    fn test_new_baseline_waits_for_clean_state() {
        let mut editor = editor();
        editor.move_tile("2", 4, 4).unwrap();
        let edited = editor.grid().clone();

        let mut incoming = base_grid();
        incoming.insert(RoadTile::new("9", 2, 0));
        assert!(!editor.replace_baseline(incoming.clone()));
        assert_eq!(editor.grid(), &edited);
        assert_eq!(editor.baseline(), &incoming);

        editor.mark_clean();
        assert!(editor.replace_baseline(incoming.clone()));
        assert_eq!(editor.grid(), &incoming);
    }

    #[test]
    fn test_edit_sequence_never_overlaps() {
        let mut editor = editor();
        editor.add_tile(RoadTile::new("3", 2, 0)).unwrap();
        editor.add_tile(ModuleTile::new("H", ModuleType::Hbw, Direction::North, 2, 1)).unwrap();
        editor.move_tile("M", 1, 0).unwrap();
        editor.rotate_module("H").unwrap();
        editor.move_tile("3", 0, 1).unwrap();
        editor.add_tile(RoadTile::new("4", 1, 1)).unwrap();
        editor.delete_tile("2").unwrap();
        editor.move_tile("H", 0, 0).unwrap();

        assert!(CollisionDetector::find_overlaps(editor.grid()).is_empty());
        let bounds = editor.grid().bounds().unwrap();
        assert_eq!((bounds.x, bounds.y), (0, 0));
    }

    #[test]
    fn test_overlap_check_on_candidate_tile() {
        let editor = editor();
        assert!(editor.has_overlapping_item(&RoadTile::new("9", 1, 0).into()));
        assert!(!editor.has_overlapping_item(&RoadTile::new("9", 2, 0).into()));
    }
}
