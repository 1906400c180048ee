//! Grid layout - id-keyed arena of positioned tiles

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tile::{GridTile, ModuleTile, Rect, RoadTile};
use crate::Result;

/// The full set of positioned tiles.
///
/// Tiles refer to each other by id only; every lookup goes through the
/// arena. Insertion order is preserved so conversions are deterministic.
/// Serialized as a plain array of tiles for the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GridTile>", into = "Vec<GridTile>")]
pub struct GridLayout {
    tiles: IndexMap<String, GridTile>,
}

impl GridLayout {
    pub fn new() -> Self {
        Self {
            tiles: IndexMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds or replaces a tile
    pub fn insert(&mut self, tile: impl Into<GridTile>) {
        let tile = tile.into();
        self.tiles.insert(tile.id().to_string(), tile);
    }

    /// Removes a tile, keeping the order of the rest
    pub fn remove(&mut self, id: &str) -> Option<GridTile> {
        self.tiles.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&GridTile> {
        self.tiles.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut GridTile> {
        self.tiles.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tiles.contains_key(id)
    }

    pub fn road(&self, id: &str) -> Option<&RoadTile> {
        self.get(id).and_then(GridTile::as_road)
    }

    pub fn road_mut(&mut self, id: &str) -> Option<&mut RoadTile> {
        self.get_mut(id).and_then(GridTile::as_road_mut)
    }

    pub fn module(&self, id: &str) -> Option<&ModuleTile> {
        self.get(id).and_then(GridTile::as_module)
    }

    pub fn module_mut(&mut self, id: &str) -> Option<&mut ModuleTile> {
        self.get_mut(id).and_then(GridTile::as_module_mut)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &GridTile> + '_ {
        self.tiles.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.tiles.keys().map(String::as_str)
    }

    pub fn road_tiles(&self) -> impl Iterator<Item = &RoadTile> + '_ {
        self.tiles.values().filter_map(GridTile::as_road)
    }

    pub fn module_tiles(&self) -> impl Iterator<Item = &ModuleTile> + '_ {
        self.tiles.values().filter_map(GridTile::as_module)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile whose rectangle covers cell `(x, y)`
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&GridTile> {
        self.tiles.values().find(|t| t.rect().contains(x, y))
    }

    /// Bounding rectangle of every tile, `None` for an empty grid
    pub fn bounds(&self) -> Option<Rect> {
        let mut rects = self.tiles.values().map(GridTile::rect);
        let first = rects.next()?;
        let (min_x, min_y, max_x, max_y) = rects.fold(
            (first.x, first.y, first.right(), first.bottom()),
            |(x0, y0, x1, y1), r| (x0.min(r.x), y0.min(r.y), x1.max(r.right()), y1.max(r.bottom())),
        );
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Shifts every tile so the smallest x and y are both 0
    pub fn normalize(&mut self) {
        let Some(bounds) = self.bounds() else {
            return;
        };
        if bounds.x == 0 && bounds.y == 0 {
            return;
        }
        for tile in self.tiles.values_mut() {
            tile.shift(-bounds.x, -bounds.y);
        }
    }

    /// Removes every link to `id` held by other tiles and every link held by
    /// `id` itself
    pub fn detach(&mut self, id: &str) {
        self.clear_references_to(id);
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.detach();
        }
    }

    /// Clears every connection slot and intersection link pointing at `id`.
    /// Returns the ids of the tiles that changed.
    pub fn clear_references_to(&mut self, id: &str) -> Vec<String> {
        let mut changed = Vec::new();
        for (tile_id, tile) in self.tiles.iter_mut() {
            if tile_id != id && tile.clear_references_to(id) {
                changed.push(tile_id.clone());
            }
        }
        changed
    }
}

impl From<Vec<GridTile>> for GridLayout {
    fn from(tiles: Vec<GridTile>) -> Self {
        let mut layout = GridLayout::new();
        for tile in tiles {
            layout.insert(tile);
        }
        layout
    }
}

impl From<GridLayout> for Vec<GridTile> {
    fn from(layout: GridLayout) -> Self {
        layout.tiles.into_values().collect()
    }
}

impl FromIterator<GridTile> for GridLayout {
    fn from_iter<I: IntoIterator<Item = GridTile>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Direction, ModuleType};

    fn sample() -> GridLayout {
        let mut a = RoadTile::new("1", 2, 3);
        a.connections.set(Direction::East, "2");
        let mut b = RoadTile::new("2", 3, 3);
        b.connections.set(Direction::West, "1");
        b.connections.set(Direction::South, "M");
        let mut m = ModuleTile::new("M", ModuleType::Hbw, Direction::North, 3, 4);
        m.intersection_id = Some("2".to_string());
        GridLayout::from(vec![a.into(), b.into(), m.into()])
    }

    #[test]
    fn test_normalize_anchors_at_origin() {
        let mut grid = sample();
        grid.normalize();

        assert_eq!(grid.bounds(), Some(Rect::new(0, 0, 2, 2)));
        assert_eq!(grid.road("1").map(|r| (r.x, r.y)), Some((0, 0)));
        assert_eq!(grid.module("M").map(|m| (m.x, m.y)), Some((0, 1)));
    }

    #[test]
    fn test_tile_at_finds_second_cell_of_module() {
        let grid = sample();
        assert_eq!(grid.tile_at(2, 4).map(GridTile::id), Some("M"));
        assert_eq!(grid.tile_at(3, 4).map(GridTile::id), Some("M"));
        assert!(grid.tile_at(4, 4).is_none());
    }

    #[test]
    fn test_clear_references_reports_changed_tiles() {
        let mut grid = sample();
        let changed = grid.clear_references_to("2");

        assert_eq!(changed, vec!["1".to_string(), "M".to_string()]);
        assert!(grid.road("1").unwrap().connections.is_empty());
        assert!(grid.module("M").unwrap().intersection_id.is_none());
        // the tile itself keeps its own links
        assert!(!grid.road("2").unwrap().connections.is_empty());
    }

    #[test]
    fn test_serializes_as_array_in_insertion_order() {
        let grid = sample();
        let json = serde_json::to_value(&grid).unwrap();
        let ids: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "M"]);

        let back: GridLayout = serde_json::from_value(json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_empty_grid_has_no_bounds() {
        let mut grid = GridLayout::new();
        grid.normalize();
        assert!(grid.bounds().is_none());
        assert_eq!(serde_json::to_string(&grid).unwrap(), "[]");
    }
}
