//! Axis-aligned overlap tests between tile rectangles

use super::layout::GridLayout;
use super::tile::{GridTile, Rect};

/// Collision detector used to gate placements
pub struct CollisionDetector;

impl CollisionDetector {
    /// True when the two rectangles share at least one cell.
    /// Touching edges do not count.
    pub fn overlaps(a: &Rect, b: &Rect) -> bool {
        !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
    }

    /// True when `rect` would overlap any tile other than `id`
    pub fn has_overlapping_item(grid: &GridLayout, id: &str, rect: &Rect) -> bool {
        grid.tiles()
            .filter(|t| t.id() != id)
            .any(|t| Self::overlaps(rect, &t.rect()))
    }

    /// True when `tile`, at its current rectangle, overlaps any other tile
    pub fn tile_overlaps(grid: &GridLayout, tile: &GridTile) -> bool {
        Self::has_overlapping_item(grid, tile.id(), &tile.rect())
    }

    /// Every overlapping pair, each reported once in grid order
    pub fn find_overlaps(grid: &GridLayout) -> Vec<(String, String)> {
        let tiles: Vec<&GridTile> = grid.tiles().collect();
        let mut pairs = Vec::new();
        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                if Self::overlaps(&a.rect(), &b.rect()) {
                    pairs.push((a.id().to_string(), b.id().to_string()));
                }
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tile::{ModuleTile, RoadTile};
    use crate::topology::{Direction, ModuleType};

    #[test]
    fn test_touching_rectangles_do_not_overlap() {
        let a = Rect::new(0, 0, 2, 1);
        assert!(!CollisionDetector::overlaps(&a, &Rect::cell(2, 0)));
        assert!(!CollisionDetector::overlaps(&a, &Rect::cell(0, 1)));
        assert!(!CollisionDetector::overlaps(&a, &Rect::cell(-1, 0)));
    }

    #[test]
    fn test_shared_cell_overlaps() {
        let a = Rect::new(0, 0, 2, 1);
        assert!(CollisionDetector::overlaps(&a, &Rect::cell(1, 0)));
        assert!(CollisionDetector::overlaps(&Rect::new(1, -1, 1, 2), &a));
    }

    #[test]
    fn test_candidate_ignores_itself() {
        let grid = GridLayout::from(vec![
            RoadTile::new("1", 0, 0).into(),
            RoadTile::new("2", 1, 0).into(),
        ]);
        assert!(!CollisionDetector::has_overlapping_item(&grid, "1", &Rect::cell(0, 0)));
        assert!(CollisionDetector::has_overlapping_item(&grid, "1", &Rect::cell(1, 0)));
    }

    #[test]
    fn test_find_overlaps_lists_each_pair_once() {
        let grid = GridLayout::from(vec![
            RoadTile::new("1", 0, 0).into(),
            ModuleTile::new("H", ModuleType::Hbw, Direction::South, 0, 0).into(),
            RoadTile::new("2", 5, 5).into(),
        ]);
        assert_eq!(
            CollisionDetector::find_overlaps(&grid),
            vec![("1".to_string(), "H".to_string())]
        );
    }
}
