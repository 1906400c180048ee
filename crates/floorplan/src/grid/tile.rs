//! Grid tiles - the positioned, editable form of intersections and modules

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::topology::{Direction, ModuleType};

/// Occupied cell rectangle; `(x, y)` is the top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub cols: i32,
    pub rows: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, cols: i32, rows: i32) -> Self {
        Self { x, y, cols, rows }
    }

    pub fn cell(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    pub fn right(&self) -> i32 {
        self.x + self.cols
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.rows
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Size and anchor offset of a module for one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub dx: i32,
    pub dy: i32,
    pub cols: i32,
    pub rows: i32,
}

impl Footprint {
    const SINGLE: Footprint = Footprint {
        dx: 0,
        dy: 0,
        cols: 1,
        rows: 1,
    };

    /// Footprint of `module_type` when it faces `direction`.
    ///
    /// Double-cell modules lie across the attach axis; the extra cell is
    /// chosen so the table turns with the module and the anchor cell (the
    /// one touching the intersection) never moves.
    pub fn of(module_type: &ModuleType, direction: Direction) -> Self {
        if !module_type.is_double_cell() {
            return Self::SINGLE;
        }
        match direction {
            Direction::North => Footprint { dx: -1, dy: 0, cols: 2, rows: 1 },
            Direction::East => Footprint { dx: 0, dy: -1, cols: 1, rows: 2 },
            Direction::South => Footprint { dx: 0, dy: 0, cols: 2, rows: 1 },
            Direction::West => Footprint { dx: 0, dy: 0, cols: 1, rows: 2 },
        }
    }

    /// Rectangle covered when the anchor cell is `(ax, ay)`
    pub fn rect_at(&self, ax: i32, ay: i32) -> Rect {
        Rect::new(ax + self.dx, ay + self.dy, self.cols, self.rows)
    }
}

/// Neighbour ids of a road tile, one optional slot per direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Connections {
    #[serde(default)]
    pub north: Option<String>,
    #[serde(default)]
    pub east: Option<String>,
    #[serde(default)]
    pub south: Option<String>,
    #[serde(default)]
    pub west: Option<String>,
}

impl Connections {
    pub fn get(&self, direction: Direction) -> Option<&str> {
        self.slot(direction).as_deref()
    }

    pub fn set(&mut self, direction: Direction, id: impl Into<String>) {
        *self.slot_mut(direction) = Some(id.into());
    }

    pub fn unset(&mut self, direction: Direction) {
        *self.slot_mut(direction) = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drops every slot pointing at `id`; returns whether anything changed
    pub fn clear_references_to(&mut self, id: &str) -> bool {
        let mut changed = false;
        for direction in Direction::ALL {
            let slot = self.slot_mut(direction);
            if slot.as_deref() == Some(id) {
                *slot = None;
                changed = true;
            }
        }
        changed
    }

    /// Occupied slots in clockwise order starting at north
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &str)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.get(d).map(|id| (d, id)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&self, direction: Direction) -> &Option<String> {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<String> {
        match direction {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
        }
    }
}

/// Grid form of an intersection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct RoadTile {
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub connections: Connections,
}

impl RoadTile {
    pub fn new(id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            connections: Connections::default(),
        }
    }
}

/// Grid form of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTile {
    pub id: String,
    #[ts(type = "string")]
    pub module_type: ModuleType,
    pub x: i32,
    pub y: i32,
    pub cols: i32,
    pub rows: i32,
    /// Direction from the module towards its intersection
    pub direction: Direction,
    #[serde(default)]
    pub intersection_id: Option<String>,
}

impl ModuleTile {
    /// An unattached module whose anchor cell is `(ax, ay)`
    pub fn new(
        id: impl Into<String>,
        module_type: ModuleType,
        direction: Direction,
        ax: i32,
        ay: i32,
    ) -> Self {
        let rect = Footprint::of(&module_type, direction).rect_at(ax, ay);
        Self {
            id: id.into(),
            module_type,
            x: rect.x,
            y: rect.y,
            cols: rect.cols,
            rows: rect.rows,
            direction,
            intersection_id: None,
        }
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::of(&self.module_type, self.direction)
    }

    /// The cell that must touch the intersection
    pub fn anchor(&self) -> (i32, i32) {
        let fp = self.footprint();
        (self.x - fp.dx, self.y - fp.dy)
    }

    /// Anchor cell the module would have if its top-left cell were `(x, y)`
    pub fn anchor_for_origin(&self, x: i32, y: i32) -> (i32, i32) {
        let fp = self.footprint();
        (x - fp.dx, y - fp.dy)
    }

    /// Re-orients the module around the anchor `(ax, ay)`
    pub fn place(&mut self, ax: i32, ay: i32, direction: Direction) {
        let rect = Footprint::of(&self.module_type, direction).rect_at(ax, ay);
        self.direction = direction;
        self.x = rect.x;
        self.y = rect.y;
        self.cols = rect.cols;
        self.rows = rect.rows;
    }

    pub fn is_attached(&self) -> bool {
        self.intersection_id.is_some()
    }
}

/// A positioned tile on the editing grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridTile {
    Road(RoadTile),
    Module(ModuleTile),
}

impl GridTile {
    pub fn id(&self) -> &str {
        match self {
            GridTile::Road(road) => &road.id,
            GridTile::Module(module) => &module.id,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            GridTile::Road(road) => Rect::cell(road.x, road.y),
            GridTile::Module(module) => Rect::new(module.x, module.y, module.cols, module.rows),
        }
    }

    pub fn shift(&mut self, dx: i32, dy: i32) {
        match self {
            GridTile::Road(road) => {
                road.x += dx;
                road.y += dy;
            }
            GridTile::Module(module) => {
                module.x += dx;
                module.y += dy;
            }
        }
    }

    /// Clears any link this tile holds to `id`
    pub fn clear_references_to(&mut self, id: &str) -> bool {
        match self {
            GridTile::Road(road) => road.connections.clear_references_to(id),
            GridTile::Module(module) => {
                if module.intersection_id.as_deref() == Some(id) {
                    module.intersection_id = None;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Drops every link this tile holds
    pub fn detach(&mut self) {
        match self {
            GridTile::Road(road) => road.connections.clear(),
            GridTile::Module(module) => module.intersection_id = None,
        }
    }

    pub fn as_road(&self) -> Option<&RoadTile> {
        match self {
            GridTile::Road(road) => Some(road),
            GridTile::Module(_) => None,
        }
    }

    pub fn as_road_mut(&mut self) -> Option<&mut RoadTile> {
        match self {
            GridTile::Road(road) => Some(road),
            GridTile::Module(_) => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleTile> {
        match self {
            GridTile::Module(module) => Some(module),
            GridTile::Road(_) => None,
        }
    }

    pub fn as_module_mut(&mut self) -> Option<&mut ModuleTile> {
        match self {
            GridTile::Module(module) => Some(module),
            GridTile::Road(_) => None,
        }
    }
}

impl From<RoadTile> for GridTile {
    fn from(road: RoadTile) -> Self {
        GridTile::Road(road)
    }
}

impl From<ModuleTile> for GridTile {
    fn from(module: ModuleTile) -> Self {
        GridTile::Module(module)
    }
}
