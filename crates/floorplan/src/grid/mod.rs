//! Grid module - positioned tiles, collision tests and layout validation

pub mod collision;
pub mod layout;
pub mod tile;
pub mod validator;

pub use collision::CollisionDetector;
pub use layout::GridLayout;
pub use tile::{Connections, Footprint, GridTile, ModuleTile, Rect, RoadTile};
pub use validator::{LayoutValidator, LayoutViolation, ViolationRule, ViolationSeverity};
