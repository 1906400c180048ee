//! Topology module - Graph-form description of the shopfloor network

pub mod direction;
pub mod model;

pub use direction::Direction;
pub use model::{Intersection, Module, ModuleType, Road, Topology};
