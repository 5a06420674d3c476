//! World module - layered tile grid and level persistence
//!
//! The tile grid is the only world representation: a sparse map over an
//! integer coordinate space with three layers (physics, background,
//! decor). Levels load from JSON; solidity is fixed at load time.

pub mod level;
pub mod tilemap;

pub use level::{level_from_str, level_to_string, load_level, save_level, LevelError};
pub use tilemap::{Tile, TileKey, TileLayer, Tilemap, NEIGHBOR_OFFSETS};
