//! Level loading and saving
//!
//! Levels are plain JSON: a string-keyed tile map (`"x;y"` physics,
//! `"x|y"` background, `"x:y"` decor), the tile size, and optionally an
//! explicit list of solid tile ids. When the list is absent, every id
//! present on the physics layer at load time is solid.
//!
//! A corrupt level file fails here, before any gameplay state is
//! constructed. The simulation core never sees malformed data.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::tilemap::{Tile, Tilemap};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of tiles across all layers
    pub const MAX_TILES: usize = 100_000;
    /// Maximum absolute tile coordinate
    pub const MAX_COORD: i32 = 1_000_000;
    /// Maximum string length for tile ids
    pub const MAX_ID_LEN: usize = 32;
    /// Allowed tile size range in pixels
    pub const MIN_TILE_SIZE: i32 = 4;
    pub const MAX_TILE_SIZE: i32 = 128;
}

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    ValidationError(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::ParseError(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for LevelError {}

/// On-disk level document
#[derive(Debug, Serialize, Deserialize)]
struct LevelDoc {
    tilemap: HashMap<String, Tile>,
    tile_size: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    solid_ids: Option<Vec<String>>,
}

/// Validate a parsed document against [`limits`].
fn validate(doc: &LevelDoc) -> Result<(), LevelError> {
    if doc.tile_size < limits::MIN_TILE_SIZE || doc.tile_size > limits::MAX_TILE_SIZE {
        return Err(LevelError::ValidationError(format!(
            "tile_size {} outside {}..={}",
            doc.tile_size,
            limits::MIN_TILE_SIZE,
            limits::MAX_TILE_SIZE
        )));
    }
    if doc.tilemap.len() > limits::MAX_TILES {
        return Err(LevelError::ValidationError(format!(
            "{} tiles exceeds limit of {}",
            doc.tilemap.len(),
            limits::MAX_TILES
        )));
    }
    for tile in doc.tilemap.values() {
        if tile.tile_id.len() > limits::MAX_ID_LEN {
            return Err(LevelError::ValidationError(format!(
                "tile id longer than {} chars",
                limits::MAX_ID_LEN
            )));
        }
        if tile.pos.0.abs() > limits::MAX_COORD || tile.pos.1.abs() > limits::MAX_COORD {
            return Err(LevelError::ValidationError(format!(
                "tile coordinate {:?} outside +/-{}",
                tile.pos,
                limits::MAX_COORD
            )));
        }
    }
    Ok(())
}

/// Parse a level from a JSON string.
pub fn level_from_str(json: &str) -> Result<Tilemap, LevelError> {
    let doc: LevelDoc = serde_json::from_str(json)?;
    validate(&doc)?;

    let mut map = Tilemap::new(doc.tile_size);
    map.load_keyed_map(doc.tilemap)
        .map_err(LevelError::ValidationError)?;

    match doc.solid_ids {
        Some(ids) => map.set_solid_ids(ids),
        None => map.seed_solid_ids_from_physics_layer(),
    }
    Ok(map)
}

/// Serialize a level to a JSON string.
pub fn level_to_string(map: &Tilemap) -> Result<String, LevelError> {
    let doc = LevelDoc {
        tilemap: map.to_keyed_map(),
        tile_size: map.tile_size,
        solid_ids: Some(map.solid_ids().iter().cloned().collect()),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Load a level file from disk.
pub fn load_level(path: impl AsRef<Path>) -> Result<Tilemap, LevelError> {
    let json = fs::read_to_string(path.as_ref())?;
    level_from_str(&json)
}

/// Save a level file to disk.
pub fn save_level(path: impl AsRef<Path>, map: &Tilemap) -> Result<(), LevelError> {
    fs::write(path.as_ref(), level_to_string(map)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tilemap::TileLayer;

    #[test]
    fn test_load_original_format() {
        let json = r#"{
            "tilemap": {
                "0;1": {"tile_id": "1", "pos": [0, 1]},
                "1;1": {"tile_id": "2", "pos": [1, 1]},
                "0|0": {"tile_id": "9", "pos": [0, 0]}
            },
            "tile_size": 16
        }"#;
        let map = level_from_str(json).unwrap();

        assert_eq!(map.tile_size, 16);
        assert_eq!(map.get(0, 1, TileLayer::Physics).unwrap().tile_id, "1");
        assert_eq!(map.get(0, 0, TileLayer::Background).unwrap().tile_id, "9");
        // No solid_ids declared: physics ids become the solid set
        assert!(map.is_solid_id("1"));
        assert!(map.is_solid_id("2"));
        assert!(!map.is_solid_id("9"));
    }

    #[test]
    fn test_explicit_solid_ids_win() {
        let json = r#"{
            "tilemap": {
                "0;0": {"tile_id": "1", "pos": [0, 0]},
                "1;0": {"tile_id": "38", "pos": [1, 0]}
            },
            "tile_size": 16,
            "solid_ids": ["1", "38", "40"]
        }"#;
        let map = level_from_str(json).unwrap();
        assert!(map.is_solid_id("40"));
        assert!(!map.is_solid_id("2"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut map = Tilemap::new(16);
        map.set(-5, 3, TileLayer::Physics, "1");
        map.set(0, 0, TileLayer::Decor, "12");
        map.seed_solid_ids_from_physics_layer();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        save_level(&path, &map).unwrap();

        let restored = load_level(&path).unwrap();
        assert_eq!(restored.tile_size, 16);
        assert_eq!(restored.get(-5, 3, TileLayer::Physics).unwrap().tile_id, "1");
        assert_eq!(restored.get(0, 0, TileLayer::Decor).unwrap().tile_id, "12");
        assert!(restored.is_solid_id("1"));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            level_from_str("{ not json"),
            Err(LevelError::ParseError(_))
        ));
    }

    #[test]
    fn test_rejects_bad_tile_size() {
        let json = r#"{"tilemap": {}, "tile_size": 0}"#;
        assert!(matches!(
            level_from_str(json),
            Err(LevelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_key() {
        let json = r#"{
            "tilemap": {"zap": {"tile_id": "1", "pos": [0, 0]}},
            "tile_size": 16
        }"#;
        assert!(matches!(
            level_from_str(json),
            Err(LevelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_level("/definitely/not/here.json"),
            Err(LevelError::IoError(_))
        ));
    }
}
