//! Save snapshots
//!
//! A save is a plain keyed JSON document: player position, checkpoint,
//! death count, level name, camera scroll, and the full tile grid
//! including runtime hazard mutations and spawned-tile rotations.
//! Missing saves are normal (fresh run); corrupt saves get a warning
//! and default state, never a crash.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::world::{Tile, Tilemap};

/// Error type for save IO
#[derive(Debug)]
pub enum SaveError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    BadTilemap(String),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::IoError(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::ParseError(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::IoError(e) => write!(f, "IO error: {}", e),
            SaveError::ParseError(e) => write!(f, "Parse error: {}", e),
            SaveError::BadTilemap(e) => write!(f, "Bad tilemap in save: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}

/// Everything needed to resume a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub player_pos: (f32, f32),
    pub checkpoint: (f32, f32),
    pub death_count: u32,
    /// Level name (resolved to a file by the scene)
    pub level: String,
    /// Full tile grid in string-keyed form, hazard mutations included
    pub tilemap: HashMap<String, Tile>,
    pub tile_size: i32,
    pub solid_ids: Vec<String>,
    /// Rotations of runtime-spawned tiles, keyed `"x|y"`
    pub rotations: HashMap<String, f32>,
    pub scroll: (f32, f32),
}

impl SaveData {
    /// Snapshot the current run.
    pub fn capture(
        player_pos: (f32, f32),
        checkpoint: (f32, f32),
        death_count: u32,
        level: &str,
        tilemap: &Tilemap,
        scroll: (f32, f32),
    ) -> Self {
        let rotations = tilemap
            .rotations
            .iter()
            .map(|((x, y), angle)| (format!("{}|{}", x, y), *angle))
            .collect();
        Self {
            player_pos,
            checkpoint,
            death_count,
            level: level.to_string(),
            tilemap: tilemap.to_keyed_map(),
            tile_size: tilemap.tile_size,
            solid_ids: tilemap.solid_ids().iter().cloned().collect(),
            rotations,
            scroll,
        }
    }

    /// Rebuild the tile grid stored in this save.
    pub fn restore_tilemap(&self) -> Result<Tilemap, SaveError> {
        let mut map = Tilemap::new(self.tile_size);
        map.load_keyed_map(self.tilemap.clone())
            .map_err(SaveError::BadTilemap)?;
        map.set_solid_ids(self.solid_ids.iter().cloned());
        for (key, angle) in &self.rotations {
            let mut parts = key.splitn(2, '|');
            let x = parts.next().and_then(|s| s.parse().ok());
            let y = parts.next().and_then(|s| s.parse().ok());
            if let (Some(x), Some(y)) = (x, y) {
                map.rotations.insert((x, y), *angle);
            }
        }
        Ok(map)
    }
}

/// Where the save file lives. Native builds use the platform data
/// directory; everything else falls back to a relative path.
pub fn save_path() -> PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(base) = dirs::data_dir() {
        return base.join("peak").join("save.json");
    }
    PathBuf::from("data/saves/save.json")
}

/// Write a save, creating parent directories as needed.
pub fn write_save(path: impl AsRef<Path>, data: &SaveData) -> Result<(), SaveError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(data)?)?;
    Ok(())
}

/// Read a save. `Ok(None)` when no file exists (fresh run).
pub fn read_save(path: impl AsRef<Path>) -> Result<Option<SaveData>, SaveError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

/// Read a save, downgrading corruption to a warning and a fresh run.
pub fn read_save_or_default(path: impl AsRef<Path>) -> Option<SaveData> {
    match read_save(path.as_ref()) {
        Ok(data) => data,
        Err(e) => {
            eprintln!(
                "Warning: save file {} is corrupted or unreadable ({}). Starting fresh.",
                path.as_ref().display(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileLayer;

    fn sample_tilemap() -> Tilemap {
        let mut map = Tilemap::new(16);
        map.set(0, 2, TileLayer::Physics, "40"); // sprung trap persisted
        map.set(0, 1, TileLayer::Background, "16");
        map.seed_solid_ids_from_physics_layer();
        map.rotations.insert((0, 1), 0.0);
        map
    }

    #[test]
    fn test_round_trip_preserves_mutations() {
        let map = sample_tilemap();
        let data = SaveData::capture((50.0, 30.0), (180.0, 100.0), 7, "map", &map, (12.0, -4.0));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        write_save(&path, &data).unwrap();

        let restored = read_save(&path).unwrap().unwrap();
        assert_eq!(restored.player_pos, (50.0, 30.0));
        assert_eq!(restored.checkpoint, (180.0, 100.0));
        assert_eq!(restored.death_count, 7);
        assert_eq!(restored.scroll, (12.0, -4.0));

        let restored_map = restored.restore_tilemap().unwrap();
        assert_eq!(
            restored_map.get(0, 2, TileLayer::Physics).unwrap().tile_id,
            "40"
        );
        assert_eq!(
            restored_map.get(0, 1, TileLayer::Background).unwrap().tile_id,
            "16"
        );
        assert_eq!(restored_map.rotations.get(&(0, 1)), Some(&0.0));
        assert!(restored_map.is_solid_id("40"));
    }

    #[test]
    fn test_missing_save_is_fresh_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(read_save(&path).unwrap().is_none());
        assert!(read_save_or_default(&path).is_none());
    }

    #[test]
    fn test_corrupt_save_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ definitely not json").unwrap();

        assert!(matches!(read_save(&path), Err(SaveError::ParseError(_))));
        assert!(read_save_or_default(&path).is_none());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let map = sample_tilemap();
        let data = SaveData::capture((0.0, 0.0), (0.0, 0.0), 0, "map", &map, (0.0, 0.0));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("save.json");
        write_save(&path, &data).unwrap();
        assert!(path.exists());
    }
}
