//! Game configuration
//!
//! A small RON file tweaks the knobs that are worth adjusting without
//! a rebuild: window scale, starting level, asset paths, audio volume.
//! Any missing or malformed config falls back to defaults with a
//! warning; the game always starts.

use serde::{Deserialize, Serialize};

/// Tunable settings loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Internal render resolution width in pixels
    pub view_width: f32,
    /// Internal render resolution height in pixels
    pub view_height: f32,
    /// Window scale factor applied to the internal resolution
    pub window_scale: f32,
    /// Level file loaded when no save exists
    pub start_level: String,
    /// Directory holding level JSON files
    pub level_dir: String,
    /// Tileset image path
    pub tileset_path: String,
    /// Directory holding player sprite strips
    pub sprite_dir: String,
    /// Directory holding sound effects
    pub sound_dir: String,
    /// Master sound volume, 0.0 to 1.0
    pub volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            view_width: 384.0,
            view_height: 216.0,
            window_scale: 2.5,
            start_level: "map".to_string(),
            level_dir: "data/maps".to_string(),
            tileset_path: "data/images/tileset.png".to_string(),
            sprite_dir: "data/images/player".to_string(),
            sound_dir: "data/sfx".to_string(),
            volume: 0.6,
        }
    }
}

impl GameConfig {
    /// Parse a config document. Unknown fields are rejected by serde;
    /// missing fields take their defaults.
    pub fn from_str(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Load from disk, degrading to defaults on any failure.
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: config {} is invalid ({}), using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Full path to a level file by name.
    pub fn level_path(&self, name: &str) -> String {
        format!("{}/{}.json", self.level_dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_all_defaults() {
        let config = GameConfig::from_str("()").unwrap();
        assert_eq!(config.view_width, 384.0);
        assert_eq!(config.start_level, "map");
    }

    #[test]
    fn test_partial_overrides() {
        let config = GameConfig::from_str("(window_scale: 2.0, volume: 1.0)").unwrap();
        assert_eq!(config.window_scale, 2.0);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.view_height, 216.0);
    }

    #[test]
    fn test_invalid_document_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(window_scale: \"broken\"").unwrap();

        let config = GameConfig::load_or_default(path.to_str().unwrap());
        assert_eq!(config.window_scale, 2.5);
    }

    #[test]
    fn test_level_path() {
        let config = GameConfig::default();
        assert_eq!(config.level_path("map"), "data/maps/map.json");
    }
}
