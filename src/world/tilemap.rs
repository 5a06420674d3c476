//! Tile grid
//!
//! Sparse tile storage over an infinite integer coordinate space.
//! Three layers share the same coordinates: physics tiles collide,
//! background tiles sit behind the action (sprung traps spawn their
//! spike ring here), decor draws on top of everything.
//!
//! Solidity is decided once at load time: a tile id is solid iff it is
//! in the level's solid set. Queries against empty space return None or
//! an empty Vec rather than an error - absence is not a failure.

use std::collections::{HashMap, HashSet};

use macroquad::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Offsets of the 3x3 neighborhood used by narrow-phase collision
/// (8 neighbors plus the containing tile itself).
pub const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The three independent tile layers.
///
/// Each layer serializes with its own key sigil so the level JSON keeps
/// the original `"x;y"` / `"x|y"` / `"x:y"` key scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileLayer {
    /// Collidable world geometry
    Physics,
    /// Behind the action (also holds spawned danger-spike tiles)
    Background,
    /// Drawn over everything, never collides
    Decor,
}

impl TileLayer {
    pub const ALL: [TileLayer; 3] = [TileLayer::Physics, TileLayer::Background, TileLayer::Decor];

    /// Separator character used in string tile keys for this layer.
    pub fn sigil(&self) -> char {
        match self {
            TileLayer::Physics => ';',
            TileLayer::Background => '|',
            TileLayer::Decor => ':',
        }
    }

    /// Reverse of [`sigil`](Self::sigil).
    pub fn from_sigil(c: char) -> Option<TileLayer> {
        match c {
            ';' => Some(TileLayer::Physics),
            '|' => Some(TileLayer::Background),
            ':' => Some(TileLayer::Decor),
            _ => None,
        }
    }
}

/// A single placed tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Index into the tileset, stored as a string (level files use
    /// string ids and gameplay compares against id constants).
    pub tile_id: String,
    /// Tile coordinate (not pixels)
    pub pos: (i32, i32),
}

/// Storage key: coordinate plus layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileKey {
    pub x: i32,
    pub y: i32,
    pub layer: TileLayer,
}

impl TileKey {
    pub fn new(x: i32, y: i32, layer: TileLayer) -> Self {
        Self { x, y, layer }
    }

    /// String form used by the level/save JSON, e.g. `"3;-2"`.
    pub fn to_keyed_string(&self) -> String {
        format!("{}{}{}", self.x, self.layer.sigil(), self.y)
    }

    /// Parse a `"x<sigil>y"` key. Returns None for malformed keys;
    /// the loader treats those as a validation error.
    pub fn parse(key: &str) -> Option<TileKey> {
        let (idx, sigil) = key
            .char_indices()
            // Skip position 0 so a leading minus sign is never mistaken
            // for a separator; '-' is not a sigil but stay defensive.
            .skip(1)
            .find(|(_, c)| TileLayer::from_sigil(*c).is_some())?;
        let layer = TileLayer::from_sigil(sigil)?;
        let x = key[..idx].parse().ok()?;
        let y = key[idx + 1..].parse().ok()?;
        Some(TileKey::new(x, y, layer))
    }
}

/// Sparse tile map with per-layer lookup and a static solid-id set.
#[derive(Debug, Clone)]
pub struct Tilemap {
    /// Edge length of a tile in world pixels
    pub tile_size: i32,
    tiles: HashMap<TileKey, Tile>,
    /// Physics-layer ids that participate in collision. Fixed at load.
    solid_ids: HashSet<String>,
    /// Draw rotation (degrees) for tiles spawned at runtime,
    /// keyed by coordinate. Persisted with the snapshot.
    pub rotations: HashMap<(i32, i32), f32>,
}

impl Tilemap {
    pub fn new(tile_size: i32) -> Self {
        Self {
            tile_size,
            tiles: HashMap::new(),
            solid_ids: HashSet::new(),
            rotations: HashMap::new(),
        }
    }

    /// Tile coordinate containing a world position (floor division,
    /// correct for negative positions).
    pub fn tile_coord(&self, pos: Vec2) -> (i32, i32) {
        let ts = self.tile_size as f32;
        ((pos.x / ts).floor() as i32, (pos.y / ts).floor() as i32)
    }

    /// True if any layer has a tile at this coordinate.
    pub fn exists(&self, x: i32, y: i32) -> bool {
        TileLayer::ALL
            .iter()
            .any(|layer| self.tiles.contains_key(&TileKey::new(x, y, *layer)))
    }

    pub fn get(&self, x: i32, y: i32, layer: TileLayer) -> Option<&Tile> {
        self.tiles.get(&TileKey::new(x, y, layer))
    }

    /// Insert or replace a tile. The tile's `pos` is forced to match
    /// the key so the two can never disagree.
    pub fn set(&mut self, x: i32, y: i32, layer: TileLayer, tile_id: impl Into<String>) {
        self.tiles.insert(
            TileKey::new(x, y, layer),
            Tile {
                tile_id: tile_id.into(),
                pos: (x, y),
            },
        );
    }

    /// Re-id a physics tile in place (trap priming). Returns false if
    /// no tile is there.
    pub fn mutate(&mut self, x: i32, y: i32, tile_id: impl Into<String>) -> bool {
        match self.tiles.get_mut(&TileKey::new(x, y, TileLayer::Physics)) {
            Some(tile) => {
                tile.tile_id = tile_id.into();
                true
            }
            None => false,
        }
    }

    /// The solid physics tile containing `pos`, if any.
    pub fn solid_at(&self, pos: Vec2) -> Option<&Tile> {
        let (x, y) = self.tile_coord(pos);
        self.get(x, y, TileLayer::Physics)
            .filter(|tile| self.solid_ids.contains(&tile.tile_id))
    }

    /// Physics tiles in the 3x3 neighborhood around `pos`.
    pub fn tiles_around(&self, pos: Vec2) -> Vec<&Tile> {
        let (tx, ty) = self.tile_coord(pos);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|(dx, dy)| self.get(tx + dx, ty + dy, TileLayer::Physics))
            .collect()
    }

    /// Pixel rects of the solid tiles in the 3x3 neighborhood around
    /// `pos`. This is the narrow phase the collision sweep tests against.
    pub fn solid_rects_around(&self, pos: Vec2) -> Vec<Rect> {
        let ts = self.tile_size as f32;
        self.tiles_around(pos)
            .into_iter()
            .filter(|tile| self.solid_ids.contains(&tile.tile_id))
            .map(|tile| Rect::new(tile.pos.0 as f32 * ts, tile.pos.1 as f32 * ts, ts, ts))
            .collect()
    }

    /// Whether a tile id collides.
    pub fn is_solid_id(&self, tile_id: &str) -> bool {
        self.solid_ids.contains(tile_id)
    }

    /// Replace the solid set (level files may declare one explicitly).
    pub fn set_solid_ids(&mut self, ids: impl IntoIterator<Item = String>) {
        self.solid_ids = ids.into_iter().collect();
    }

    /// Default solid set: every id present on the physics layer right
    /// now. Called once at load, never during play.
    pub fn seed_solid_ids_from_physics_layer(&mut self) {
        let ids: HashSet<String> = self
            .tiles
            .iter()
            .filter(|(key, _)| key.layer == TileLayer::Physics)
            .map(|(_, tile)| tile.tile_id.clone())
            .collect();
        self.solid_ids = ids;
    }

    pub fn solid_ids(&self) -> &HashSet<String> {
        &self.solid_ids
    }

    /// All tiles with their keys (serialization, debugging).
    pub fn iter(&self) -> impl Iterator<Item = (&TileKey, &Tile)> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Export to the string-keyed map the level/save JSON stores.
    pub fn to_keyed_map(&self) -> HashMap<String, Tile> {
        self.tiles
            .iter()
            .map(|(key, tile)| (key.to_keyed_string(), tile.clone()))
            .collect()
    }

    /// Rebuild tile storage from a string-keyed map. Keys that fail to
    /// parse are reported back to the caller for a validation error.
    pub fn load_keyed_map(&mut self, map: HashMap<String, Tile>) -> Result<(), String> {
        let mut tiles = HashMap::with_capacity(map.len());
        for (raw_key, mut tile) in map {
            let key = TileKey::parse(&raw_key).ok_or_else(|| format!("bad tile key {:?}", raw_key))?;
            tile.pos = (key.x, key.y);
            tiles.insert(key, tile);
        }
        self.tiles = tiles;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    fn map_with_floor() -> Tilemap {
        let mut map = Tilemap::new(16);
        for x in -2..=2 {
            map.set(x, 1, TileLayer::Physics, "1");
        }
        map.seed_solid_ids_from_physics_layer();
        map
    }

    #[test]
    fn test_layers_are_independent() {
        let mut map = Tilemap::new(16);
        map.set(0, 0, TileLayer::Physics, "1");
        map.set(0, 0, TileLayer::Background, "2");
        map.set(0, 0, TileLayer::Decor, "3");

        assert_eq!(map.get(0, 0, TileLayer::Physics).unwrap().tile_id, "1");
        assert_eq!(map.get(0, 0, TileLayer::Background).unwrap().tile_id, "2");
        assert_eq!(map.get(0, 0, TileLayer::Decor).unwrap().tile_id, "3");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_exists_checks_all_layers() {
        let mut map = Tilemap::new(16);
        assert!(!map.exists(4, 4));
        map.set(4, 4, TileLayer::Decor, "7");
        assert!(map.exists(4, 4));
    }

    #[test]
    fn test_solid_at_floor_division_negative_coords() {
        let mut map = Tilemap::new(16);
        map.set(-1, -1, TileLayer::Physics, "1");
        map.seed_solid_ids_from_physics_layer();

        // (-0.5, -0.5) lives in tile (-1, -1), not (0, 0)
        assert!(map.solid_at(vec2(-0.5, -0.5)).is_some());
        assert!(map.solid_at(vec2(0.5, 0.5)).is_none());
    }

    #[test]
    fn test_solid_at_respects_solid_set() {
        let mut map = Tilemap::new(16);
        map.set(0, 0, TileLayer::Physics, "1");
        map.set(1, 0, TileLayer::Physics, "99");
        map.set_solid_ids(["1".to_string()]);

        assert!(map.solid_at(vec2(8.0, 8.0)).is_some());
        // Present on the physics layer but not in the solid set
        assert!(map.solid_at(vec2(24.0, 8.0)).is_none());
    }

    #[test]
    fn test_solid_rects_around_neighborhood_only() {
        let map = map_with_floor();
        let rects = map.solid_rects_around(vec2(8.0, 8.0));

        // Player at tile (0,0): floor tiles at (-1..=1, 1) are in the
        // 3x3 neighborhood, (-2,1) and (2,1) are not.
        assert_eq!(rects.len(), 3);
        assert!(rects.contains(&Rect::new(-16.0, 16.0, 16.0, 16.0)));
        assert!(!rects.contains(&Rect::new(-32.0, 16.0, 16.0, 16.0)));
    }

    #[test]
    fn test_mutate_re_ids_in_place() {
        let mut map = map_with_floor();
        assert!(map.mutate(0, 1, "40"));
        assert_eq!(map.get(0, 1, TileLayer::Physics).unwrap().tile_id, "40");
        assert!(!map.mutate(9, 9, "40"));
    }

    #[test]
    fn test_keyed_map_round_trip() {
        let mut map = Tilemap::new(16);
        map.set(-3, 7, TileLayer::Physics, "5");
        map.set(2, -4, TileLayer::Background, "16");

        let keyed = map.to_keyed_map();
        assert!(keyed.contains_key("-3;7"));
        assert!(keyed.contains_key("2|-4"));

        let mut restored = Tilemap::new(16);
        restored.load_keyed_map(keyed).unwrap();
        assert_eq!(restored.get(-3, 7, TileLayer::Physics).unwrap().tile_id, "5");
        assert_eq!(restored.get(2, -4, TileLayer::Background).unwrap().tile_id, "16");
    }

    #[test]
    fn test_keyed_map_rejects_garbage() {
        let mut map = Tilemap::new(16);
        let mut keyed = HashMap::new();
        keyed.insert(
            "nonsense".to_string(),
            Tile {
                tile_id: "1".to_string(),
                pos: (0, 0),
            },
        );
        assert!(map.load_keyed_map(keyed).is_err());
    }

    #[test]
    fn test_parse_negative_key() {
        let key = TileKey::parse("-12;-7").unwrap();
        assert_eq!((key.x, key.y), (-12, -7));
        assert_eq!(key.layer, TileLayer::Physics);
        assert_eq!(key.to_keyed_string(), "-12;-7");
    }
}
