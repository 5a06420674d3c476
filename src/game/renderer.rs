//! Game renderer
//!
//! Draws the tile layers and the player sprite from simulation state;
//! never mutates it. Textures are optional on purpose: with assets
//! missing everything still renders as flat-colored quads, which keeps
//! the game runnable from a bare checkout.

use macroquad::prelude::*;

use super::animation::Animation;
use super::player::Player;
use crate::world::{TileLayer, Tilemap};

/// Sprite strips are padded 3px around the body box, like the source art.
const ANIM_OFFSET: Vec2 = vec2(-3.0, -1.0);

/// A tileset texture sliced into fixed-size cells, addressed by the
/// numeric tile id strings the grid stores.
pub struct Tileset {
    texture: Option<Texture2D>,
    pub tile_size: f32,
    columns: u32,
}

impl Tileset {
    /// Load a tileset image. A missing file is tolerated; tiles then
    /// draw as flat quads colored by id.
    pub async fn load(path: &str, tile_size: f32) -> Self {
        let texture = match load_texture(path).await {
            Ok(tex) => {
                tex.set_filter(FilterMode::Nearest);
                Some(tex)
            }
            Err(e) => {
                eprintln!("Warning: tileset {} not loaded ({}), using flat colors", path, e);
                None
            }
        };
        let columns = texture
            .as_ref()
            .map(|t| (t.width() / tile_size).max(1.0) as u32)
            .unwrap_or(1);
        Self {
            texture,
            tile_size,
            columns,
        }
    }

    /// Source cell for a tile id, if the id is numeric and a texture
    /// is present.
    fn source_rect(&self, tile_id: &str) -> Option<Rect> {
        let index: u32 = tile_id.parse().ok()?;
        self.texture.as_ref()?;
        let col = index % self.columns;
        let row = index / self.columns;
        Some(Rect::new(
            col as f32 * self.tile_size,
            row as f32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        ))
    }

    /// Stable fallback color derived from the id.
    fn fallback_color(tile_id: &str) -> Color {
        let hash = tile_id
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        let channel = |shift: u32| 0.25 + ((hash >> shift) & 0x3f) as f32 / 96.0;
        Color::new(channel(0), channel(6), channel(12), 1.0)
    }

    /// Draw one tile at a screen position, optionally rotated
    /// (degrees, spawned danger spikes use this).
    pub fn draw_tile(&self, tile_id: &str, dest: Vec2, rotation_deg: f32) {
        match (&self.texture, self.source_rect(tile_id)) {
            (Some(texture), Some(source)) => {
                draw_texture_ex(
                    texture,
                    dest.x,
                    dest.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(self.tile_size, self.tile_size)),
                        source: Some(source),
                        rotation: rotation_deg.to_radians(),
                        ..Default::default()
                    },
                );
            }
            _ => {
                draw_rectangle(
                    dest.x,
                    dest.y,
                    self.tile_size,
                    self.tile_size,
                    Self::fallback_color(tile_id),
                );
            }
        }
    }
}

/// Draw one layer of the grid, culled to the visible tile range.
pub fn draw_layer(
    map: &Tilemap,
    layer: TileLayer,
    tileset: &Tileset,
    offset: Vec2,
    view: Vec2,
) {
    let ts = map.tile_size as f32;
    let x0 = (offset.x / ts).floor() as i32;
    let x1 = ((offset.x + view.x) / ts).floor() as i32 + 1;
    let y0 = (offset.y / ts).floor() as i32;
    let y1 = ((offset.y + view.y) / ts).floor() as i32 + 1;

    for x in x0..=x1 {
        for y in y0..=y1 {
            if let Some(tile) = map.get(x, y, layer) {
                let rotation = map
                    .rotations
                    .get(&(x, y))
                    .copied()
                    .filter(|_| layer == TileLayer::Background)
                    .unwrap_or(0.0);
                let dest = vec2(x as f32 * ts - offset.x, y as f32 * ts - offset.y);
                tileset.draw_tile(&tile.tile_id, dest, rotation);
            }
        }
    }
}

/// Animation strips for the player, one per action.
pub struct PlayerSprites {
    strips: std::collections::HashMap<super::player::Action, Texture2D>,
    /// Frame cell size within a strip
    pub frame_size: Vec2,
}

impl PlayerSprites {
    /// Load whatever strips exist under `dir`; missing ones fall back
    /// to a flat quad at draw time.
    pub async fn load(dir: &str) -> Self {
        use super::player::Action;
        let clips = [
            (Action::Idle, "idle"),
            (Action::EdgeIdle, "edge_idle"),
            (Action::Run, "run"),
            (Action::Jump, "jump"),
            (Action::Fall, "fall"),
            (Action::WallSlide, "wall_slide"),
            (Action::Land, "land"),
            (Action::Dash, "dash"),
            (Action::Death, "death"),
        ];
        let mut strips = std::collections::HashMap::new();
        for (action, name) in clips {
            let path = format!("{}/{}.png", dir, name);
            if let Ok(tex) = load_texture(&path).await {
                tex.set_filter(FilterMode::Nearest);
                strips.insert(action, tex);
            }
        }
        if strips.is_empty() {
            eprintln!("Warning: no player sprites under {}, drawing placeholder", dir);
        }
        Self {
            strips,
            frame_size: vec2(14.0, 17.0),
        }
    }

    /// Draw the player at its world position relative to `offset`.
    pub fn draw(&self, player: &Player, clip: &Animation, offset: Vec2) {
        let dest = player.body.pos - offset + ANIM_OFFSET;
        match self.strips.get(&player.action) {
            Some(texture) => {
                let source = Rect::new(
                    clip.frame() as f32 * self.frame_size.x,
                    0.0,
                    self.frame_size.x,
                    self.frame_size.y,
                );
                draw_texture_ex(
                    texture,
                    dest.x,
                    dest.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(self.frame_size),
                        source: Some(source),
                        flip_x: player.body.flip,
                        ..Default::default()
                    },
                );
            }
            None => {
                draw_rectangle(
                    player.body.pos.x - offset.x,
                    player.body.pos.y - offset.y,
                    player.body.size.x,
                    player.body.size.y,
                    Color::new(0.9, 0.2, 0.2, 1.0),
                );
            }
        }
    }
}
