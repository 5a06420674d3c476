//! Collision resolution
//!
//! Axis-separated sweep of a body's bounding box against the solid
//! tiles around it. The X axis resolves first, then Y; each axis clamps
//! the box flush against the tile it hit and raises the matching flag.
//! When several tiles overlap in one axis pass the last one wins, which
//! is good enough for densely packed solid layouts.
//!
//! Gravity is applied here too, so a body that is resolved every tick
//! needs no other integrator. Diagonal tunneling at speeds above one
//! tile per tick is a known, accepted limitation.

use macroquad::math::{Rect, Vec2};

use super::entity::{CollisionFlags, PhysicsBody};
use crate::world::Tilemap;

/// Downward acceleration per tick
pub const GRAVITY: f32 = 0.1;
/// Cap on downward velocity
pub const TERMINAL_FALL_SPEED: f32 = 5.0;

/// Strict span overlap on the cross axis: a box clamped flush against
/// a surface shares an edge with it, and that flush contact must never
/// count as overlap on the *other* axis or a body sliding along the
/// floor would snag on every tile seam.
fn spans_overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    a0 < b1 && a1 > b0
}

/// Move `body` by `movement + velocity`, clamping against solid tiles.
///
/// Contact on the axis being resolved is inclusive on the leading
/// edge: a body already flush against a tile (because last tick's
/// clamp left it there) keeps its flag. Resting flush on a surface
/// with zero vertical motion still counts as ground contact, so a
/// standing body reports `down` and a zeroed vertical velocity every
/// tick, not every other tick.
///
/// Sets `body.collisions`, updates facing from the sign of horizontal
/// intent (zero leaves it unchanged), applies gravity, and zeroes
/// vertical velocity on any vertical contact. Returns the flags for
/// convenience; they are also stored on the body.
pub fn resolve(body: &mut PhysicsBody, tilemap: &Tilemap, movement: Vec2) -> CollisionFlags {
    let mut flags = CollisionFlags::NONE;
    let frame_movement = movement + body.velocity;

    // Horizontal pass
    body.pos.x += frame_movement.x;
    let mut rect = body.rect();
    for tile_rect in tilemap.solid_rects_around(body.pos) {
        if !spans_overlap(
            rect.y,
            rect.y + rect.h,
            tile_rect.y,
            tile_rect.y + tile_rect.h,
        ) {
            continue;
        }
        if frame_movement.x > 0.0
            && rect.x + rect.w >= tile_rect.x
            && rect.x < tile_rect.x + tile_rect.w
        {
            rect.x = tile_rect.x - rect.w;
            flags.right = true;
            body.pos.x = rect.x;
        } else if frame_movement.x < 0.0
            && rect.x <= tile_rect.x + tile_rect.w
            && rect.x + rect.w > tile_rect.x
        {
            rect.x = tile_rect.x + tile_rect.w;
            flags.left = true;
            body.pos.x = rect.x;
        }
    }

    // Vertical pass
    body.pos.y += frame_movement.y;
    let mut rect = body.rect();
    for tile_rect in tilemap.solid_rects_around(body.pos) {
        if !spans_overlap(
            rect.x,
            rect.x + rect.w,
            tile_rect.x,
            tile_rect.x + tile_rect.w,
        ) {
            continue;
        }
        if frame_movement.y > 0.0
            && rect.y + rect.h >= tile_rect.y
            && rect.y < tile_rect.y + tile_rect.h
        {
            rect.y = tile_rect.y - rect.h;
            flags.down = true;
            body.pos.y = rect.y;
        } else if frame_movement.y < 0.0
            && rect.y <= tile_rect.y + tile_rect.h
            && rect.y + rect.h > tile_rect.y
        {
            rect.y = tile_rect.y + tile_rect.h;
            flags.up = true;
            body.pos.y = rect.y;
        } else if frame_movement.y == 0.0 && rect.y + rect.h == tile_rect.y {
            // Resting flush: grounded without any motion to resolve
            flags.down = true;
        }
    }

    if movement.x > 0.0 {
        body.flip = false;
    }
    if movement.x < 0.0 {
        body.flip = true;
    }
    body.last_movement = movement;

    body.velocity.y = TERMINAL_FALL_SPEED.min(body.velocity.y + GRAVITY);
    if flags.down || flags.up {
        body.velocity.y = 0.0;
    }

    body.collisions = flags;
    flags
}
