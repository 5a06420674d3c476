//! Physics body
//!
//! The minimal state a thing needs to move through the tile world:
//! position, velocity, size, and the collision flags from the most
//! recent resolve. Plain value type - the player composes one of these
//! rather than inheriting from it, and the resolver mutates it exactly
//! once per tick.

use macroquad::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Which sides touched a solid tile during the last resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub const NONE: CollisionFlags = CollisionFlags {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn any_horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn any_vertical(&self) -> bool {
        self.up || self.down
    }
}

/// A movable axis-aligned box in the tile world.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    /// Top-left corner in world pixels
    pub pos: Vec2,
    /// Pixels per tick
    pub velocity: Vec2,
    /// Width and height in pixels
    pub size: Vec2,
    /// Result of the most recent collision resolve
    pub collisions: CollisionFlags,
    /// Sprite faces left when true. Set from movement intent only,
    /// so standing still keeps the last facing.
    pub flip: bool,
    /// Movement intent from the previous tick (wall jumps read it)
    pub last_movement: Vec2,
}

impl PhysicsBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            velocity: Vec2::ZERO,
            size,
            collisions: CollisionFlags::NONE,
            flip: false,
            last_movement: Vec2::ZERO,
        }
    }

    /// Bounding box at the current position.
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Center of the bounding box (camera target).
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    #[test]
    fn test_rect_tracks_position() {
        let mut body = PhysicsBody::new(vec2(10.0, 20.0), vec2(8.0, 15.0));
        assert_eq!(body.rect(), Rect::new(10.0, 20.0, 8.0, 15.0));

        body.pos.x += 5.0;
        assert_eq!(body.rect().x, 15.0);
        assert_eq!(body.center(), vec2(19.0, 27.5));
    }

    #[test]
    fn test_flag_helpers() {
        let mut flags = CollisionFlags::NONE;
        assert!(!flags.any_horizontal() && !flags.any_vertical());

        flags.left = true;
        flags.down = true;
        assert!(flags.any_horizontal());
        assert!(flags.any_vertical());
    }
}
