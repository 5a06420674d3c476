//! Player state machine
//!
//! The one controllable entity. Composes a [`PhysicsBody`] and layers
//! jump charges, dashing, wall slides, landing recovery, edge
//! detection, hazard death, and trap springing on top of the collision
//! resolver's output.
//!
//! Tick order is fixed: collision resolution, then contact/hazard
//! probing, then trap propagation, then state evaluation, then
//! horizontal velocity easing. State priority is death, dash,
//! collision flags, air time, movement intent.

use macroquad::math::{vec2, Vec2};

use super::collision;
use super::entity::PhysicsBody;
use super::events::{DashEvent, DeathEvent, Events, JumpEvent, LandEvent, TrapSprungEvent};
use crate::world::{Tile, TileLayer, Tilemap};

/// Player bounding box in pixels
pub const PLAYER_SIZE: Vec2 = vec2(8.0, 15.0);
/// Horizontal speed cap and per-tick easing step
pub const MOVE_SPEED: f32 = 0.1;
/// Upward velocity of a ground jump
pub const JUMP_VELOCITY: f32 = -3.0;
/// Upward velocity of a wall jump
pub const WALL_JUMP_VELOCITY: f32 = -2.5;
/// Horizontal impulse away from the wall on a wall jump
pub const WALL_JUMP_KICK: f32 = 3.5;
/// Downward velocity cap while wall sliding
pub const WALL_SLIDE_MAX_FALL: f32 = 0.5;
/// Falling faster than this switches the action to Fall
pub const FALL_ACTION_THRESHOLD: f32 = 0.5;
/// Air time above which airborne actions replace ground actions.
/// Doubles as a few ticks of tolerance when stepping off small bumps.
pub const AIRBORNE_ACTION_TICKS: u32 = 4;
/// Landing recovery: ticks the Land action holds
pub const LAND_TICKS: u32 = 10;
/// Dash length in ticks
pub const DASH_DURATION: u32 = 20;
/// Horizontal speed while dashing
pub const DASH_SPEED: f32 = 3.0;
/// Vertical velocity pin while dashing (slight droop, no gravity build)
pub const DASH_DROOP: f32 = 0.3;
/// Upward velocity at or beyond which a trap springs under the player
pub const TRAP_SPRING_VELOCITY: f32 = -2.5;

/// Tile ids that kill on contact
pub const DEATH_TILE_IDS: [&str; 2] = ["32", "40"];
/// A primed trap: springs when left or launched off
pub const TRAP_TILE_ID: &str = "38";
/// What a sprung trap becomes (lethal)
pub const TRIGGERED_TILE_ID: &str = "40";
/// Danger-spike tile spawned around a sprung trap (background layer)
pub const SPIKE_TILE_ID: &str = "16";

/// Spawn directions for trap spikes with their draw rotation in
/// degrees: up, down, right, left.
const SPIKE_DIRECTIONS: [(i32, i32, f32); 4] =
    [(0, -1, 0.0), (0, 1, 180.0), (1, 0, 270.0), (-1, 0, 90.0)];

/// The player's discrete behavior state, mapped 1:1 to animation clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Idle,
    /// Standing still with a foot over the void
    EdgeIdle,
    Run,
    Jump,
    Fall,
    WallSlide,
    /// Landing recovery, holds for [`LAND_TICKS`]
    Land,
    Dash,
    /// Terminal until respawn
    Death,
}

/// The controllable entity.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: PhysicsBody,
    pub action: Action,
    /// Ticks since last ground contact
    pub air_time: u32,
    pub jumps_remaining: u32,
    pub dashing: bool,
    pub dash_timer: u32,
    pub land_timer: u32,
    pub was_falling: bool,
    pub wall_sliding: bool,
    pub on_edge: bool,
    pub dead: bool,
    /// Solid tile currently pressed against, from the per-side probe.
    /// Kept across airborne ticks (no contact means no reassignment),
    /// which is what lets a trap spring after the player jumps off it.
    pub contact_tile: Option<Tile>,
    /// Contact tile from the previous tick; trap springing compares
    /// against this to detect "just left the tile".
    last_trap_tile: Option<Tile>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: PhysicsBody::new(pos, PLAYER_SIZE),
            action: Action::Idle,
            air_time: 0,
            jumps_remaining: 1,
            dashing: false,
            dash_timer: 0,
            land_timer: 0,
            was_falling: false,
            wall_sliding: false,
            on_edge: false,
            dead: false,
            contact_tile: None,
            last_trap_tile: None,
        }
    }

    /// Advance one simulation tick.
    ///
    /// `movement` is the horizontal intent in {-1, 0, 1} (y unused by
    /// input, kept as a vector for the resolver). The tilemap is
    /// mutable because springing a trap rewrites tiles in place.
    pub fn update(&mut self, tilemap: &mut Tilemap, movement: Vec2, events: &mut Events) {
        if self.dead {
            // Corpse keeps physics (falls, settles) but no state logic.
            collision::resolve(&mut self.body, tilemap, Vec2::ZERO);
            return;
        }

        collision::resolve(&mut self.body, tilemap, movement);
        self.air_time += 1;

        if self.probe_contacts(tilemap, events) {
            return; // died this tick
        }
        self.spring_trap(tilemap, events);
        self.last_trap_tile = self.contact_tile.clone();

        if self.dashing {
            self.dash_timer = self.dash_timer.saturating_sub(1);
            self.body.velocity.x = DASH_SPEED * if self.body.flip { -1.0 } else { 1.0 };
            self.body.velocity.y = DASH_DROOP;
            self.action = Action::Dash;
            if self.dash_timer == 0 {
                self.dashing = false;
                self.body.velocity.x = 0.0;
            }
            return;
        }

        if self.action == Action::Land && self.land_timer > 0 {
            self.land_timer -= 1;
        }

        if self.body.collisions.down {
            if self.was_falling {
                self.action = Action::Land;
                self.was_falling = false;
                self.land_timer = LAND_TICKS;
                events.land.send(LandEvent {
                    pos: self.body.pos + vec2(self.body.size.x * 0.5, self.body.size.y),
                });
            }
            self.air_time = 0;
            self.jumps_remaining = 1;
        } else if self.body.velocity.y > FALL_ACTION_THRESHOLD {
            self.was_falling = true;
            self.action = Action::Fall;
        }

        self.wall_sliding =
            self.body.collisions.any_horizontal() && self.air_time > AIRBORNE_ACTION_TICKS;
        if self.wall_sliding {
            self.body.velocity.y = self.body.velocity.y.min(WALL_SLIDE_MAX_FALL);
            // Face the wall being pressed
            self.body.flip = self.body.collisions.left;
            self.action = Action::WallSlide;
        }

        if self.body.collisions.down && movement.x == 0.0 {
            self.on_edge = !self.fully_supported(tilemap);
        }

        if !self.wall_sliding && self.land_timer == 0 {
            if self.air_time > AIRBORNE_ACTION_TICKS {
                self.action = if self.was_falling {
                    Action::Fall
                } else {
                    Action::Jump
                };
            } else if movement.x != 0.0 {
                self.action = Action::Run;
                self.on_edge = false;
            } else {
                self.action = if self.on_edge {
                    Action::EdgeIdle
                } else {
                    Action::Idle
                };
            }
        }

        // Horizontal easing: accelerate toward the cap under intent,
        // decay toward zero without it.
        let vx = self.body.velocity.x;
        self.body.velocity.x = if movement.x > 0.0 {
            MOVE_SPEED.min(vx + MOVE_SPEED)
        } else if movement.x < 0.0 {
            (-MOVE_SPEED).max(vx - MOVE_SPEED)
        } else if vx > 0.0 {
            (vx - 0.1).max(0.0)
        } else {
            (vx + 0.1).min(0.0)
        };
    }

    /// Probe one pixel past each colliding face, remember the solid
    /// tile found, and die on hazard ids. Returns true on death.
    fn probe_contacts(&mut self, tilemap: &Tilemap, events: &mut Events) -> bool {
        let probes = [
            (
                self.body.collisions.down,
                self.body.pos + vec2(0.0, self.body.size.y),
            ),
            (self.body.collisions.up, self.body.pos + vec2(0.0, -1.0)),
            (self.body.collisions.left, self.body.pos + vec2(-1.0, 0.0)),
            (
                self.body.collisions.right,
                self.body.pos + vec2(self.body.size.x, 0.0),
            ),
        ];
        for (hit, probe_pos) in probes {
            if !hit {
                continue;
            }
            self.contact_tile = tilemap.solid_at(probe_pos).cloned();
            if let Some(tile) = &self.contact_tile {
                if DEATH_TILE_IDS.contains(&tile.tile_id.as_str()) {
                    self.dead = true;
                    self.action = Action::Death;
                    events.death.send(DeathEvent { pos: self.body.pos });
                    return true;
                }
            }
        }
        false
    }

    /// Spring the trap tile the player just left (or launched off).
    /// Re-ids it to the lethal form and rings it with spike tiles on
    /// every free neighboring coordinate. One-shot per edge: occupancy
    /// is checked before each insertion, so re-running on the same
    /// state does nothing.
    fn spring_trap(&mut self, tilemap: &mut Tilemap, events: &mut Events) {
        let Some(last) = self.last_trap_tile.clone() else {
            return;
        };
        if last.tile_id != TRAP_TILE_ID {
            return;
        }
        let left_it = self.contact_tile.as_ref() != Some(&last);
        let launched = self.body.velocity.y <= TRAP_SPRING_VELOCITY;
        if !left_it && !launched {
            return;
        }

        let (tx, ty) = last.pos;
        tilemap.mutate(tx, ty, TRIGGERED_TILE_ID);
        // Keep the cached contact in sync with the mutation so the
        // spring cannot re-fire from a stale id next tick.
        if let Some(contact) = &mut self.contact_tile {
            if contact.pos == (tx, ty) {
                contact.tile_id = TRIGGERED_TILE_ID.to_string();
            }
        }

        for (dx, dy, angle) in SPIKE_DIRECTIONS {
            let (nx, ny) = (tx + dx, ty + dy);
            if !tilemap.exists(nx, ny) {
                tilemap.set(nx, ny, TileLayer::Background, SPIKE_TILE_ID);
                tilemap.rotations.insert((nx, ny), angle);
                events.trap_sprung.send(TrapSprungEvent {
                    tile_pos: (nx, ny),
                    angle,
                });
            }
        }
    }

    /// Both bottom corners supported one pixel below the feet?
    fn fully_supported(&self, tilemap: &Tilemap) -> bool {
        let below = self.body.size.y + 1.0;
        let left_point = self.body.pos + vec2(0.0, below);
        let right_point = self.body.pos + vec2(self.body.size.x, below);
        let rects = tilemap.solid_rects_around(self.body.pos);
        let left_has = rects.iter().any(|r| r.contains(left_point));
        let right_has = rects.iter().any(|r| r.contains(right_point));
        left_has && right_has
    }

    /// Try to jump. `power_bonus` is added to the launch velocity
    /// (negative is stronger); `allow_air` lets a double-jump buff
    /// bypass the grounded requirement. Returns false as a silent
    /// no-op when blocked.
    pub fn jump(&mut self, power_bonus: f32, allow_air: bool, events: &mut Events) -> bool {
        if self.dead || self.dashing {
            return false;
        }

        if self.wall_sliding {
            // Requires holding toward the wall; the kick goes outward.
            let into_wall = (self.body.flip && self.body.last_movement.x < 0.0)
                || (!self.body.flip && self.body.last_movement.x > 0.0);
            if into_wall {
                self.body.velocity.x = WALL_JUMP_KICK * if self.body.flip { 1.0 } else { -1.0 };
                self.body.velocity.y = WALL_JUMP_VELOCITY + power_bonus;
                self.air_time = AIRBORNE_ACTION_TICKS + 1;
                self.jumps_remaining = self.jumps_remaining.saturating_sub(1);
                events.jump.send(JumpEvent { wall_jump: true });
                return true;
            }
            return false;
        }

        let grounded_action = matches!(
            self.action,
            Action::Idle | Action::EdgeIdle | Action::Run | Action::Land
        );
        if self.jumps_remaining > 0 && grounded_action {
            self.body.velocity.y = JUMP_VELOCITY + power_bonus;
            self.jumps_remaining -= 1;
            self.air_time = AIRBORNE_ACTION_TICKS + 1;
            events.jump.send(JumpEvent { wall_jump: false });
            return true;
        }

        // Double-jump buff: one extra launch while airborne
        if allow_air && !self.body.collisions.down {
            self.body.velocity.y = JUMP_VELOCITY + power_bonus;
            self.air_time = AIRBORNE_ACTION_TICKS + 1;
            events.jump.send(JumpEvent { wall_jump: false });
            return true;
        }

        false
    }

    /// Start a dash in the facing direction. Always succeeds while
    /// alive; cooldown gating is the skill UI's job.
    pub fn dash(&mut self, events: &mut Events) -> bool {
        if self.dead {
            return false;
        }
        self.dashing = true;
        self.dash_timer = DASH_DURATION;
        self.body.velocity.x = DASH_SPEED * if self.body.flip { -1.0 } else { 1.0 };
        self.action = Action::Dash;
        events.dash.send(DashEvent);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: f32 = 16.0;

    /// Floor at tile row 2 for x in `xs`, solid id "1".
    fn floor_map(xs: std::ops::RangeInclusive<i32>) -> Tilemap {
        let mut map = Tilemap::new(16);
        for x in xs {
            map.set(x, 2, TileLayer::Physics, "1");
        }
        map.seed_solid_ids_from_physics_layer();
        map
    }

    /// Player standing flush on the row-2 floor.
    fn grounded_player() -> Player {
        Player::new(vec2(4.0, 2.0 * TILE - PLAYER_SIZE.y))
    }

    /// Run `n` idle ticks.
    fn settle(player: &mut Player, map: &mut Tilemap, events: &mut Events, n: u32) {
        for _ in 0..n {
            player.update(map, Vec2::ZERO, events);
        }
    }

    #[test]
    fn test_standing_still_is_idle_and_grounded() {
        let mut map = floor_map(-4..=4);
        let mut player = grounded_player();
        let mut events = Events::new();

        settle(&mut player, &mut map, &mut events, 5);
        assert!(player.body.collisions.down);
        assert_eq!(player.body.velocity.y, 0.0);
        assert_eq!(player.action, Action::Idle);
        assert_eq!(player.air_time, 0);
    }

    #[test]
    fn test_walking_off_ledge_counts_air_time_then_falls() {
        let mut map = floor_map(-1..=1);
        let mut player = grounded_player();
        let mut events = Events::new();

        // Walk right until past the floor edge (floor ends at x = 32)
        for _ in 0..300 {
            player.update(&mut map, vec2(1.0, 0.0), &mut events);
            if !player.body.collisions.down {
                break;
            }
        }
        assert!(!player.body.collisions.down);

        let mut last_air = player.air_time;
        let mut became_fall = false;
        for _ in 0..30 {
            player.update(&mut map, Vec2::ZERO, &mut events);
            assert_eq!(player.air_time, last_air + 1, "air_time must be monotonic");
            last_air = player.air_time;
            if player.body.velocity.y > FALL_ACTION_THRESHOLD {
                became_fall = true;
                assert_eq!(player.action, Action::Fall);
            }
        }
        assert!(became_fall);
        assert!(player.was_falling);
    }

    #[test]
    fn test_land_holds_ten_ticks_then_idle() {
        let mut map = floor_map(-4..=4);
        // Drop from two tiles up
        let mut player = Player::new(vec2(4.0, 0.0));
        let mut events = Events::new();

        // Fall until touchdown
        for _ in 0..300 {
            player.update(&mut map, Vec2::ZERO, &mut events);
            if player.action == Action::Land {
                break;
            }
        }
        assert_eq!(player.action, Action::Land);
        assert_eq!(events.land.len(), 1);
        assert!(!player.was_falling);

        // Land persists for the recovery window...
        for _ in 0..9 {
            player.update(&mut map, Vec2::ZERO, &mut events);
            assert_eq!(player.action, Action::Land);
        }
        // ...then ground state re-evaluates
        player.update(&mut map, Vec2::ZERO, &mut events);
        assert_eq!(player.action, Action::Idle);
        // Touchdown fired exactly once
        assert_eq!(events.land.len(), 1);
    }

    #[test]
    fn test_edge_idle_when_foot_over_void() {
        let mut map = floor_map(0..=0);
        // Right foot hangs past the single floor tile (0..16)
        let mut player = Player::new(vec2(12.0, 2.0 * TILE - PLAYER_SIZE.y));
        let mut events = Events::new();

        settle(&mut player, &mut map, &mut events, 3);
        assert!(player.body.collisions.down);
        assert!(player.on_edge);
        assert_eq!(player.action, Action::EdgeIdle);

        // Centered over the tile: fully supported again
        let mut centered = Player::new(vec2(4.0, 2.0 * TILE - PLAYER_SIZE.y));
        settle(&mut centered, &mut map, &mut events, 3);
        assert!(!centered.on_edge);
        assert_eq!(centered.action, Action::Idle);
    }

    #[test]
    fn test_wall_slide_caps_fall_and_faces_wall() {
        let mut map = Tilemap::new(16);
        // Tall wall at tile x = 1, open fall shaft
        for y in -2..=8 {
            map.set(1, y, TileLayer::Physics, "1");
        }
        map.seed_solid_ids_from_physics_layer();

        let mut player = Player::new(vec2(6.0, 0.0));
        let mut events = Events::new();

        let mut slid = false;
        for _ in 0..40 {
            player.update(&mut map, vec2(1.0, 0.0), &mut events);
            if player.wall_sliding {
                slid = true;
                assert_eq!(player.action, Action::WallSlide);
                assert!(player.body.velocity.y <= WALL_SLIDE_MAX_FALL);
                // Pressing the wall on the right: face right
                assert!(!player.body.flip);
            }
        }
        assert!(slid);
    }

    #[test]
    fn test_jump_consumes_charge_and_blocks_second() {
        let mut map = floor_map(-4..=4);
        let mut player = grounded_player();
        let mut events = Events::new();
        settle(&mut player, &mut map, &mut events, 2);

        assert_eq!(player.jumps_remaining, 1);
        assert!(player.jump(0.0, false, &mut events));
        assert_eq!(player.jumps_remaining, 0);
        assert_eq!(player.body.velocity.y, JUMP_VELOCITY);

        // Get properly airborne
        for _ in 0..6 {
            player.update(&mut map, Vec2::ZERO, &mut events);
        }
        assert!(!player.body.collisions.down);
        // Second jump is a silent no-op without the buff...
        assert!(!player.jump(0.0, false, &mut events));
        // ...and succeeds with it
        assert!(player.jump(-1.15, true, &mut events));
        assert_eq!(player.body.velocity.y, JUMP_VELOCITY - 1.15);
        assert_eq!(events.jump.len(), 2);
    }

    #[test]
    fn test_landing_restores_jump_charge() {
        let mut map = floor_map(-4..=4);
        let mut player = grounded_player();
        let mut events = Events::new();
        settle(&mut player, &mut map, &mut events, 2);

        assert!(player.jump(0.0, false, &mut events));
        for _ in 0..300 {
            player.update(&mut map, Vec2::ZERO, &mut events);
            if player.body.collisions.down {
                break;
            }
        }
        settle(&mut player, &mut map, &mut events, 1);
        assert_eq!(player.jumps_remaining, 1);
    }

    #[test]
    fn test_wall_jump_needs_push_into_wall() {
        let mut map = Tilemap::new(16);
        for y in -2..=8 {
            map.set(1, y, TileLayer::Physics, "1");
        }
        map.seed_solid_ids_from_physics_layer();

        let mut player = Player::new(vec2(6.0, 0.0));
        let mut events = Events::new();

        // Slide against the right-hand wall
        for _ in 0..12 {
            player.update(&mut map, vec2(1.0, 0.0), &mut events);
        }
        assert!(player.wall_sliding);

        // Last intent pushed toward the wall: jump kicks outward
        assert!(player.jump(0.0, false, &mut events));
        assert_eq!(player.body.velocity.x, -WALL_JUMP_KICK);
        assert_eq!(player.body.velocity.y, WALL_JUMP_VELOCITY);

        // Re-slide with neutral input: no wall jump
        let mut player2 = Player::new(vec2(6.0, 0.0));
        for _ in 0..12 {
            player2.update(&mut map, vec2(1.0, 0.0), &mut events);
        }
        player2.update(&mut map, Vec2::ZERO, &mut events);
        if player2.wall_sliding {
            assert!(!player2.jump(0.0, false, &mut events));
        }
    }

    #[test]
    fn test_dash_freezes_velocity_then_resets() {
        let mut map = floor_map(-8..=8);
        let mut player = grounded_player();
        let mut events = Events::new();
        settle(&mut player, &mut map, &mut events, 2);

        assert!(player.dash(&mut events));
        assert_eq!(player.body.velocity.x, DASH_SPEED);

        for tick in 1..=DASH_DURATION {
            player.update(&mut map, Vec2::ZERO, &mut events);
            if tick < DASH_DURATION {
                assert!(player.dashing);
                assert_eq!(player.body.velocity.x, DASH_SPEED);
                assert_eq!(player.action, Action::Dash);
            }
        }
        assert!(!player.dashing);
        assert_eq!(player.body.velocity.x, 0.0);
        assert_eq!(events.dash.len(), 1);
    }

    #[test]
    fn test_hazard_contact_kills_exactly_once() {
        let mut map = floor_map(-4..=4);
        // Lethal tile in the walking path
        map.set(2, 2, TileLayer::Physics, "32");
        let mut ids: Vec<String> = map.solid_ids().iter().cloned().collect();
        ids.push("32".to_string());
        map.set_solid_ids(ids);

        let mut player = grounded_player();
        let mut events = Events::new();

        for _ in 0..600 {
            player.update(&mut map, vec2(1.0, 0.0), &mut events);
            if player.dead {
                break;
            }
        }
        assert!(player.dead);
        assert_eq!(player.action, Action::Death);
        assert_eq!(events.death.len(), 1);

        // Further ticks keep physics but never re-trigger death
        for _ in 0..20 {
            player.update(&mut map, vec2(1.0, 0.0), &mut events);
        }
        assert_eq!(events.death.len(), 1);
    }

    #[test]
    fn test_trap_springs_when_left_and_spawns_spikes() {
        let mut map = floor_map(-4..=4);
        map.set(0, 2, TileLayer::Physics, TRAP_TILE_ID);
        map.seed_solid_ids_from_physics_layer();

        let mut player = grounded_player();
        let mut events = Events::new();
        // Stand on the trap so the contact probe records it
        settle(&mut player, &mut map, &mut events, 3);
        assert_eq!(
            player.contact_tile.as_ref().map(|t| t.tile_id.as_str()),
            Some(TRAP_TILE_ID)
        );

        // Walk off to the right; spring fires on the contact change
        for _ in 0..600 {
            player.update(&mut map, vec2(1.0, 0.0), &mut events);
            if map.get(0, 2, TileLayer::Physics).unwrap().tile_id == TRIGGERED_TILE_ID {
                break;
            }
        }
        assert_eq!(
            map.get(0, 2, TileLayer::Physics).unwrap().tile_id,
            TRIGGERED_TILE_ID
        );

        // Spikes only on previously-free coordinates: (0,1) above and
        // (0,3) below are free; (1,2) and (-1,2) hold floor tiles.
        assert_eq!(
            map.get(0, 1, TileLayer::Background).unwrap().tile_id,
            SPIKE_TILE_ID
        );
        assert_eq!(
            map.get(0, 3, TileLayer::Background).unwrap().tile_id,
            SPIKE_TILE_ID
        );
        assert!(map.get(1, 2, TileLayer::Background).is_none());
        assert!(map.get(-1, 2, TileLayer::Background).is_none());
        assert_eq!(events.trap_sprung.len(), 2);
        assert_eq!(map.rotations.get(&(0, 1)), Some(&0.0));
        assert_eq!(map.rotations.get(&(0, 3)), Some(&180.0));
    }

    #[test]
    fn test_trap_springs_on_strong_launch() {
        let mut map = floor_map(-4..=4);
        map.set(0, 2, TileLayer::Physics, TRAP_TILE_ID);
        map.seed_solid_ids_from_physics_layer();

        let mut player = grounded_player();
        let mut events = Events::new();
        settle(&mut player, &mut map, &mut events, 3);

        // Ground jump launches at -3.0, past the -2.5 threshold
        assert!(player.jump(0.0, false, &mut events));
        player.update(&mut map, Vec2::ZERO, &mut events);

        assert_eq!(
            map.get(0, 2, TileLayer::Physics).unwrap().tile_id,
            TRIGGERED_TILE_ID
        );
        let first_count = events.trap_sprung.len();
        assert!(first_count >= 1);

        // Re-running on the same state adds nothing
        player.update(&mut map, Vec2::ZERO, &mut events);
        assert_eq!(events.trap_sprung.len(), first_count);
    }
}
