//! Particle system
//!
//! Cosmetic dust only, using a fixed-size pool: run scuffs kicked out
//! behind the feet, landing puffs pushed sideways, the odd fleck on a
//! jump, and shavings scraped off while wall sliding. Nothing here
//! feeds back into the simulation.

use macroquad::math::{vec2, Vec2};
use macroquad::prelude::{draw_rectangle, Color};
use macroquad::rand::gen_range;

use super::player::Player;

/// Maximum number of live particles
pub const MAX_PARTICLES: usize = 256;

/// Per-tick downward pull on drifting dust
const DUST_GRAVITY: f32 = 0.02;

/// A single particle in the pool
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World position in pixels
    pub pos: Vec2,
    /// Pixels per tick
    pub velocity: Vec2,
    /// Remaining life in ticks
    pub life: f32,
    /// Total lifetime (alpha fades against this)
    pub max_life: f32,
    pub color: Color,
    /// Quad edge in pixels
    pub size: f32,
    /// Gravity multiplier (0 = floats, 1 = falls)
    pub gravity: f32,
    /// Is this particle slot active?
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 0.0,
            max_life: 1.0,
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            size: 1.0,
            gravity: 0.0,
            alive: false,
        }
    }
}

/// Fixed pool of particles. Spawning reuses the first dead slot and
/// silently drops the request when the pool is saturated.
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: vec![Particle::default(); MAX_PARTICLES],
        }
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    /// Activate one particle. No-op when the pool is full.
    pub fn spawn(&mut self, pos: Vec2, velocity: Vec2, life: f32, color: Color, gravity: f32) {
        if let Some(slot) = self.particles.iter_mut().find(|p| !p.alive) {
            *slot = Particle {
                pos,
                velocity,
                life,
                max_life: life,
                color,
                size: 1.0,
                gravity,
                alive: true,
            };
        }
    }

    /// Advance all live particles one tick.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            if !p.alive {
                continue;
            }
            p.life -= 1.0;
            if p.life <= 0.0 {
                p.alive = false;
                continue;
            }
            p.velocity.y += DUST_GRAVITY * p.gravity;
            p.pos += p.velocity;
        }
    }

    /// Draw as single-pixel quads, alpha fading over lifetime.
    pub fn draw(&self, offset: Vec2) {
        for p in &self.particles {
            if !p.alive {
                continue;
            }
            let mut color = p.color;
            color.a *= p.life / p.max_life;
            draw_rectangle(p.pos.x - offset.x, p.pos.y - offset.y, p.size, p.size, color);
        }
    }

    /// Emit cosmetic dust for the player's current action. Rates and
    /// directions follow the feel of the original effects: sparse,
    /// low-energy, biased against the direction of motion.
    pub fn emit_for_player(&mut self, player: &Player) {
        let feet = player.body.pos + vec2(player.body.size.x * 0.5, player.body.size.y - 1.0);

        match player.action {
            super::player::Action::Run => {
                if gen_range(0, 20) == 0 {
                    let grey = gen_range(0.2f32, 0.6f32);
                    self.spawn(
                        feet + vec2(gen_range(-3.0f32, 3.0f32), 0.0),
                        vec2(player.body.velocity.x, -0.1),
                        gen_range(20.0f32, 40.0f32),
                        Color::new(grey, grey, grey, 0.8),
                        0.5,
                    );
                }
            }
            super::player::Action::Land => {
                if gen_range(0, 2) == 0 {
                    let side = if gen_range(0, 2) == 0 { -1.2 } else { 1.2 };
                    self.spawn(
                        feet + vec2(gen_range(-3.0f32, 3.0f32), 0.0),
                        vec2(side, -0.2),
                        gen_range(15.0f32, 30.0f32),
                        Color::new(0.55, 0.55, 0.55, 0.8),
                        0.5,
                    );
                }
            }
            super::player::Action::Jump => {
                if gen_range(0, 50) == 0 {
                    self.spawn(
                        feet + vec2(gen_range(-3.0f32, 3.0f32), 0.0),
                        vec2(0.0, 1.0),
                        gen_range(15.0f32, 25.0f32),
                        Color::new(0.6, 0.6, 0.6, 0.8),
                        0.5,
                    );
                }
            }
            super::player::Action::WallSlide => {
                if gen_range(0, 10) == 0 {
                    // Shavings come off the wall-side edge
                    let side_x = if player.body.flip { -1.5 } else { 2.7 };
                    self.spawn(
                        player.body.pos + vec2(player.body.size.x * 0.5 + side_x, 0.0),
                        vec2(0.0, -player.body.velocity.x * 2.0),
                        gen_range(15.0f32, 30.0f32),
                        Color::new(0.55, 0.55, 0.55, 0.6),
                        0.0,
                    );
                }
            }
            _ => {}
        }
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    #[test]
    fn test_spawn_fills_pool_slots() {
        let mut system = ParticleSystem::new();
        assert_eq!(system.alive_count(), 0);

        system.spawn(Vec2::ZERO, Vec2::ZERO, 10.0, WHITE, 0.0);
        system.spawn(Vec2::ZERO, Vec2::ZERO, 10.0, WHITE, 0.0);
        assert_eq!(system.alive_count(), 2);
    }

    #[test]
    fn test_pool_saturates_without_growing() {
        let mut system = ParticleSystem::new();
        for _ in 0..(MAX_PARTICLES + 50) {
            system.spawn(Vec2::ZERO, Vec2::ZERO, 10.0, WHITE, 0.0);
        }
        assert_eq!(system.alive_count(), MAX_PARTICLES);
    }

    #[test]
    fn test_lifetime_eviction_and_slot_reuse() {
        let mut system = ParticleSystem::new();
        system.spawn(Vec2::ZERO, Vec2::ZERO, 3.0, WHITE, 0.0);

        for _ in 0..3 {
            system.update();
        }
        assert_eq!(system.alive_count(), 0);

        system.spawn(Vec2::ZERO, Vec2::ZERO, 5.0, WHITE, 0.0);
        assert_eq!(system.alive_count(), 1);
    }

    #[test]
    fn test_velocity_and_gravity_applied() {
        let mut system = ParticleSystem::new();
        system.spawn(Vec2::ZERO, vec2(1.0, 0.0), 100.0, WHITE, 1.0);
        system.update();

        let p = system.particles.iter().find(|p| p.alive).unwrap();
        assert_eq!(p.pos.x, 1.0);
        assert!(p.velocity.y > 0.0);
    }
}
