//! Game Core Module
//!
//! The simulation and presentation pieces of the platformer, built
//! around composition rather than a deep entity hierarchy:
//!
//! - PhysicsBody: position, velocity, collision flags
//! - Player: a body plus the action state machine on top of it
//! - collision: axis-separated sweep against the solid tile grid
//! - Events: queues the scene drains for sounds and effects
//! - BuffRegistry: timed power-ups (double jump)
//! - ParticleSystem: cosmetic dust in a fixed pool
//! - SaveData: resumable snapshots of a run
//! - renderer: culled tile-layer and sprite drawing
//!
//! Everything below `renderer` is draw-free and runs in tests.

pub mod animation;
pub mod buffs;
pub mod collision;
pub mod entity;
pub mod events;
pub mod particles;
pub mod player;
pub mod renderer;
pub mod snapshot;

// Re-export main types
pub use animation::{Animation, AnimationSet, SpikeSpawnAnimation};
pub use buffs::{Buff, BuffRegistry};
pub use entity::{CollisionFlags, PhysicsBody};
pub use events::Events;
pub use particles::ParticleSystem;
pub use player::{Action, Player};
pub use snapshot::SaveData;
