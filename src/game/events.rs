//! Event queues
//!
//! The simulation core never plays sounds, draws, or times screen
//! wipes. It pushes events; the scene drains them once per frame and
//! fans them out to audio, particles, and transition effects. Each
//! collaborator handles its own concern without the core knowing about
//! any of them.

use macroquad::math::Vec2;

/// A queue for events of a single type.
/// Events are collected during the tick and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The player left the ground under jump power.
#[derive(Debug, Clone, Copy)]
pub struct JumpEvent {
    /// True when launched off a wall rather than the ground
    pub wall_jump: bool,
}

/// The player regained ground contact after falling.
#[derive(Debug, Clone, Copy)]
pub struct LandEvent {
    /// World position of the feet at touchdown
    pub pos: Vec2,
}

/// A dash started.
#[derive(Debug, Clone, Copy)]
pub struct DashEvent;

/// The player touched a hazard tile. Sent exactly once per death.
#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    pub pos: Vec2,
}

/// A trap sprung and placed a danger-spike tile. One event per spawned
/// tile; drives the one-shot spawn animation and tile rotation bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct TrapSprungEvent {
    /// Tile coordinate of the spawned spike
    pub tile_pos: (i32, i32),
    /// Draw rotation in degrees (0/90/180/270 by spawn direction)
    pub angle: f32,
}

/// Container for all game events.
/// Add new event types as fields here.
#[derive(Default)]
pub struct Events {
    pub jump: EventQueue<JumpEvent>,
    pub land: EventQueue<LandEvent>,
    pub dash: EventQueue<DashEvent>,
    pub death: EventQueue<DeathEvent>,
    pub trap_sprung: EventQueue<TrapSprungEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.jump.clear();
        self.land.clear();
        self.dash.clear();
        self.death.clear();
        self.trap_sprung.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_drain() {
        let mut queue = EventQueue::new();
        queue.send(DashEvent);
        queue.send(DashEvent);
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut events = Events::new();
        events.jump.send(JumpEvent { wall_jump: false });
        events.death.send(DeathEvent { pos: Vec2::ZERO });
        events.clear_all();
        assert!(events.jump.is_empty());
        assert!(events.death.is_empty());
    }
}
