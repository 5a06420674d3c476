//! Circle wipe
//!
//! The black iris that reveals the world on spawn and swallows it on
//! death or exit. A counter runs from thirty to zero; the hole radius
//! is derived from it, growing on reveal and shrinking on cover.
//! Covers run at double speed so deaths feel snappy.

use macroquad::prelude::*;

/// Wipe counter start value
pub const WIPE_START: f32 = 30.0;
/// Hole radius per counter unit
const RADIUS_STEP: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeMode {
    /// Hole grows: black screen opening onto the world
    Reveal,
    /// Hole shrinks: world closing down to black
    Cover,
}

/// The wipe. `update` returns true on the tick the wipe completes so
/// the scene can act exactly once (respawn, exit).
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    value: f32,
    mode: WipeMode,
}

impl Transition {
    pub fn reveal() -> Self {
        Self {
            value: WIPE_START,
            mode: WipeMode::Reveal,
        }
    }

    /// Restart as a reveal (respawn).
    pub fn restart_reveal(&mut self) {
        *self = Self::reveal();
    }

    /// Restart as a cover (death, exit).
    pub fn start_cover(&mut self) {
        self.value = WIPE_START;
        self.mode = WipeMode::Cover;
    }

    pub fn active(&self) -> bool {
        self.value > 0.0
    }

    pub fn mode(&self) -> WipeMode {
        self.mode
    }

    /// Advance one tick. True exactly when the counter hits zero.
    pub fn update(&mut self) -> bool {
        if self.value <= 0.0 {
            return false;
        }
        let speed = match self.mode {
            WipeMode::Reveal => 1.0,
            WipeMode::Cover => 2.0,
        };
        self.value = (self.value - speed).max(0.0);
        self.value == 0.0
    }

    fn hole_radius(&self) -> f32 {
        match self.mode {
            WipeMode::Reveal => (WIPE_START - self.value) * RADIUS_STEP,
            WipeMode::Cover => self.value * RADIUS_STEP,
        }
    }

    pub fn draw(&self, view: Vec2) {
        let covered = self.mode == WipeMode::Cover && self.value <= 0.0;
        if !self.active() && !covered {
            return;
        }
        if covered {
            draw_rectangle(0.0, 0.0, view.x, view.y, BLACK);
            return;
        }
        // The stroke is centered on its radius, so push the ring out
        // by half its thickness to keep the hole open. Thickness spans
        // the view diagonal so the black always covers the corners.
        let outer = (view.x * view.x + view.y * view.y).sqrt();
        draw_circle_lines(
            view.x * 0.5,
            view.y * 0.5,
            self.hole_radius() + outer * 0.5,
            outer,
            BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_completes_in_thirty_ticks() {
        let mut wipe = Transition::reveal();
        let mut finished = 0;
        for _ in 0..40 {
            if wipe.update() {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert!(!wipe.active());
    }

    #[test]
    fn test_cover_runs_at_double_speed() {
        let mut wipe = Transition::reveal();
        wipe.start_cover();

        let mut ticks = 0;
        while wipe.active() {
            wipe.update();
            ticks += 1;
        }
        assert_eq!(ticks, 15);
    }
}
