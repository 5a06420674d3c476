//! Sprite animation clips
//!
//! Frame-strip playback counted in simulation ticks: a clip shows each
//! frame for `frame_duration` ticks and either loops or parks on its
//! last frame. Clips are cheap values; every entity owns its own copy
//! so playback positions never alias.

use super::player::Action;

/// One animation clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Number of frames in the strip
    pub frames: u32,
    /// Ticks each frame is shown
    pub frame_duration: u32,
    /// Loop, or park on the final frame
    pub looping: bool,
    counter: u32,
}

impl Animation {
    pub fn new(frames: u32, frame_duration: u32, looping: bool) -> Self {
        Self {
            frames: frames.max(1),
            frame_duration: frame_duration.max(1),
            looping,
            counter: 0,
        }
    }

    /// Advance one tick.
    pub fn update(&mut self) {
        let total = self.frames * self.frame_duration;
        if self.looping {
            self.counter = (self.counter + 1) % total;
        } else {
            self.counter = (self.counter + 1).min(total - 1);
        }
    }

    /// Index of the frame to draw.
    pub fn frame(&self) -> u32 {
        self.counter / self.frame_duration
    }

    /// True once a non-looping clip has reached its final frame.
    pub fn done(&self) -> bool {
        !self.looping && self.counter == self.frames * self.frame_duration - 1
    }

    /// Restart from the first frame.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

/// Clip table for the player, one entry per [`Action`].
///
/// Frame counts correspond to the shipped sprite strips; durations
/// mirror the original animation timings.
#[derive(Debug, Clone)]
pub struct AnimationSet;

impl AnimationSet {
    /// A fresh clip for an action, started at frame zero.
    pub fn clip(action: Action) -> Animation {
        match action {
            Action::Idle => Animation::new(4, 30, true),
            Action::EdgeIdle => Animation::new(4, 30, true),
            Action::Run => Animation::new(6, 6, true),
            Action::Jump => Animation::new(4, 7, false),
            Action::WallSlide => Animation::new(2, 5, true),
            Action::Fall => Animation::new(2, 5, true),
            Action::Land => Animation::new(3, 20, false),
            Action::Dash => Animation::new(1, 1, false),
            Action::Death => Animation::new(6, 3, false),
        }
    }
}

/// Spawn-in animation for a danger-spike tile. Purely visual; the
/// scene keeps a list and culls the finished ones.
#[derive(Debug, Clone)]
pub struct SpikeSpawnAnimation {
    /// Tile coordinate being revealed
    pub tile_pos: (i32, i32),
    /// Draw rotation in degrees
    pub angle: f32,
    pub clip: Animation,
}

impl SpikeSpawnAnimation {
    pub fn new(tile_pos: (i32, i32), angle: f32) -> Self {
        Self {
            tile_pos,
            angle,
            clip: Animation::new(4, 7, false),
        }
    }

    pub fn update(&mut self) {
        self.clip.update();
    }

    pub fn finished(&self) -> bool {
        self.clip.done()
    }
}
