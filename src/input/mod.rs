//! Input handling
//!
//! Polls the keyboard once per frame into an action-based snapshot so
//! the rest of the game never touches key codes. Movement is a held
//! intent; everything else is edge-triggered on key press.
//!
//! Bindings: A/D or arrows to move, W/Space/Up to jump, Q to dash,
//! E to trigger the equipped skill, F for a screenshot.

use macroquad::prelude::*;

/// One frame of player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Horizontal intent in {-1, 0, 1}
    pub move_x: f32,
    /// Jump pressed this frame
    pub jump: bool,
    /// Dash pressed this frame
    pub dash: bool,
    /// Skill key (double-jump buff) pressed this frame
    pub skill: bool,
    /// Screenshot key pressed this frame
    pub screenshot: bool,
    /// Pause / back pressed this frame
    pub quit: bool,
}

/// Read the keyboard for this frame.
pub fn poll() -> InputFrame {
    let left = is_key_down(KeyCode::A) || is_key_down(KeyCode::Left);
    let right = is_key_down(KeyCode::D) || is_key_down(KeyCode::Right);
    let move_x = match (left, right) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };

    InputFrame {
        move_x,
        jump: is_key_pressed(KeyCode::W)
            || is_key_pressed(KeyCode::Space)
            || is_key_pressed(KeyCode::Up),
        dash: is_key_pressed(KeyCode::Q),
        skill: is_key_pressed(KeyCode::E),
        screenshot: is_key_pressed(KeyCode::F),
        quit: is_key_pressed(KeyCode::Escape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_is_neutral() {
        let frame = InputFrame::default();
        assert_eq!(frame.move_x, 0.0);
        assert!(!frame.jump && !frame.dash && !frame.skill);
        assert!(!frame.screenshot && !frame.quit);
    }
}
