//! Main menu
//!
//! A title and a Play button. The button grows on hover and starts the
//! game on click; Space works too for keyboard players.

use macroquad::prelude::*;

use crate::scene::Scene;

const TITLE: &str = "PEAK";
const PLAY: &str = "Play";

pub struct MenuScene;

impl MenuScene {
    pub fn new() -> Self {
        Self
    }

    /// Run one frame. Returns the next scene when the player picks one.
    pub fn frame(&mut self) -> Option<Scene> {
        clear_background(Color::new(0.04, 0.04, 0.07, 1.0));

        let cx = screen_width() * 0.5;
        let cy = screen_height() * 0.5;

        let title_size = measure_text(TITLE, None, 64, 1.0);
        draw_text(TITLE, cx - title_size.width * 0.5, cy - 60.0, 64.0, WHITE);

        let base = 32.0;
        let size = measure_text(PLAY, None, base as u16, 1.0);
        let bounds = Rect::new(
            cx - size.width * 0.5,
            cy + 50.0 - size.height,
            size.width,
            size.height * 1.4,
        );

        let (mx, my) = mouse_position();
        let hover = bounds.contains(vec2(mx, my));

        // Hovered text draws a fifth larger
        let font_size = if hover { base * 1.2 } else { base };
        let hover_size = measure_text(PLAY, None, font_size as u16, 1.0);
        draw_text(
            PLAY,
            cx - hover_size.width * 0.5,
            cy + 50.0,
            font_size,
            WHITE,
        );

        if (hover && is_mouse_button_pressed(MouseButton::Left))
            || is_key_pressed(KeyCode::Space)
        {
            return Some(Scene::Game);
        }
        if is_key_pressed(KeyCode::Escape) {
            return Some(Scene::Exit);
        }
        None
    }
}

impl Default for MenuScene {
    fn default() -> Self {
        Self::new()
    }
}
