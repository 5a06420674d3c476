//! Screen effects
//!
//! Presentation-only layers composited over the game view: the white
//! flash for screenshots and deaths, the anomaly verdict readout shown
//! after a screenshot develops, and the CRT noise material applied to
//! the final blit. None of this touches simulation state.

use macroquad::material::{
    gl_use_default_material, gl_use_material, load_material, Material, MaterialParams,
};
use macroquad::miniquad::{ShaderSource, UniformDesc, UniformType};
use macroquad::prelude::*;

/// Full-screen colored flash with a quadratic fade. Screenshots flash
/// white over two seconds; deaths hold red for a quarter second.
#[derive(Debug, Clone, Copy)]
pub struct ScreenFlash {
    remaining: f32,
    duration: f32,
    color: Color,
}

impl Default for ScreenFlash {
    fn default() -> Self {
        Self {
            remaining: 0.0,
            duration: 1.0,
            color: WHITE,
        }
    }
}

impl ScreenFlash {
    /// Start (or restart) a flash lasting `duration` seconds.
    pub fn trigger(&mut self, duration: f32, color: Color) {
        self.remaining = duration;
        self.duration = duration;
        self.color = color;
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Fade progress in 0..1, quadratic so the flash dies fast.
    pub fn alpha(&self) -> f32 {
        let progress = self.remaining / self.duration;
        progress * progress
    }

    pub fn draw(&self, view: Vec2) {
        if !self.active() {
            return;
        }
        let mut color = self.color;
        color.a = self.alpha();
        draw_rectangle(0.0, 0.0, view.x, view.y, color);
    }
}

/// Verdict text after a screenshot develops: red alarm when an anomaly
/// was in frame, plain white all-clear otherwise. Fades in over the
/// first half of its two seconds, out over the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyText {
    elapsed: f32,
    active: bool,
    near: bool,
}

/// Seconds the verdict stays on screen
const ANOMALY_TEXT_DURATION: f32 = 2.0;

impl AnomalyText {
    pub fn show(&mut self, near: bool) {
        self.elapsed = 0.0;
        self.active = true;
        self.near = near;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= ANOMALY_TEXT_DURATION {
            self.active = false;
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }

    fn alpha(&self) -> f32 {
        let half = ANOMALY_TEXT_DURATION * 0.5;
        if self.elapsed < half {
            self.elapsed / half
        } else {
            1.0 - (self.elapsed - half) / half
        }
    }

    pub fn draw(&self, view: Vec2) {
        if !self.active {
            return;
        }
        let (text, mut color) = if self.near {
            ("Anomaly is near you!!!", Color::new(0.99, 0.01, 0.01, 1.0))
        } else {
            ("Anomaly not found", WHITE)
        };
        color.a = self.alpha();
        let size = measure_text(text, None, 16, 1.0);
        draw_text(
            text,
            (view.x - size.width) * 0.5,
            view.y * 0.5 + 50.0,
            16.0,
            color,
        );
    }
}

const CRT_VERTEX: &str = r#"#version 100
attribute vec3 position;
attribute vec2 texcoord;
varying lowp vec2 uv;
uniform mat4 Model;
uniform mat4 Projection;
void main() {
    gl_Position = Projection * Model * vec4(position, 1);
    uv = texcoord;
}
"#;

const CRT_FRAGMENT: &str = r#"#version 100
precision lowp float;
varying vec2 uv;
uniform sampler2D Texture;
uniform float time;
uniform float noise_cof;
float rand(vec2 co) {
    return fract(sin(dot(co, vec2(12.9898, 78.233))) * 43758.5453);
}
void main() {
    vec3 color = texture2D(Texture, uv).rgb;
    float grain = rand(uv + fract(time)) - 0.5;
    color += grain * 0.06 * noise_cof;
    color *= 1.0 - 0.02 * noise_cof * sin(uv.y * 500.0);
    gl_FragColor = vec4(color, 1.0);
}
"#;

/// Grain strength with no anomaly in view
pub const NOISE_QUIET: f32 = 1.0;
/// Grain target while an anomaly is visible
pub const NOISE_NEAR: f32 = 1.5;
/// Grain target for the strongest anomaly
pub const NOISE_LOUD: f32 = 3.0;
/// Proportional easing rate toward the target, per tick
const NOISE_EASE: f32 = 0.05;

/// CRT noise on the final screen blit. The grain coefficient eases
/// toward whatever target the scene sets from anomaly visibility, so
/// the picture degrades as the player closes in.
pub struct NoiseFx {
    material: Option<Material>,
    time: f32,
    cof: f32,
    target: f32,
}

impl NoiseFx {
    pub fn new() -> Self {
        let material = match load_material(
            ShaderSource::Glsl {
                vertex: CRT_VERTEX,
                fragment: CRT_FRAGMENT,
            },
            MaterialParams {
                uniforms: vec![
                    UniformDesc::new("time", UniformType::Float1),
                    UniformDesc::new("noise_cof", UniformType::Float1),
                ],
                ..Default::default()
            },
        ) {
            Ok(material) => Some(material),
            Err(e) => {
                eprintln!("Warning: CRT shader failed to compile ({}), drawing clean", e);
                None
            }
        };
        Self {
            material,
            time: 0.0,
            cof: NOISE_QUIET,
            target: NOISE_QUIET,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.cof += (self.target - self.cof) * NOISE_EASE;
    }

    /// Bind the material for the upcoming blit.
    pub fn apply(&self) {
        if let Some(material) = &self.material {
            material.set_uniform("time", self.time);
            material.set_uniform("noise_cof", self.cof);
            gl_use_material(material);
        }
    }

    /// Back to the default pipeline.
    pub fn finish(&self) {
        if self.material.is_some() {
            gl_use_default_material();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_fades_quadratically_then_expires() {
        let mut flash = ScreenFlash::default();
        assert!(!flash.active());

        flash.trigger(2.0, WHITE);
        assert!(flash.active());
        assert_eq!(flash.alpha(), 1.0);

        flash.update(1.0);
        assert_eq!(flash.alpha(), 0.25);

        flash.update(1.0);
        assert!(!flash.active());
    }

    #[test]
    fn test_anomaly_text_fades_in_then_out() {
        let mut text = AnomalyText::default();
        text.show(true);

        // Sample off-center of the 2 s window so the ramps differ:
        // 0.5 s into the rise (0.5) vs 0.7 s into the fall (0.3).
        text.update(0.5);
        let rising = text.alpha();
        text.update(1.2);
        let falling = text.alpha();
        assert!(rising > falling);

        text.update(0.5);
        assert!(!text.active());
    }
}
