//! In-game HUD
//!
//! A row of skill icons with cooldown sweeps and keycap labels, plus
//! chips for active buffs with their remaining time. Cooldown state
//! lives here (it is a presentation-and-gating concern, not physics);
//! the scene asks `trigger` before acting on a skill key.

use macroquad::prelude::*;

use crate::game::BuffRegistry;

/// Icon edge in pixels
const ICON_SIZE: f32 = 14.0;
/// Gap between icons
const ICON_GAP: f32 = 4.0;
/// Ticks an icon stays highlighted after use
const PRESS_FLASH_TICKS: u32 = 8;

/// The skills bound to the HUD slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skill {
    Dash,
    JumpBuff,
    Screenshot,
}

/// One HUD slot: a skill, its keycap, and its cooldown clock.
#[derive(Debug, Clone)]
struct SkillSlot {
    skill: Skill,
    key_label: &'static str,
    /// Full cooldown in seconds
    cooldown: f32,
    /// Seconds until ready again
    remaining: f32,
    press_flash: u32,
}

/// The skill row. Tick once per frame with the frame delta.
pub struct SkillBar {
    slots: Vec<SkillSlot>,
}

impl SkillBar {
    pub fn new() -> Self {
        let slot = |skill, key_label, cooldown| SkillSlot {
            skill,
            key_label,
            cooldown,
            remaining: 0.0,
            press_flash: 0,
        };
        Self {
            slots: vec![
                slot(Skill::Dash, "Q", 3.0),
                slot(Skill::JumpBuff, "E", 3.0),
                slot(Skill::Screenshot, "F", 8.0),
            ],
        }
    }

    /// Advance cooldown clocks by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for slot in &mut self.slots {
            slot.remaining = (slot.remaining - dt).max(0.0);
            slot.press_flash = slot.press_flash.saturating_sub(1);
        }
    }

    pub fn ready(&self, skill: Skill) -> bool {
        self.slots
            .iter()
            .find(|s| s.skill == skill)
            .map(|s| s.remaining <= 0.0)
            .unwrap_or(false)
    }

    /// Consume the skill if off cooldown. Returns whether it fired.
    pub fn trigger(&mut self, skill: Skill) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.skill == skill) {
            if slot.remaining <= 0.0 {
                slot.remaining = slot.cooldown;
                slot.press_flash = PRESS_FLASH_TICKS;
                return true;
            }
        }
        false
    }

    /// Draw the row anchored at `origin` (top-left), then the buff
    /// chips to its right.
    pub fn draw(&self, origin: Vec2, buffs: &BuffRegistry) {
        for (i, slot) in self.slots.iter().enumerate() {
            let x = origin.x + i as f32 * (ICON_SIZE + ICON_GAP);
            let y = origin.y;

            let base = if slot.press_flash > 0 {
                Color::new(0.95, 0.95, 0.85, 0.9)
            } else {
                Color::new(0.25, 0.25, 0.3, 0.8)
            };
            draw_rectangle(x, y, ICON_SIZE, ICON_SIZE, base);

            // Cooldown sweep fills from the bottom as the skill recharges
            if slot.remaining > 0.0 {
                let frac = slot.remaining / slot.cooldown;
                draw_rectangle(
                    x,
                    y,
                    ICON_SIZE,
                    ICON_SIZE * frac,
                    Color::new(0.05, 0.05, 0.08, 0.7),
                );
            }

            draw_text(slot.key_label, x + 4.0, y + ICON_SIZE - 3.0, 12.0, WHITE);
        }

        let chips_x = origin.x + self.slots.len() as f32 * (ICON_SIZE + ICON_GAP) + 6.0;
        let mut x = chips_x;
        for buff in buffs.iter() {
            let label = format!("{} {:.0}", buff.name, buff.remaining.ceil());
            let width = label.len() as f32 * 5.0 + 6.0;
            draw_rectangle(
                x,
                origin.y,
                width,
                ICON_SIZE,
                Color::new(0.2, 0.4, 0.25, 0.8),
            );
            draw_text(&label, x + 3.0, origin.y + ICON_SIZE - 4.0, 10.0, WHITE);
            x += width + ICON_GAP;
        }
    }
}

impl Default for SkillBar {
    fn default() -> Self {
        Self::new()
    }
}
