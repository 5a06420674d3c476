//! Gameplay scene
//!
//! Owns everything a run needs: the tile grid, the player, cameras,
//! effects, sounds, and the save file. The frame order matters and
//! follows one fixed sequence: noise target, input, camera ease,
//! particles, player tick, event drain, wipe/death bookkeeping, then
//! drawing into the low-res target and blitting through the CRT
//! material.

use macroquad::audio::{load_sound, play_sound, PlaySoundParams, Sound};
use macroquad::prelude::*;

use crate::config::GameConfig;
use crate::fx::{AnomalyText, NoiseFx, ScreenFlash, NOISE_LOUD, NOISE_NEAR, NOISE_QUIET};
use crate::game::buffs::{X2JUMP, X2JUMP_POWER_BONUS};
use crate::game::renderer::{draw_layer, PlayerSprites, Tileset};
use crate::game::snapshot::{self, SaveData};
use crate::game::{
    Action, Animation, AnimationSet, BuffRegistry, Events, ParticleSystem, Player,
    SpikeSpawnAnimation,
};
use crate::input;
use crate::scene::transition::{Transition, WipeMode};
use crate::scene::Scene;
use crate::ui::{Skill, SkillBar};
use crate::world::{load_level, LevelError, TileLayer, Tilemap};

/// Seconds the double-jump buff stays armed
const X2JUMP_DURATION: f32 = 1.5;
/// Seconds the red death beat holds before respawn
const DEATH_HOLD: f32 = 0.25;
/// Seconds a screenshot takes to develop
const SCREENSHOT_FLASH: f32 = 2.0;
/// Camera easing divisor
const CAMERA_EASE: f32 = 25.0;
/// Camera aims this many pixels above the player
const CAMERA_Y_BIAS: f32 = 25.0;

/// Fixed anomaly positions in world pixels. The second one is the
/// strong source that maxes out the grain.
const ANOMALY_POSITIONS: [Vec2; 4] = [
    vec2(355.0, 177.0),
    vec2(2299.0, -719.0),
    vec2(1069.0, -607.0),
    vec2(1266.0, -687.0),
];
const ANOMALY_LOUD: Vec2 = vec2(2299.0, -719.0);

/// Sound effects, each optional so a bare checkout stays playable.
struct SoundBank {
    jump: Option<Sound>,
    land: Option<Sound>,
    dash: Option<Sound>,
    death: Option<Sound>,
    anomaly_near: Option<Sound>,
    anomaly_clear: Option<Sound>,
    volume: f32,
}

impl SoundBank {
    async fn load(dir: &str, volume: f32) -> Self {
        let fetch = |name: &str| {
            let path = format!("{}/{}.wav", dir, name);
            async move { load_sound(&path).await.ok() }
        };
        Self {
            jump: fetch("jump").await,
            land: fetch("land").await,
            dash: fetch("dash").await,
            death: fetch("death").await,
            anomaly_near: fetch("anomaly_1").await,
            anomaly_clear: fetch("anomaly_0").await,
            volume,
        }
    }

    fn play(&self, sound: &Option<Sound>) {
        if let Some(sound) = sound {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: self.volume,
                },
            );
        }
    }
}

pub struct GameScene {
    config: GameConfig,
    level_name: String,
    tilemap: Tilemap,
    player: Player,
    checkpoint: Vec2,
    death_count: u32,
    scroll: Vec2,

    events: Events,
    buffs: BuffRegistry,
    particles: ParticleSystem,
    skill_bar: SkillBar,
    spike_spawns: Vec<SpikeSpawnAnimation>,

    wipe: Transition,
    flash: ScreenFlash,
    anomaly_text: AnomalyText,
    noise: NoiseFx,

    anim: Animation,
    anim_action: Action,

    tileset: Tileset,
    sprites: PlayerSprites,
    sounds: SoundBank,
    render_target: RenderTarget,
    view: Vec2,

    death_timer: Option<f32>,
    screenshot_pending: bool,
    exiting: bool,
}

impl GameScene {
    /// Build the scene: load assets, then resume from the save file if
    /// one exists, else start fresh from the configured level.
    pub async fn new(config: GameConfig) -> Result<Self, LevelError> {
        let view = vec2(config.view_width, config.view_height);
        let tileset = Tileset::load(&config.tileset_path, 16.0).await;
        let sprites = PlayerSprites::load(&config.sprite_dir).await;
        let sounds = SoundBank::load(&config.sound_dir, config.volume).await;

        let render_target = render_target(view.x as u32, view.y as u32);
        render_target.texture.set_filter(FilterMode::Nearest);

        let mut level_name = config.start_level.clone();
        let mut checkpoint = vec2(180.0, 100.0);
        let mut death_count = 0;
        let mut scroll = Vec2::ZERO;
        let mut player_pos = None;
        let mut tilemap = None;

        if let Some(save) = snapshot::read_save_or_default(snapshot::save_path()) {
            match save.restore_tilemap() {
                Ok(map) => {
                    tilemap = Some(map);
                    level_name = save.level.clone();
                    checkpoint = vec2(save.checkpoint.0, save.checkpoint.1);
                    death_count = save.death_count;
                    scroll = vec2(save.scroll.0, save.scroll.1);
                    player_pos = Some(vec2(save.player_pos.0, save.player_pos.1));
                }
                Err(e) => {
                    eprintln!("Warning: save tilemap unusable ({}), starting fresh", e);
                }
            }
        }

        let tilemap = match tilemap {
            Some(map) => map,
            None => load_level(config.level_path(&level_name))?,
        };
        let player = Player::new(player_pos.unwrap_or(checkpoint));

        Ok(Self {
            config,
            level_name,
            tilemap,
            player,
            checkpoint,
            death_count,
            scroll,
            events: Events::new(),
            buffs: BuffRegistry::new(),
            particles: ParticleSystem::new(),
            skill_bar: SkillBar::new(),
            spike_spawns: Vec::new(),
            wipe: Transition::reveal(),
            flash: ScreenFlash::default(),
            anomaly_text: AnomalyText::default(),
            noise: NoiseFx::new(),
            anim: AnimationSet::clip(Action::Idle),
            anim_action: Action::Idle,
            tileset,
            sprites,
            sounds,
            render_target,
            view,
            death_timer: None,
            screenshot_pending: false,
            exiting: false,
        })
    }

    /// First anomaly currently inside the camera view, if any.
    fn anomaly_in_view(&self) -> Option<Vec2> {
        ANOMALY_POSITIONS.into_iter().find(|pos| {
            let screen = *pos - self.scroll;
            screen.x > 0.0 && screen.y > 0.0 && screen.x < self.view.x && screen.y < self.view.y
        })
    }

    fn save(&self) {
        let data = SaveData::capture(
            (self.player.body.pos.x, self.player.body.pos.y),
            (self.checkpoint.x, self.checkpoint.y),
            self.death_count,
            &self.level_name,
            &self.tilemap,
            (self.scroll.x, self.scroll.y),
        );
        if let Err(e) = snapshot::write_save(snapshot::save_path(), &data) {
            eprintln!("Warning: could not write save ({})", e);
        }
    }

    /// Fresh player at the checkpoint, level reloaded from disk so
    /// sprung traps reset. Keeps the save's death count running.
    fn respawn(&mut self) {
        match load_level(self.config.level_path(&self.level_name)) {
            Ok(map) => self.tilemap = map,
            Err(e) => eprintln!("Warning: level reload failed ({}), keeping grid", e),
        }
        self.player = Player::new(self.checkpoint);
        self.spike_spawns.clear();
        self.events.clear_all();
        self.death_count += 1;
        self.death_timer = None;
        self.anim = AnimationSet::clip(Action::Idle);
        self.anim_action = Action::Idle;

        // Snap the camera so the reveal opens on the checkpoint
        let center = self.player.body.center();
        self.scroll = vec2(
            center.x - self.view.x * 0.5,
            center.y - self.view.y * 0.5 - CAMERA_Y_BIAS,
        );
        self.wipe.restart_reveal();
    }

    fn handle_input(&mut self, frame: input::InputFrame) {
        if frame.quit && !self.exiting {
            self.exiting = true;
            self.wipe.start_cover();
        }
        if self.player.dead || self.exiting {
            return;
        }

        if frame.jump {
            if self.buffs.contains(X2JUMP) {
                if self.player.jump(X2JUMP_POWER_BONUS, true, &mut self.events) {
                    self.buffs.clear(X2JUMP);
                }
            } else {
                self.player.jump(0.0, false, &mut self.events);
            }
        }
        if frame.dash && self.skill_bar.ready(Skill::Dash) && self.player.dash(&mut self.events) {
            self.skill_bar.trigger(Skill::Dash);
        }
        if frame.skill && self.skill_bar.trigger(Skill::JumpBuff) {
            self.buffs.add(X2JUMP, X2JUMP_DURATION);
        }
        if frame.screenshot && self.skill_bar.trigger(Skill::Screenshot) {
            self.flash.trigger(SCREENSHOT_FLASH, WHITE);
            self.screenshot_pending = true;
        }
    }

    fn drain_events(&mut self) {
        for _ in self.events.jump.drain() {
            self.sounds.play(&self.sounds.jump);
        }
        for _ in self.events.land.drain() {
            self.sounds.play(&self.sounds.land);
        }
        for _ in self.events.dash.drain() {
            self.sounds.play(&self.sounds.dash);
        }
        let died = !self.events.death.is_empty();
        self.events.death.clear();
        if died {
            self.sounds.play(&self.sounds.death);
            self.wipe.start_cover();
        }
        let sprung: Vec<_> = self.events.trap_sprung.drain().collect();
        for event in sprung {
            self.spike_spawns
                .push(SpikeSpawnAnimation::new(event.tile_pos, event.angle));
        }
    }

    /// Run one frame. Returns the next scene when this one is done.
    pub fn frame(&mut self) -> Option<Scene> {
        let dt = get_frame_time();

        // Grain target from anomaly visibility
        let near = self.anomaly_in_view();
        self.noise.set_target(match near {
            Some(pos) if pos == ANOMALY_LOUD => NOISE_LOUD,
            Some(_) => NOISE_NEAR,
            None => NOISE_QUIET,
        });
        self.noise.update(dt);

        let frame = input::poll();
        self.handle_input(frame);
        self.skill_bar.tick(dt);
        self.buffs.tick(dt);

        // Camera eases toward the player, aimed a little high
        let center = self.player.body.center();
        self.scroll.x += (center.x - self.view.x * 0.5 - self.scroll.x) / CAMERA_EASE;
        self.scroll.y +=
            (center.y - self.view.y * 0.5 - self.scroll.y - CAMERA_Y_BIAS) / CAMERA_EASE;
        let render_scroll = vec2(self.scroll.x.floor(), self.scroll.y.floor());

        self.particles.emit_for_player(&self.player);
        self.particles.update();

        self.player
            .update(&mut self.tilemap, vec2(frame.move_x, 0.0), &mut self.events);

        if self.player.action != self.anim_action {
            self.anim = AnimationSet::clip(self.player.action);
            self.anim_action = self.player.action;
        } else {
            self.anim.update();
        }

        self.drain_events();
        for spawn in &mut self.spike_spawns {
            spawn.update();
        }
        self.spike_spawns.retain(|s| !s.finished());

        if self.wipe.update() && self.wipe.mode() == WipeMode::Cover {
            if self.exiting {
                self.save();
                return Some(Scene::Exit);
            }
            if self.player.dead {
                self.flash.trigger(DEATH_HOLD, Color::new(0.8, 0.05, 0.05, 1.0));
                self.death_timer = Some(DEATH_HOLD);
            }
        }

        if let Some(timer) = &mut self.death_timer {
            *timer -= dt;
            if *timer <= 0.0 {
                self.respawn();
            }
        }

        self.flash.update(dt);
        if self.screenshot_pending && !self.flash.active() {
            self.screenshot_pending = false;
            // The picture "reboots" after the shot develops
            if !self.exiting && !self.player.dead {
                self.wipe.restart_reveal();
            }
            let near = near.is_some();
            self.anomaly_text.show(near);
            self.sounds.play(if near {
                &self.sounds.anomaly_near
            } else {
                &self.sounds.anomaly_clear
            });
        }
        self.anomaly_text.update(dt);

        self.draw(render_scroll);
        None
    }

    fn draw(&self, render_scroll: Vec2) {
        set_camera(&Camera2D {
            zoom: vec2(2.0 / self.view.x, 2.0 / self.view.y),
            target: self.view * 0.5,
            render_target: Some(self.render_target.clone()),
            ..Default::default()
        });
        clear_background(BLACK);

        draw_layer(
            &self.tilemap,
            TileLayer::Background,
            &self.tileset,
            render_scroll,
            self.view,
        );
        draw_layer(
            &self.tilemap,
            TileLayer::Physics,
            &self.tileset,
            render_scroll,
            self.view,
        );
        self.particles.draw(render_scroll);
        self.sprites.draw(&self.player, &self.anim, render_scroll);
        draw_layer(
            &self.tilemap,
            TileLayer::Decor,
            &self.tileset,
            render_scroll,
            self.view,
        );

        // Spawn pops over freshly sprung spikes
        let ts = self.tilemap.tile_size as f32;
        for spawn in &self.spike_spawns {
            let alpha = 1.0 - spawn.clip.frame() as f32 / spawn.clip.frames as f32;
            draw_rectangle(
                spawn.tile_pos.0 as f32 * ts - render_scroll.x,
                spawn.tile_pos.1 as f32 * ts - render_scroll.y,
                ts,
                ts,
                Color::new(1.0, 1.0, 1.0, alpha),
            );
        }

        self.skill_bar.draw(vec2(4.0, 4.0), &self.buffs);
        self.anomaly_text.draw(self.view);
        self.flash.draw(self.view);
        self.wipe.draw(self.view);

        set_default_camera();
        clear_background(BLACK);
        self.noise.apply();
        draw_texture_ex(
            &self.render_target.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
        self.noise.finish();
    }
}
