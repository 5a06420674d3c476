//! PEAK: a glitchy little precision platformer
//!
//! Tile-grid physics with axis-separated collision, a player state
//! machine (run, jump, wall slide, dash), springing spike traps,
//! glitch skills on cooldowns, and a CRT-noise picture that degrades
//! near anomalies. Everything simulates at the game's native low-res
//! tick and blits up to the window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod fx;
mod game;
mod input;
mod scene;
mod ui;
mod world;

use macroquad::prelude::*;

use config::GameConfig;
use scene::{GameScene, MenuScene, Scene};

fn window_conf() -> Conf {
    let config = GameConfig::load_or_default("config.ron");
    Conf {
        window_title: format!("peak v{}", VERSION),
        window_width: (config.view_width * config.window_scale) as i32,
        window_height: (config.view_height * config.window_scale) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = GameConfig::load_or_default("config.ron");
    let mut current = Scene::Menu;
    let mut menu = MenuScene::new();

    loop {
        match current {
            Scene::Menu => {
                if let Some(next) = menu.frame() {
                    current = next;
                }
            }
            Scene::Game => {
                let mut game = match GameScene::new(config.clone()).await {
                    Ok(game) => game,
                    Err(e) => {
                        eprintln!("Error: could not start level: {}", e);
                        break;
                    }
                };
                loop {
                    if let Some(next) = game.frame() {
                        current = next;
                        break;
                    }
                    next_frame().await;
                }
                menu = MenuScene::new();
            }
            Scene::Exit => break,
        }
        if current == Scene::Exit {
            break;
        }
        next_frame().await;
    }
}
