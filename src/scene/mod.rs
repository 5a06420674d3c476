//! Scenes
//!
//! The game is a handful of scenes driven from the main loop: the
//! menu, the run itself, and an exit marker. Each scene runs one frame
//! at a time and hands back the next scene when it is done.

pub mod game;
pub mod menu;
pub mod transition;

pub use game::GameScene;
pub use menu::MenuScene;
pub use transition::Transition;

/// Which scene the main loop should run next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Game,
    Exit,
}
