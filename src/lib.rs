//! Flappy Qor - a single-screen flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacle supply, collisions, session state)
//! - `renderer`: 2D surface abstraction and the frame painter
//! - `platform`: Browser/native platform abstraction (storage, time, input, assets)
//! - `tuning`: Data-driven game balance
//! - `game`: Frame driver tying the simulation to storage and audio

pub mod audio;
pub mod best_score;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod share;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical surface width
    pub const VIEW_WIDTH: f32 = 360.0;
    /// Logical surface height
    pub const VIEW_HEIGHT: f32 = 640.0;
    /// Height of the floor strip at the bottom of the surface
    pub const FLOOR_HEIGHT: f32 = 16.0;

    /// Frame time the per-frame tuning constants were authored against (60 Hz)
    pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest frame the vertical physics will integrate in one step
    pub const MAX_FRAME_MS: f32 = 32.0;
    /// Shortest frame the vertical physics will integrate in one step; a
    /// repeated timestamp still moves the sprite along with the scroll
    pub const MIN_FRAME_MS: f32 = 1.0;

    /// Sprite source size assumed until the image has loaded
    pub const DEFAULT_SPRITE_SOURCE: f32 = 80.0;
    /// Fixed horizontal position of the sprite
    pub const SPRITE_X: f32 = 70.0;

    /// Delay before the game-over overlay is shown (ms)
    pub const OVER_SCREEN_DELAY_MS: i32 = 150;

    /// Sprite image location
    pub const LOGO_SRC: &str = "https://qorgenius-os.xyz/qor-logo.png";
}
