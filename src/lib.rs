//! Brickbat - a bat-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wall layout, collisions, game state)
//! - `runner`: Fixed-rate frame loop driving the simulation
//! - `input`: Discrete input commands and key repeat
//! - `renderer`: Draw command lists built from game state
//! - `platform`: Presentation and input collaborators (terminal backend)
//! - `audio`: Sound effect sink
//! - `assets`: Sprite dimensions and optional background asset
//! - `settings`: Data-driven game configuration

pub mod assets;
pub mod audio;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SettingsError};
pub use runner::{Exit, Runner};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Default play area (virtual pixels)
    pub const PLAY_WIDTH: i32 = 800;
    pub const PLAY_HEIGHT: i32 = 600;

    /// Wall layout
    pub const WALL_MARGIN: i32 = 30;
    pub const WALL_TOP: i32 = 60;
    pub const BRICKS_PER_ROW_UNIT: usize = 10;

    /// Brick sprite size
    pub const BRICK_WIDTH: i32 = 70;
    pub const BRICK_HEIGHT: i32 = 25;

    /// Ball sprite radius (the ball occupies a 2r x 2r box)
    pub const BALL_RADIUS: i32 = 12;
    pub const XSPEED_INIT: i32 = 10;
    pub const YSPEED_INIT: i32 = 10;

    /// Bat sprite size and placement
    pub const BAT_WIDTH: i32 = 120;
    pub const BAT_HEIGHT: i32 = 20;
    /// Gap between the bat's bottom edge and the bottom of the play area
    pub const BAT_BOTTOM_GAP: i32 = 20;
    /// Horizontal step per move command
    pub const BAT_SPEED: i32 = 30;

    /// Points per destroyed brick
    pub const BRICK_SCORE: u32 = 10;
    pub const MAX_LIVES: u32 = 5;

    /// Splash image duration (milliseconds)
    pub const SPLASH_MS: u64 = 5000;
    /// Key repeat: delay before the first repeat, then interval between repeats
    pub const KEY_REPEAT_DELAY_MS: u64 = 1;
    pub const KEY_REPEAT_INTERVAL_MS: u64 = 30;

    /// Flat fill used when no background asset is available (dark slate grey)
    pub const BACKGROUND_FILL: [u8; 3] = [0x2F, 0x4F, 0x4F];
}

/// Convert a duration in milliseconds to whole ticks, rounding up (at least
/// one tick). Durations too long to count in a `u32` saturate.
#[inline]
pub fn ms_to_ticks(ms: u64, tick_rate: u32) -> u32 {
    let ticks = ms.saturating_mul(tick_rate as u64).div_ceil(1000);
    u32::try_from(ticks.max(1)).unwrap_or(u32::MAX)
}
