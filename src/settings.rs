//! Game settings
//!
//! Defaults reproduce the classic tuning. A JSON file may override any subset
//! of fields; the result is validated once at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::AssetManifest;
use crate::consts::*;
use crate::error::{ConfigError, SettingsError};
use crate::ms_to_ticks;
use crate::sim::Playfield;

/// Auto-repeat for held direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRepeat {
    /// Delay before the first repeat (milliseconds)
    pub delay_ms: u64,
    /// Interval between repeats (milliseconds)
    pub interval_ms: u64,
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self {
            delay_ms: KEY_REPEAT_DELAY_MS,
            interval_ms: KEY_REPEAT_INTERVAL_MS,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    pub width: i32,
    pub height: i32,
    /// Simulation ticks per second
    pub tick_rate: u32,

    // === Tuning ===
    pub xspeed_init: i32,
    pub yspeed_init: i32,
    pub bat_speed: i32,
    pub max_lives: u32,
    /// RNG seed for respawn positions (clock-derived when absent)
    pub seed: Option<u64>,

    // === Input ===
    /// `None` disables auto-repeat: only key presses move the bat
    pub key_repeat: Option<KeyRepeat>,

    // === Presentation ===
    /// How long the splash is shown before the intro prompt
    pub splash_ms: u64,
    /// Flat fill used when no background art is available
    pub background_fill: [u8; 3],
    /// Bell on bounces
    pub sound: bool,
    pub assets: AssetManifest,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
            tick_rate: TICK_RATE,

            xspeed_init: XSPEED_INIT,
            yspeed_init: YSPEED_INIT,
            bat_speed: BAT_SPEED,
            max_lives: MAX_LIVES,
            seed: None,

            key_repeat: Some(KeyRepeat::default()),

            splash_ms: SPLASH_MS,
            background_fill: BACKGROUND_FILL,
            sound: true,
            assets: AssetManifest::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                let settings: Settings =
                    serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                        path: path.to_path_buf(),
                        source,
                    })?;
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::EmptyPlayArea {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.assets.brick.is_empty() {
            return Err(ConfigError::EmptySprite { sprite: "brick" });
        }
        if self.assets.bat.is_empty() {
            return Err(ConfigError::EmptySprite { sprite: "bat" });
        }
        if self.assets.ball_radius <= 0 {
            return Err(ConfigError::EmptySprite { sprite: "ball" });
        }

        let usable = self.width - 2 * WALL_MARGIN;
        if usable < self.assets.brick.width {
            return Err(ConfigError::WallTooNarrow {
                usable,
                brick_width: self.assets.brick.width,
            });
        }
        if self.assets.bat.width > self.width {
            return Err(ConfigError::BatTooWide {
                bat_width: self.assets.bat.width,
                play_width: self.width,
            });
        }
        if self.assets.bat.height.saturating_add(BAT_BOTTOM_GAP) > self.height {
            return Err(ConfigError::BatTooTall {
                bat_height: self.assets.bat.height,
                play_height: self.height,
            });
        }
        let diameter = self.assets.ball_radius.saturating_mul(2);
        let limit = self.width.min(self.height);
        if diameter >= limit {
            return Err(ConfigError::BallTooLarge { diameter, limit });
        }

        if self.xspeed_init == 0 {
            return Err(ConfigError::ZeroSpeed { axis: 'x' });
        }
        if self.yspeed_init == 0 {
            return Err(ConfigError::ZeroSpeed { axis: 'y' });
        }
        if self.bat_speed == 0 {
            return Err(ConfigError::ZeroBatSpeed);
        }
        if self.max_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        Ok(())
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.width, self.height)
    }

    /// Splash duration in ticks
    pub fn splash_ticks(&self) -> u32 {
        ms_to_ticks(self.splash_ms, self.tick_rate)
    }

    /// Seed for this run: configured, or taken from the system clock
    pub fn run_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5EED)
        })
    }
}
