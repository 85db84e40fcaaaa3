//! Error types
//!
//! Invalid configuration is a startup failure; nothing in the frame loop
//! recovers from it.

use core::fmt;
use std::path::PathBuf;

/// A configuration value that makes the game unplayable
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPlayArea { width: i32, height: i32 },
    ZeroTickRate,
    EmptySprite { sprite: &'static str },
    WallTooNarrow { usable: i32, brick_width: i32 },
    BatTooWide { bat_width: i32, play_width: i32 },
    BatTooTall { bat_height: i32, play_height: i32 },
    /// `limit` is the smaller play-area dimension
    BallTooLarge { diameter: i32, limit: i32 },
    ZeroSpeed { axis: char },
    ZeroBatSpeed,
    ZeroLives,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlayArea { width, height } => {
                write!(f, "play area must be non-empty: got {width}x{height}")
            }
            Self::ZeroTickRate => write!(f, "tick rate must be at least 1"),
            Self::EmptySprite { sprite } => write!(f, "sprite `{sprite}` has a zero dimension"),
            Self::WallTooNarrow {
                usable,
                brick_width,
            } => write!(
                f,
                "wall needs room for one brick: usable width {usable}, brick width {brick_width}"
            ),
            Self::BatTooWide {
                bat_width,
                play_width,
            } => write!(f, "bat width {bat_width} exceeds play width {play_width}"),
            Self::BatTooTall {
                bat_height,
                play_height,
            } => write!(
                f,
                "bat height {bat_height} plus its bottom gap exceeds play height {play_height}"
            ),
            Self::BallTooLarge { diameter, limit } => {
                write!(f, "ball diameter {diameter} must be below {limit}")
            }
            Self::ZeroSpeed { axis } => write!(f, "initial {axis}-speed must be non-zero"),
            Self::ZeroBatSpeed => write!(f, "bat speed must be non-zero"),
            Self::ZeroLives => write!(f, "max lives must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure while loading a settings or manifest file
#[derive(Debug)]
pub enum SettingsError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(ConfigError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            Self::Invalid(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SettingsError {
    fn from(err: ConfigError) -> Self {
        Self::Invalid(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::EmptyPlayArea {
            width: 0,
            height: 600,
        };
        assert_eq!(err.to_string(), "play area must be non-empty: got 0x600");

        let err = ConfigError::BallTooLarge {
            diameter: 600,
            limit: 600,
        };
        assert_eq!(err.to_string(), "ball diameter 600 must be below 600");

        let err = SettingsError::from(ConfigError::ZeroLives);
        assert_eq!(
            err.to_string(),
            "invalid configuration: max lives must be at least 1"
        );
    }
}
