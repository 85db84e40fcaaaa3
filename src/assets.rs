//! Asset manifest
//!
//! The simulation only needs sprite dimensions; pixel content is the
//! presenter's business. Optional artwork (background, splash) is plain-text
//! art that the terminal presenter tiles or centres.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Width and height of a sprite in play-area units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: i32,
    pub height: i32,
}

impl SpriteSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Sprite dimensions plus optional artwork paths.
/// Loaded from a JSON file at runtime or taken from defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub brick: SpriteSize,
    /// Ball radius; the ball sprite is a 2r x 2r square
    pub ball_radius: i32,
    pub bat: SpriteSize,
    /// Background art tiled behind the play area
    pub background: Option<PathBuf>,
    /// Splash art shown before the intro prompt
    pub splash: Option<PathBuf>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            brick: SpriteSize::new(BRICK_WIDTH, BRICK_HEIGHT),
            ball_radius: BALL_RADIUS,
            bat: SpriteSize::new(BAT_WIDTH, BAT_HEIGHT),
            background: None,
            splash: None,
        }
    }
}

impl AssetManifest {
    pub fn ball_size(&self) -> SpriteSize {
        let diameter = self.ball_radius.saturating_mul(2);
        SpriteSize::new(diameter, diameter)
    }

    /// Resolve the background; a missing or unreadable file falls back to a flat fill.
    pub fn background(&self, fill: [u8; 3]) -> Background {
        match self.background.as_deref().and_then(load_art) {
            Some(art) => Background::Art(art),
            None => Background::Fill(fill),
        }
    }

    pub fn splash(&self) -> Option<Rc<TextArt>> {
        self.splash.as_deref().and_then(load_art)
    }
}

/// Multi-line text artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArt {
    pub lines: Vec<String>,
}

impl TextArt {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(|l| l.trim_end().to_string()).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }
}

/// What to draw behind everything else
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Fill([u8; 3]),
    Art(Rc<TextArt>),
}

fn load_art(path: &Path) -> Option<Rc<TextArt>> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let art = TextArt::parse(&text);
            if art.is_empty() {
                log::info!("Art {} is empty, ignoring", path.display());
                None
            } else {
                log::info!("Loaded art {} ({}x{})", path.display(), art.width(), art.height());
                Some(Rc::new(art))
            }
        }
        Err(e) => {
            log::info!("No art at {} ({}), using fallback", path.display(), e);
            None
        }
    }
}
