//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`; collision and wall
//! generation only see the pieces they need.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Surface;
use super::rect::Rect;
use super::wall::{Wall, build_wall};
use crate::assets::SpriteSize;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Splash shown for a fixed number of ticks, input ignored
    Start { ticks_left: u32 },
    /// Waiting for the player to confirm
    Intro,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Dimensions of the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Playfield {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Where the ball is placed after a level-up
    pub fn level_spawn(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 3)
    }

    /// Where the ball is placed at the start of a game
    pub fn game_spawn(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }
}

/// The ball: a square sprite moving at a constant integer velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// (xspeed, yspeed) in play-area units per tick
    pub vel: IVec2,
}

impl Ball {
    pub fn new(size: SpriteSize, center: IVec2, vel: IVec2) -> Self {
        let mut rect = Rect::of_size(size);
        rect.set_center(center);
        Self { rect, vel }
    }

    /// Move by one tick of velocity
    pub fn advance(&mut self) {
        self.rect.translate(self.vel);
    }

    pub fn flip_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn flip_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Grow both speed magnitudes by `amount`, keeping direction
    pub fn speed_up(&mut self, amount: i32) {
        self.vel.x += if self.vel.x > 0 { amount } else { -amount };
        self.vel.y += if self.vel.y > 0 { amount } else { -amount };
    }
}

/// The player's bat, fixed near the bottom of the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bat {
    pub rect: Rect,
}

impl Bat {
    pub fn new(size: SpriteSize, field: Playfield) -> Self {
        let mut rect = Rect::of_size(size);
        rect.set_mid_bottom(IVec2::new(field.width / 2, field.height - BAT_BOTTOM_GAP));
        Self { rect }
    }

    /// Shift horizontally, clamped to `[0, play_width - bat_width]`
    pub fn shift(&mut self, dx: i32, play_width: i32) {
        let max_x = (play_width - self.rect.width).max(0);
        self.rect.x = (self.rect.x + dx).clamp(0, max_x);
    }
}

/// Something the frame loop may want to react to (sound, logging, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Splash finished, intro prompt showing
    IntroShown,
    /// Player confirmed the intro
    Started,
    Paused,
    Resumed,
    Bounce(Surface),
    BrickHit { score: u32 },
    LifeLost { lives: u32 },
    LevelUp { level: u32 },
    GameOver { score: u32, level: u32 },
    Restarted,
}

/// Numbers the simulation needs from the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    pub xspeed_init: i32,
    pub yspeed_init: i32,
    pub bat_speed: i32,
    pub max_lives: u32,
    pub brick: SpriteSize,
    pub ball: SpriteSize,
    pub bat: SpriteSize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for Tuning {
    fn from(settings: &Settings) -> Self {
        Self {
            xspeed_init: settings.xspeed_init,
            yspeed_init: settings.yspeed_init,
            bat_speed: settings.bat_speed,
            max_lives: settings.max_lives,
            brick: settings.assets.brick,
            ball: settings.assets.ball_size(),
            bat: settings.assets.bat,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub field: Playfield,
    pub phase: GamePhase,
    pub score: u32,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub ball: Ball,
    pub bat: Bat,
    pub wall: Wall,
    /// Respawn randomness
    pub rng: Pcg32,
}

impl GameState {
    /// Create a game that starts on the splash screen
    pub fn new(tuning: Tuning, field: Playfield, seed: u64, splash_ticks: u32) -> Self {
        let mut state = Self {
            tuning,
            field,
            phase: GamePhase::Start {
                ticks_left: splash_ticks,
            },
            score: 0,
            level: 1,
            lives: tuning.max_lives,
            ball: Ball::new(tuning.ball, field.game_spawn(), IVec2::ZERO),
            bat: Bat::new(tuning.bat, field),
            wall: Wall::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_game();
        state.rebuild_wall();
        state
    }

    /// Build a state from validated settings
    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        Self::new(
            Tuning::from(settings),
            settings.playfield(),
            seed,
            settings.splash_ticks(),
        )
    }

    /// Restore score, level, lives and ball speeds to their initial values
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.level = 1;
        self.lives = self.tuning.max_lives;
        self.ball.vel = IVec2::new(self.tuning.xspeed_init, self.tuning.yspeed_init);
    }

    /// Full restart after game over: reset counters, fresh wall, ball centred
    pub fn restart(&mut self) {
        self.reset_game();
        self.rebuild_wall();
        self.ball.rect.set_center(self.field.game_spawn());
    }

    /// Replace the wall with the layout for the current level
    pub fn rebuild_wall(&mut self) {
        self.wall = build_wall(self.field.width, self.level, self.tuning.brick);
        if let Some(bottom) = self.wall.bottom() {
            if bottom > self.bat.rect.top() {
                log::warn!(
                    "Level {} wall reaches y={} past the bat at y={}",
                    self.level,
                    bottom,
                    self.bat.rect.top()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_splash() {
        let state = GameState::new(Tuning::default(), Playfield::new(800, 600), 7, 300);
        assert_eq!(state.phase, GamePhase::Start { ticks_left: 300 });
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.wall.len(), 20);
        assert_eq!(state.ball.rect.center(), IVec2::new(400, 300));
        assert_eq!(state.ball.vel, IVec2::new(XSPEED_INIT, YSPEED_INIT));
    }

    #[test]
    fn test_bat_starts_centred_above_bottom() {
        let bat = Bat::new(SpriteSize::new(120, 20), Playfield::new(800, 600));
        assert_eq!(bat.rect.center_x(), 400);
        assert_eq!(bat.rect.bottom(), 580);
    }

    #[test]
    fn test_bat_shift_clamps_to_play_area() {
        let mut bat = Bat::new(SpriteSize::new(120, 20), Playfield::new(800, 600));
        for _ in 0..100 {
            bat.shift(-30, 800);
        }
        assert_eq!(bat.rect.left(), 0);
        for _ in 0..100 {
            bat.shift(30, 800);
        }
        assert_eq!(bat.rect.right(), 800);
    }

    #[test]
    fn test_speed_up_preserves_sign() {
        let mut ball = Ball::new(SpriteSize::new(24, 24), IVec2::ZERO, IVec2::new(-10, 10));
        ball.speed_up(1);
        assert_eq!(ball.vel, IVec2::new(-11, 11));
    }

    #[test]
    fn test_reset_game_restores_initial_values() {
        let mut state = GameState::new(Tuning::default(), Playfield::new(800, 600), 7, 0);
        state.score = 1230;
        state.level = 4;
        state.lives = 1;
        state.ball.vel = IVec2::new(-13, -13);

        state.reset_game();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.ball.vel, IVec2::new(XSPEED_INIT, YSPEED_INIT));
    }
}
