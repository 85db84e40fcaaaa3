//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, integer motion
//! - Seeded RNG only
//! - Stable iteration order (bricks in placement order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wall;

pub use collision::{BrickFace, CollisionEvent, Surface, resolve};
pub use rect::Rect;
pub use state::{Ball, Bat, GameEvent, GamePhase, GameState, Playfield, Tuning};
pub use tick::{Move, TickInput, tick};
pub use wall::{Brick, Wall, brick_count, build_wall};
