//! Collision detection and response
//!
//! Everything is an axis-aligned rectangle and every response is a velocity
//! sign flip. Checks run in a fixed order each tick:
//!
//! 1. side walls, 2. ceiling, 3. floor (ends the tick), 4. first overlapping
//!    brick, 5. bat.
//!
//! Brick impacts use a center heuristic rather than penetration depth: if the
//! ball's center x lies outside the brick's horizontal span it is a side hit,
//! otherwise a top/bottom hit. Corner hits can be misjudged.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Bat, Playfield};
use super::wall::{Brick, Wall};

/// Non-destructible surface the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    SideWall,
    Ceiling,
    Bat,
}

/// Which part of a brick the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickFace {
    /// Left or right edge: x velocity flips
    Side,
    /// Top or bottom edge: y velocity flips
    TopOrBottom,
}

/// Outcome of one collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    Bounce(Surface),
    /// Brick removed from the wall; `index` is its position before removal
    BrickHit {
        index: usize,
        brick: Brick,
        face: BrickFace,
    },
    /// Ball fell past the bottom of the play area
    LifeLost,
}

/// Tracks which velocity axes already flipped this tick
#[derive(Debug, Default)]
struct AxisFlips {
    x: bool,
    y: bool,
}

impl AxisFlips {
    fn flip_x(&mut self, ball: &mut Ball) {
        if !self.x {
            ball.flip_x();
            self.x = true;
        }
    }

    fn flip_y(&mut self, ball: &mut Ball) {
        if !self.y {
            ball.flip_y();
            self.y = true;
        }
    }
}

/// Classify a ball/brick impact by the ball's center x
pub fn brick_face(ball: &Ball, brick: &Brick) -> BrickFace {
    let cx = ball.rect.center_x();
    if cx > brick.rect.right() || cx < brick.rect.left() {
        BrickFace::Side
    } else {
        BrickFace::TopOrBottom
    }
}

/// Resolve all collisions for one tick, after the ball has moved.
///
/// Flips ball velocity and removes at most one brick from the wall. Each axis
/// flips at most once per tick; later hits on the same axis are still
/// reported. Score, lives and level are left to the caller.
pub fn resolve(ball: &mut Ball, bat: &Bat, wall: &mut Wall, field: Playfield) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let mut flips = AxisFlips::default();

    if ball.rect.left() < 0 || ball.rect.right() > field.width {
        flips.flip_x(ball);
        events.push(CollisionEvent::Bounce(Surface::SideWall));
    }

    if ball.rect.top() < 0 {
        flips.flip_y(ball);
        events.push(CollisionEvent::Bounce(Surface::Ceiling));
    }

    if ball.rect.top() > field.height {
        events.push(CollisionEvent::LifeLost);
        return events;
    }

    if let Some(index) = wall.first_hit(&ball.rect) {
        let brick = wall.remove(index);
        let face = brick_face(ball, &brick);
        match face {
            BrickFace::Side => flips.flip_x(ball),
            BrickFace::TopOrBottom => flips.flip_y(ball),
        }
        events.push(CollisionEvent::BrickHit { index, brick, face });
    }

    if ball.rect.intersects(&bat.rect) {
        flips.flip_y(ball);
        events.push(CollisionEvent::Bounce(Surface::Bat));
    }

    events
}
