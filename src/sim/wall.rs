//! Wall layout generation
//!
//! Bricks are laid left to right from the top-left margin, wrapping to a new
//! row whenever the next brick would cross the right margin. Rows are never
//! capped: high levels on narrow play areas grow the wall downward.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::assets::SpriteSize;
use crate::consts::{BRICKS_PER_ROW_UNIT, WALL_MARGIN, WALL_TOP};

/// A single brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
}

/// The active bricks of the current level, in placement order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wall {
    bricks: Vec<Brick>,
}

impl Wall {
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Index of the first brick (in placement order) overlapping `rect`
    pub fn first_hit(&self, rect: &Rect) -> Option<usize> {
        self.bricks.iter().position(|b| b.rect.intersects(rect))
    }

    /// Remove a brick, preserving the order of the rest
    pub fn remove(&mut self, index: usize) -> Brick {
        self.bricks.remove(index)
    }

    /// Lowest brick edge, if any bricks remain
    pub fn bottom(&self) -> Option<i32> {
        self.bricks.iter().map(|b| b.rect.bottom()).max()
    }
}

impl FromIterator<Brick> for Wall {
    fn from_iter<I: IntoIterator<Item = Brick>>(iter: I) -> Self {
        Self {
            bricks: iter.into_iter().collect(),
        }
    }
}

/// Number of bricks in the wall for `level`
pub fn brick_count(level: u32) -> usize {
    BRICKS_PER_ROW_UNIT * (1 + level as usize)
}

/// Lay out the wall for `level` in a play area `play_width` wide
pub fn build_wall(play_width: i32, level: u32, brick: SpriteSize) -> Wall {
    let count = brick_count(level);
    let mut bricks = Vec::with_capacity(count);
    let mut x = WALL_MARGIN;
    let mut y = WALL_TOP;

    for _ in 0..count {
        if x + brick.width > play_width - WALL_MARGIN {
            x = WALL_MARGIN;
            y += brick.height;
        }
        bricks.push(Brick {
            rect: Rect::new(x, y, brick.width, brick.height),
        });
        x += brick.width;
    }

    log::debug!(
        "Built level {} wall: {} bricks, bottom at {}",
        level,
        bricks.len(),
        y + brick.height
    );
    Wall { bricks }
}
