//! Character-cell rasterizer
//!
//! Scales a `Frame` from play-area units onto a grid of terminal cells.
//! Rectangles always cover at least one cell so small sprites stay visible.

use glam::IVec2;

use super::{DrawCommand, Frame, TextSize};
use crate::assets::{Background, TextArt};
use crate::sim::{Playfield, Rect};

pub type Rgb = [u8; 3];

const BLACK: Rgb = [0, 0, 0];
const WHITE: Rgb = [0xFF, 0xFF, 0xFF];
const ART_FG: Rgb = [0x70, 0x80, 0x80];
const BRICK_COLORS: [Rgb; 2] = [[0xB2, 0x22, 0x22], [0xCD, 0x5C, 0x5C]];
const BALL_COLOR: Rgb = [0xFF, 0x8C, 0x00];
const BAT_COLOR: Rgb = [0xC0, 0xC0, 0xC0];
const BANNER_COLOR: Rgb = [0xFF, 0xD7, 0x00];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: WHITE,
        bg: BLACK,
    };
}

/// Half-open cell range covered by a rectangle
struct Span {
    cols: (u16, u16),
    rows: (u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// One row of cells
    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        self.cells.get(start..start + self.cols as usize).unwrap_or(&[])
    }

    /// The characters of one row
    #[cfg(test)]
    fn row_text(&self, row: u16) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// Rasterize a frame, replacing the current contents
    pub fn draw(&mut self, frame: &Frame) {
        self.clear();
        let field = frame.field;
        for command in &frame.commands {
            match command {
                DrawCommand::Background(Background::Fill(rgb)) => {
                    self.cells.fill(Cell {
                        ch: ' ',
                        fg: WHITE,
                        bg: *rgb,
                    });
                }
                DrawCommand::Background(Background::Art(art)) => self.tile(art),
                DrawCommand::Splash(art) => self.center_art(art),
                DrawCommand::Brick { rect, index } => {
                    let color = BRICK_COLORS[index % BRICK_COLORS.len()];
                    self.fill_rect(field, rect, '█', color);
                }
                DrawCommand::Ball(rect) => self.fill_rect(field, rect, '█', BALL_COLOR),
                DrawCommand::Bat(rect) => self.fill_rect(field, rect, '▀', BAT_COLOR),
                DrawCommand::Text { text, center, size } => {
                    let fg = match size {
                        TextSize::Hud => WHITE,
                        TextSize::Banner => BANNER_COLOR,
                    };
                    self.text(field, text, *center, fg);
                }
            }
        }
    }

    fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if col < self.cols && row < self.rows {
            self.cells[row as usize * self.cols as usize + col as usize] = cell;
        }
    }

    fn scale(value: i32, cells: u16, extent: i32) -> i64 {
        (value as i64 * cells as i64).div_euclid(extent.max(1) as i64)
    }

    fn scale_up(value: i32, cells: u16, extent: i32) -> i64 {
        let extent = extent.max(1) as i64;
        (value as i64 * cells as i64 + extent - 1).div_euclid(extent)
    }

    fn span(&self, field: Playfield, rect: &Rect) -> Option<Span> {
        let c0 = Self::scale(rect.left(), self.cols, field.width);
        let c1 = Self::scale_up(rect.right(), self.cols, field.width).max(c0 + 1);
        let r0 = Self::scale(rect.top(), self.rows, field.height);
        let r1 = Self::scale_up(rect.bottom(), self.rows, field.height).max(r0 + 1);

        let clamp_c = |v: i64| v.clamp(0, self.cols as i64) as u16;
        let clamp_r = |v: i64| v.clamp(0, self.rows as i64) as u16;
        let span = Span {
            cols: (clamp_c(c0), clamp_c(c1)),
            rows: (clamp_r(r0), clamp_r(r1)),
        };
        (span.cols.0 < span.cols.1 && span.rows.0 < span.rows.1).then_some(span)
    }

    fn fill_rect(&mut self, field: Playfield, rect: &Rect, ch: char, fg: Rgb) {
        let Some(span) = self.span(field, rect) else {
            return;
        };
        for row in span.rows.0..span.rows.1 {
            for col in span.cols.0..span.cols.1 {
                let bg = self.get(col, row).map_or(BLACK, |c| c.bg);
                self.set(col, row, Cell { ch, fg, bg });
            }
        }
    }

    /// Text on a black strip with one cell of padding each side
    fn text(&mut self, field: Playfield, text: &str, center: IVec2, fg: Rgb) {
        let row = Self::scale(center.y, self.rows, field.height);
        if row < 0 || row >= self.rows as i64 {
            return;
        }
        let row = row as u16;
        let chars: Vec<char> = text.chars().collect();
        let center_col = Self::scale(center.x, self.cols, field.width);
        let start = center_col - chars.len() as i64 / 2 - 1;

        let padded = std::iter::once(' ')
            .chain(chars.iter().copied())
            .chain(std::iter::once(' '));
        for (i, ch) in padded.enumerate() {
            let col = start + i as i64;
            if (0..self.cols as i64).contains(&col) {
                self.set(col as u16, row, Cell { ch, fg, bg: BLACK });
            }
        }
    }

    fn tile(&mut self, art: &TextArt) {
        let lines: Vec<Vec<char>> = art.lines.iter().map(|l| l.chars().collect()).collect();
        let width = art.width().max(1);
        for row in 0..self.rows {
            let line = &lines[row as usize % lines.len().max(1)];
            for col in 0..self.cols {
                let ch = line.get(col as usize % width).copied().unwrap_or(' ');
                self.set(
                    col,
                    row,
                    Cell {
                        ch,
                        fg: ART_FG,
                        bg: BLACK,
                    },
                );
            }
        }
    }

    fn center_art(&mut self, art: &TextArt) {
        let left = (self.cols as i64 - art.width() as i64) / 2;
        let top = (self.rows as i64 - art.height() as i64) / 2;
        for (r, line) in art.lines.iter().enumerate() {
            let row = top + r as i64;
            for (c, ch) in line.chars().enumerate() {
                let col = left + c as i64;
                if (0..self.cols as i64).contains(&col) && (0..self.rows as i64).contains(&row) {
                    self.set(col as u16, row as u16, Cell { ch, fg: WHITE, bg: BLACK });
                }
            }
        }
    }
}
