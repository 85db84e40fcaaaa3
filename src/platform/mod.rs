//! Platform abstraction layer
//!
//! The frame loop talks to the outside world through these traits:
//! - `Presenter`: puts frames on a screen
//! - `InputSource`: non-blocking stream of input events
//!
//! `terminal` implements both on top of crossterm.

pub mod terminal;

use std::io;

use crate::input::InputEvent;
use crate::renderer::Frame;
use crate::sim::Playfield;

pub use terminal::{TerminalInput, TerminalPresenter};

/// A display surface
pub trait Presenter {
    /// Size of the play area this surface shows
    fn surface_size(&self) -> Playfield;

    /// Draw one frame
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

/// A source of player input
pub trait InputSource {
    /// Drain pending events without blocking
    fn poll(&mut self) -> io::Result<Vec<InputEvent>>;

    /// Whether key releases are reported; without them held-key repeat
    /// cannot tell when to stop
    fn reports_releases(&self) -> bool {
        true
    }
}
