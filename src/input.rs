//! Discrete input commands and key repeat
//!
//! Input sources report presses and releases of abstract commands. The
//! controller folds one tick's worth of events into a `TickInput`, firing an
//! extra bat move at the configured repeat rate while a direction is held.

use crate::ms_to_ticks;
use crate::settings::KeyRepeat;
use crate::sim::{Move, TickInput};

/// Everything the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Pause,
    MoveLeft,
    MoveRight,
    Confirm,
    Restart,
}

impl Command {
    fn as_move(self) -> Option<Move> {
        match self {
            Command::MoveLeft => Some(Move::Left),
            Command::MoveRight => Some(Move::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Command),
    Release(Command),
}

/// Input for one frame: the tick commands plus whether to stop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub quit: bool,
    pub tick: TickInput,
}

#[derive(Debug, Clone, Copy)]
struct RepeatTicks {
    delay: u32,
    interval: u32,
}

#[derive(Debug, Clone, Copy)]
struct Held {
    mv: Move,
    /// Ticks until the next repeat fires
    countdown: u32,
}

/// Turns raw input events into per-tick commands
#[derive(Debug, Clone)]
pub struct InputController {
    repeat: Option<RepeatTicks>,
    held: Option<Held>,
}

impl InputController {
    pub fn new(repeat: Option<KeyRepeat>, tick_rate: u32) -> Self {
        let repeat = repeat.map(|r| RepeatTicks {
            delay: ms_to_ticks(r.delay_ms, tick_rate),
            interval: ms_to_ticks(r.interval_ms, tick_rate),
        });
        Self { repeat, held: None }
    }

    pub fn repeats(&self) -> bool {
        self.repeat.is_some()
    }

    /// Forget any held direction (e.g. when focus or phase changes)
    pub fn release_all(&mut self) {
        self.held = None;
    }

    /// Fold this tick's events into a `FrameInput`
    pub fn frame_input<I>(&mut self, events: I) -> FrameInput
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut frame = FrameInput::default();
        let mut pressed_now = false;

        for event in events {
            match event {
                InputEvent::Press(Command::Quit) => frame.quit = true,
                InputEvent::Press(Command::Pause) => frame.tick.pause = true,
                InputEvent::Press(Command::Confirm) => frame.tick.confirm = true,
                InputEvent::Press(Command::Restart) => frame.tick.restart = true,
                InputEvent::Press(cmd) => {
                    if let Some(mv) = cmd.as_move() {
                        frame.tick.moves.push(mv);
                        if let Some(repeat) = self.repeat {
                            self.held = Some(Held {
                                mv,
                                countdown: repeat.delay,
                            });
                            pressed_now = true;
                        }
                    }
                }
                InputEvent::Release(cmd) => {
                    if let (Some(mv), Some(held)) = (cmd.as_move(), self.held) {
                        if held.mv == mv {
                            self.held = None;
                        }
                    }
                }
            }
        }

        if !pressed_now {
            if let (Some(repeat), Some(held)) = (self.repeat, self.held.as_mut()) {
                held.countdown = held.countdown.saturating_sub(1);
                if held.countdown == 0 {
                    frame.tick.moves.push(held.mv);
                    held.countdown = repeat.interval;
                }
            }
        }

        frame
    }
}
