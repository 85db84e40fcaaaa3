//! Fixed-rate frame loop
//!
//! One iteration = poll input, advance one tick, dispatch sounds, present a
//! frame, then sleep out the rest of the frame budget. The splash, intro and
//! game-over waits are phases of the game state, so a scripted input source
//! can drive the whole loop.

use std::io;
use std::time::{Duration, Instant};

use crate::audio::{AudioSink, SoundEffect};
use crate::input::InputController;
use crate::platform::{InputSource, Presenter};
use crate::renderer::FrameBuilder;
use crate::sim::{GameEvent, GameState, tick};

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The player asked to quit
    Quit,
}

/// Paces the loop at a fixed rate
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        let period = Duration::from_secs(1) / tick_rate.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Sleep until the next frame is due. A late frame resets the schedule
    /// rather than trying to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

/// Drives a `GameState` with the given collaborators
pub struct Runner<P, I, A> {
    pub state: GameState,
    controller: InputController,
    frames: FrameBuilder,
    presenter: P,
    input: I,
    audio: A,
    tick_rate: u32,
    /// Background music loops from the first frame until quit
    music_on: bool,
}

impl<P, I, A> Runner<P, I, A>
where
    P: Presenter,
    I: InputSource,
    A: AudioSink,
{
    pub fn new(
        state: GameState,
        controller: InputController,
        frames: FrameBuilder,
        presenter: P,
        input: I,
        audio: A,
        tick_rate: u32,
    ) -> Self {
        Self {
            state,
            controller,
            frames,
            presenter,
            input,
            audio,
            tick_rate,
            music_on: false,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Run one frame. Returns `Some` when the loop should stop.
    pub fn step(&mut self) -> io::Result<Option<Exit>> {
        if !self.music_on {
            self.audio.set_music(true);
            self.music_on = true;
        }

        let events = self.input.poll()?;
        let frame_input = self.controller.frame_input(events);
        if frame_input.quit {
            log::info!(
                "Quit at level {} with score {}",
                self.state.level,
                self.state.score
            );
            self.audio.set_music(false);
            self.music_on = false;
            return Ok(Some(Exit::Quit));
        }

        for event in tick(&mut self.state, &frame_input.tick) {
            self.dispatch(&event);
        }

        let frame = self.frames.build(&self.state);
        self.presenter.present(&frame)?;
        Ok(None)
    }

    fn dispatch(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.audio.play(effect);
        }
        if matches!(event, GameEvent::Paused | GameEvent::GameOver { .. }) {
            self.controller.release_all();
        }
    }

    /// Loop at the tick rate until the player quits
    pub fn run(&mut self) -> io::Result<Exit> {
        log::info!(
            "Running at {} Hz, key repeat {}",
            self.tick_rate,
            if self.controller.repeats() { "on" } else { "off" }
        );
        let mut clock = FrameClock::new(self.tick_rate);
        loop {
            if let Some(exit) = self.step()? {
                return Ok(exit);
            }
            clock.wait();
        }
    }
}
