//! Audio output
//!
//! The game only needs a bounce cue and background music on/off. Failures
//! are logged and otherwise ignored: audio never stops the game.

use std::io::Write;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball bounced off a wall, the bat, or a brick
    Bounce,
}

impl SoundEffect {
    /// The cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Bounce(_) | GameEvent::BrickHit { .. } => Some(SoundEffect::Bounce),
            _ => None,
        }
    }
}

/// Somewhere to send sounds
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    /// Start or stop the looping background music
    fn set_music(&mut self, playing: bool);
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect)
    }

    fn set_music(&mut self, playing: bool) {
        (**self).set_music(playing)
    }
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
    fn set_music(&mut self, _playing: bool) {}
}

/// Rings the terminal bell for sound effects
pub struct Bell<W: Write> {
    out: W,
    muted: bool,
    music: bool,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W, muted: bool) -> Self {
        Self {
            out,
            muted,
            music: false,
        }
    }

    #[cfg(test)]
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    #[cfg(test)]
    fn music_playing(&self) -> bool {
        self.music
    }
}

impl<W: Write> AudioSink for Bell<W> {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        match effect {
            SoundEffect::Bounce => {
                if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
                    log::warn!("Bell failed ({}), audio disabled", e);
                    self.muted = true;
                }
            }
        }
    }

    fn set_music(&mut self, playing: bool) {
        if playing != self.music {
            // No music channel on a terminal
            log::debug!("Background music {}", if playing { "on" } else { "off" });
            self.music = playing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Surface;

    #[test]
    fn test_bounce_and_brick_hits_make_sound() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Bounce(Surface::Bat)),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BrickHit { score: 10 }),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::LifeLost { lives: 2 }), None);
    }

    #[test]
    fn test_bell_writes_bel() {
        let mut bell = Bell::new(Vec::new(), false);
        bell.play(SoundEffect::Bounce);
        bell.play(SoundEffect::Bounce);
        assert_eq!(bell.out, b"\x07\x07");

        bell.set_muted(true);
        bell.play(SoundEffect::Bounce);
        assert_eq!(bell.out.len(), 2);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no tty"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_bell_failure_is_ignored() {
        let mut bell = Bell::new(Broken, false);
        bell.play(SoundEffect::Bounce);
        assert!(bell.muted);
        bell.set_music(true);
        assert!(bell.music_playing());
    }
}
