//! Draw command lists
//!
//! Each frame the game state is turned into an ordered list of draw commands
//! in play-area coordinates. Presenters decide how to put them on screen.

pub mod canvas;

use std::rc::Rc;

use glam::IVec2;

use crate::assets::{Background, TextArt};
use crate::sim::{GamePhase, GameState, Playfield, Rect};

pub use canvas::{Canvas, Cell};

/// Text size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Score, lives and level readouts
    Hud,
    /// Full-screen prompts
    Banner,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Background),
    /// Full-screen splash artwork
    Splash(Rc<TextArt>),
    Brick { rect: Rect, index: usize },
    Ball(Rect),
    Bat(Rect),
    /// Text on a black box, centred on `center`
    Text {
        text: String,
        center: IVec2,
        size: TextSize,
    },
}

/// Everything to draw for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub field: Playfield,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    #[cfg(test)]
    fn brick_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Brick { .. }))
            .count()
    }
}

pub const TITLE: &str = "BRICKBAT";
pub const START_PROMPT: &str = "Press SPACE to START";
pub const PAUSED_PROMPT: &str = "Paused - Press P to RESUME";
pub const GAME_OVER_PROMPT: &str = "Game Over - Press R to RESTART";

/// Horizontal inset of the score and lives readouts
const HUD_INSET: i32 = 100;
const HUD_Y: i32 = 30;

/// Builds frames from game state using the resolved artwork
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    background: Background,
    splash: Option<Rc<TextArt>>,
}

impl FrameBuilder {
    pub fn new(background: Background, splash: Option<Rc<TextArt>>) -> Self {
        Self { background, splash }
    }

    pub fn build(&self, state: &GameState) -> Frame {
        let field = state.field;
        let mut commands = Vec::new();

        match state.phase {
            GamePhase::Start { .. } => match &self.splash {
                Some(art) => commands.push(DrawCommand::Splash(Rc::clone(art))),
                None => {
                    commands.push(DrawCommand::Background(self.background.clone()));
                    commands.push(banner(TITLE, field));
                }
            },
            GamePhase::Intro => {
                commands.push(DrawCommand::Background(self.background.clone()));
                commands.push(banner(START_PROMPT, field));
            }
            GamePhase::Playing => self.scene(state, &mut commands),
            GamePhase::Paused => {
                self.scene(state, &mut commands);
                commands.push(banner(PAUSED_PROMPT, field));
            }
            GamePhase::GameOver => {
                self.scene(state, &mut commands);
                commands.push(banner(GAME_OVER_PROMPT, field));
            }
        }

        Frame { field, commands }
    }

    /// Background, HUD, bricks, ball, bat (back to front)
    fn scene(&self, state: &GameState, commands: &mut Vec<DrawCommand>) {
        let field = state.field;
        commands.push(DrawCommand::Background(self.background.clone()));
        commands.push(hud(format!("Score: {}", state.score), HUD_INSET));
        commands.push(hud(format!("Lives: {}", state.lives), field.width - HUD_INSET));
        commands.push(hud(format!("Level: {}", state.level), field.width / 2));

        commands.extend(
            state
                .wall
                .bricks()
                .iter()
                .enumerate()
                .map(|(index, b)| DrawCommand::Brick {
                    rect: b.rect,
                    index,
                }),
        );
        commands.push(DrawCommand::Ball(state.ball.rect));
        commands.push(DrawCommand::Bat(state.bat.rect));
    }
}

fn hud(text: String, x: i32) -> DrawCommand {
    DrawCommand::Text {
        text,
        center: IVec2::new(x, HUD_Y),
        size: TextSize::Hud,
    }
}

fn banner(text: &str, field: Playfield) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_string(),
        center: IVec2::new(field.width / 2, field.height / 2),
        size: TextSize::Banner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BACKGROUND_FILL;
    use crate::sim::Tuning;

    fn state_in(phase: GamePhase) -> GameState {
        let mut state = GameState::new(Tuning::default(), Playfield::new(800, 600), 1, 10);
        state.phase = phase;
        state
    }

    fn builder() -> FrameBuilder {
        FrameBuilder::new(Background::Fill(BACKGROUND_FILL), None)
    }

    #[test]
    fn test_playing_frame_layers() {
        let frame = builder().build(&state_in(GamePhase::Playing));
        assert!(matches!(frame.commands[0], DrawCommand::Background(_)));
        assert_eq!(
            frame.texts().collect::<Vec<_>>(),
            vec!["Score: 0", "Lives: 5", "Level: 1"]
        );
        assert_eq!(frame.brick_count(), 20);

        let n = frame.commands.len();
        assert!(matches!(frame.commands[n - 2], DrawCommand::Ball(_)));
        assert!(matches!(frame.commands[n - 1], DrawCommand::Bat(_)));
    }

    #[test]
    fn test_hud_positions() {
        let frame = builder().build(&state_in(GamePhase::Playing));
        let centers: Vec<IVec2> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(
            centers,
            vec![IVec2::new(100, 30), IVec2::new(700, 30), IVec2::new(400, 30)]
        );
    }

    #[test]
    fn test_start_without_splash_shows_title() {
        let frame = builder().build(&state_in(GamePhase::Start { ticks_left: 5 }));
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec![TITLE]);
    }

    #[test]
    fn test_start_with_splash_shows_art_only() {
        let art = Rc::new(TextArt::parse("##\n##"));
        let builder = FrameBuilder::new(Background::Fill(BACKGROUND_FILL), Some(art));
        let frame = builder.build(&state_in(GamePhase::Start { ticks_left: 5 }));
        assert_eq!(frame.commands.len(), 1);
        assert!(matches!(frame.commands[0], DrawCommand::Splash(_)));
    }

    #[test]
    fn test_prompts_per_phase() {
        let intro = builder().build(&state_in(GamePhase::Intro));
        assert_eq!(intro.texts().last(), Some(START_PROMPT));
        assert_eq!(intro.brick_count(), 0);

        let over = builder().build(&state_in(GamePhase::GameOver));
        assert_eq!(over.texts().last(), Some(GAME_OVER_PROMPT));
        assert_eq!(over.brick_count(), 20);

        let paused = builder().build(&state_in(GamePhase::Paused));
        assert_eq!(paused.texts().last(), Some(PAUSED_PROMPT));
    }
}
