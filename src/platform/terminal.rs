//! Terminal backend (crossterm)
//!
//! The presenter owns raw mode and the alternate screen for its lifetime and
//! restores the terminal on drop. Input asks the terminal for key release
//! events when it supports them.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use super::{InputSource, Presenter};
use crate::input::{Command, InputEvent};
use crate::renderer::canvas::Rgb;
use crate::renderer::{Canvas, Frame};
use crate::sim::Playfield;

/// Draws frames into the terminal, scaled to its current size
pub struct TerminalPresenter {
    out: Stdout,
    field: Playfield,
    canvas: Canvas,
}

impl TerminalPresenter {
    pub fn new(field: Playfield) -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;
        let (cols, rows) = terminal::size()?;
        log::info!("Terminal {}x{} cells for a {}x{} play area", cols, rows, field.width, field.height);
        Ok(Self {
            out,
            field,
            canvas: Canvas::new(cols, rows),
        })
    }
}

impl Drop for TerminalPresenter {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            EnableLineWrap,
            cursor::Show,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb[0],
        g: rgb[1],
        b: rgb[2],
    }
}

impl Presenter for TerminalPresenter {
    fn surface_size(&self) -> Playfield {
        self.field
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if cols != self.canvas.cols() || rows != self.canvas.rows() {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            self.canvas = Canvas::new(cols, rows);
        }
        self.canvas.draw(frame);

        queue!(self.out, BeginSynchronizedUpdate)?;
        let mut pen: Option<(Rgb, Rgb)> = None;
        for row in 0..self.canvas.rows() {
            queue!(self.out, cursor::MoveTo(0, row))?;
            for cell in self.canvas.row(row) {
                if pen != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        SetForegroundColor(color(cell.fg)),
                        SetBackgroundColor(color(cell.bg))
                    )?;
                    pen = Some((cell.fg, cell.bg));
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()
    }
}

/// Keyboard input from the terminal
pub struct TerminalInput {
    /// Press/release reporting was enabled on the terminal
    enhanced: bool,
}

impl TerminalInput {
    pub fn new() -> io::Result<Self> {
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            log::info!("Terminal does not report key releases, using its own key repeat");
        }
        Ok(Self { enhanced })
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(ev) = map_key(key, self.enhanced) {
                    events.push(ev);
                }
            }
        }
        Ok(events)
    }

    fn reports_releases(&self) -> bool {
        self.enhanced
    }
}

fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        _ => None,
    }
}

/// Translate a key event. With release reporting on, terminal auto-repeats
/// are dropped because the input controller repeats held keys itself.
fn map_key(key: KeyEvent, enhanced: bool) -> Option<InputEvent> {
    let command = command_for(key.code, key.modifiers)?;
    match key.kind {
        KeyEventKind::Press => Some(InputEvent::Press(command)),
        KeyEventKind::Release => Some(InputEvent::Release(command)),
        KeyEventKind::Repeat if enhanced => None,
        KeyEventKind::Repeat => Some(InputEvent::Press(command)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_bindings() {
        let press = |code| map_key(key(code, KeyEventKind::Press), true);
        assert_eq!(press(KeyCode::Left), Some(InputEvent::Press(Command::MoveLeft)));
        assert_eq!(press(KeyCode::Right), Some(InputEvent::Press(Command::MoveRight)));
        assert_eq!(press(KeyCode::Char(' ')), Some(InputEvent::Press(Command::Confirm)));
        assert_eq!(press(KeyCode::Char('r')), Some(InputEvent::Press(Command::Restart)));
        assert_eq!(press(KeyCode::Char('p')), Some(InputEvent::Press(Command::Pause)));
        assert_eq!(press(KeyCode::Esc), Some(InputEvent::Press(Command::Quit)));
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut ev = key(KeyCode::Char('c'), KeyEventKind::Press);
        ev.modifiers = KeyModifiers::CONTROL;
        assert_eq!(map_key(ev, false), Some(InputEvent::Press(Command::Quit)));
    }

    #[test]
    fn test_repeat_handling_depends_on_release_support() {
        let repeat = key(KeyCode::Left, KeyEventKind::Repeat);
        assert_eq!(map_key(repeat, true), None);
        assert_eq!(
            map_key(repeat, false),
            Some(InputEvent::Press(Command::MoveLeft))
        );
        assert_eq!(
            map_key(key(KeyCode::Left, KeyEventKind::Release), true),
            Some(InputEvent::Release(Command::MoveLeft))
        );
    }
}
