use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::warn;

use super::draw::draw_session;
use crate::session::{Frontend, Key, SessionView};

/// Raw-mode terminal that reads single key presses and draws the game.
///
/// Raw mode and the alternate screen are held for the lifetime of the value;
/// [`TerminalFrontend::restore`] gives them back, and dropping the value does
/// the same if that was not done already.
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    last_view: Option<SessionView>,
    restored: bool,
}

impl TerminalFrontend {
    /// Switch the terminal into raw mode on the alternate screen.
    pub fn enter() -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("failed to create terminal backend")?;
        Ok(Self {
            terminal,
            last_view: None,
            restored: false,
        })
    }

    /// Leave raw mode and the alternate screen. Safe to call twice.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("failed to leave alternate screen")?;
        self.terminal
            .show_cursor()
            .context("failed to restore cursor visibility")
    }

    fn draw(&mut self, view: &SessionView) -> Result<()> {
        self.terminal
            .draw(|frame| draw_session(frame, view))
            .context("failed to draw frame")?;
        Ok(())
    }
}

impl Frontend for TerminalFrontend {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            match event::read().context("failed to read event")? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if let Some(key) = map_key(key_event) {
                        return Ok(key);
                    }
                }
                Event::Resize(_, _) => {
                    if let Some(view) = self.last_view.take() {
                        self.draw(&view)?;
                        self.last_view = Some(view);
                    }
                }
                _ => {}
            }
        }
    }

    fn render(&mut self, view: &SessionView) -> Result<()> {
        self.draw(view)?;
        self.last_view = Some(view.clone());
        Ok(())
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "terminal restore failed");
        }
    }
}

/// Translate a crossterm key press. Keys the game has no use for map to
/// `None`.
fn map_key(event: KeyEvent) -> Option<Key> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Key::Interrupt),
            _ => None,
        };
    }
    match event.code {
        KeyCode::Char(ch) => Some(Key::Char(ch)),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Esc),
        _ => None,
    }
}
