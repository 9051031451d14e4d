use std::time::Duration;

use super::input::InputMode;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No clip selected yet.
    Idle,
    /// A clip is selected and the player is typing.
    Playing,
    /// A unique title came up and is being scored.
    Resolving(Resolution),
    /// Every clip in the pool was identified.
    Done,
    /// The player quit.
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct,
    Incorrect,
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Snapshot of everything the frontend needs to draw one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub mode: InputMode,
    pub phase: Phase,
    /// Every title, in numbering order.
    pub titles: Vec<String>,
    /// Titles still matching the typed letters (character-stream mode).
    pub candidates: Vec<String>,
    /// Typed letters, or the pending line in line-buffered mode.
    pub buffer: String,
    pub correct: usize,
    pub total: usize,
    pub remaining: usize,
    /// True while the playback worker is running.
    pub playing: bool,
    pub clip_length: Option<Duration>,
    pub status: Option<StatusMessage>,
    /// The correct title, only filled in debug mode.
    pub answer: Option<String>,
}

impl SessionView {
    /// Progress line in the same words the game has always used.
    pub fn progress(&self) -> String {
        format!(
            "Asking {} questions: {} answered correctly so far.",
            self.total, self.correct
        )
    }
}
