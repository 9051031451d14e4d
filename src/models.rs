//! Plain data types passed between the library, the session and the UI.
//! They stay light-weight so the other layers can focus on matching,
//! playback and presentation.

use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies one playable clip. The id is the clip's path on disk; the
/// library guarantees every id maps to exactly one song title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClipId(PathBuf);

impl ClipId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ClipId {
    /// Show only the file name; full paths clutter the status line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.file_name() {
            Some(name) => write!(f, "{}", name.to_string_lossy()),
            None => write!(f, "{}", self.0.display()),
        }
    }
}

impl From<&str> for ClipId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Final tally handed back to the binary once a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// True only when every clip in the pool was identified.
    pub completed: bool,
    pub correct: usize,
    pub total: usize,
    /// Clips still unguessed when the session ended (zero when completed).
    pub unguessed: usize,
}

impl Outcome {
    /// Closing line printed after the terminal is restored.
    pub fn farewell(&self) -> String {
        if self.completed {
            format!(
                "Congratulations! You've guessed all the tunes correctly! ({}/{})",
                self.correct, self.total
            )
        } else {
            format!(
                "Thanks for playing! {} of {} answered correctly.",
                self.correct, self.total
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_id_displays_file_name() {
        let clip = ClipId::new("audio_files/beaver_creek_1.mp3");
        assert_eq!(clip.to_string(), "beaver_creek_1.mp3");
    }

    #[test]
    fn farewell_depends_on_completion() {
        let done = Outcome {
            completed: true,
            correct: 2,
            total: 2,
            unguessed: 0,
        };
        assert!(done.farewell().starts_with("Congratulations!"));

        let quit = Outcome {
            completed: false,
            correct: 1,
            total: 3,
            unguessed: 2,
        };
        assert_eq!(quit.farewell(), "Thanks for playing! 1 of 3 answered correctly.");
    }
}
