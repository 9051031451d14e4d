//! Incremental prefix matching of typed letters against the song titles.
//!
//! The matcher is pure: it never owns the input buffer, it only computes the
//! next buffer and a verdict from the current one. Whether a resolved title
//! is the *right* answer is the session's call, since that depends on which
//! clip is playing.

use crate::library::SongLibrary;

/// One keystroke as far as matching is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessEvent {
    Letter(char),
    Backspace,
    Replay,
    Quit,
    /// A digit or any other character that cannot appear in a guess.
    Reject,
}

/// Classification of the buffer against the title set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    /// Empty buffer: nothing typed yet, nothing to show.
    Neutral,
    /// Several titles still start with the buffer.
    Ambiguous,
    /// No title starts with the buffer.
    NoMatch,
    /// The buffer was cleared because of a disallowed character.
    BadInput,
    /// Exactly one title is left.
    Resolved(&'a str),
}

/// Result of feeding one event to the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    pub buffer: String,
    /// Titles whose matching key starts with `buffer`, in library order.
    /// Empty while the buffer is empty.
    pub candidates: Vec<&'a str>,
    pub verdict: Verdict<'a>,
}

/// Prefix matcher over a library's titles.
#[derive(Debug, Clone, Copy)]
pub struct GuessMatcher<'a> {
    library: &'a SongLibrary,
}

impl<'a> GuessMatcher<'a> {
    pub fn new(library: &'a SongLibrary) -> Self {
        Self { library }
    }

    /// Apply `event` to `buffer` and classify the result.
    pub fn update(&self, buffer: &str, event: GuessEvent) -> MatchResult<'a> {
        let mut next = buffer.to_string();
        match event {
            GuessEvent::Letter(ch) if ch.is_alphabetic() => next.extend(ch.to_lowercase()),
            GuessEvent::Letter(_) | GuessEvent::Reject => {
                return MatchResult {
                    buffer: String::new(),
                    candidates: Vec::new(),
                    verdict: Verdict::BadInput,
                };
            }
            GuessEvent::Backspace => {
                next.pop();
            }
            GuessEvent::Replay | GuessEvent::Quit => {}
        }
        self.evaluate(&next)
    }

    /// Classify `buffer` without changing it.
    pub fn evaluate(&self, buffer: &str) -> MatchResult<'a> {
        if buffer.is_empty() {
            return MatchResult {
                buffer: String::new(),
                candidates: Vec::new(),
                verdict: Verdict::Neutral,
            };
        }

        let candidates = self.candidates(buffer);
        let verdict = match candidates.as_slice() {
            [] => Verdict::NoMatch,
            [only] => Verdict::Resolved(*only),
            _ => Verdict::Ambiguous,
        };
        MatchResult {
            buffer: buffer.to_string(),
            candidates,
            verdict,
        }
    }

    /// Titles whose matching key starts with `buffer`.
    pub fn candidates(&self, buffer: &str) -> Vec<&'a str> {
        let library = self.library;
        library
            .titles()
            .iter()
            .zip(library.normalized_titles())
            .filter(|(_, key)| key.starts_with(buffer))
            .map(|(title, _)| title.as_str())
            .collect()
    }

    /// Titles whose whole matching key equals `buffer`. Lets a player pick a
    /// title that is a strict prefix of another one. More than one title
    /// comes back when titles differ only in spacing or punctuation.
    pub fn exact(&self, buffer: &str) -> Vec<&'a str> {
        if buffer.is_empty() {
            return Vec::new();
        }
        let library = self.library;
        library
            .titles()
            .iter()
            .zip(library.normalized_titles())
            .filter(|(_, key)| key.as_str() == buffer)
            .map(|(title, _)| title.as_str())
            .collect()
    }
}
