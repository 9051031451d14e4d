//! Error types shared by the library, pool and playback layers. The UI and
//! binary glue wrap these in `anyhow` with extra context, the same split the
//! rest of the crate uses.

use thiserror::Error;

/// Failures that can stop a game from starting or keep it from continuing.
#[derive(Error, Debug)]
pub enum GameError {
    /// Invalid user configuration, reported before the session launches.
    #[error("configuration error: {0}")]
    Config(String),

    /// The clip directory could not be turned into a usable song library.
    #[error("library error: {0}")]
    Library(String),

    /// A clip id the library does not know about. Construction guarantees
    /// this never happens, so hitting it is a programming error.
    #[error("internal consistency fault: {0}")]
    InternalConsistency(String),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sound output failures. None of these end a session: the player can still
/// guess, replay or skip the clip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("could not open {clip}: {reason}")]
    Open { clip: String, reason: String },

    #[error("could not decode {clip}: {reason}")]
    Decode { clip: String, reason: String },

    #[error("audio device error: {0}")]
    Device(String),

    #[error("playback worker for {0} panicked")]
    WorkerPanicked(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
