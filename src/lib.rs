//! Core library surface for Shucks, the "name that tune" terminal game.
//!
//! The binary wires these pieces together; tests drive the same pieces with
//! scripted input and a silent sound output.
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod matcher;
pub mod models;
pub mod playback;
pub mod session;
pub mod ui;

/// Errors shared across layers.
pub use error::{GameError, PlaybackError};

/// Song catalog built from the clip directory.
pub use library::{scan_audio_dir, SongLibrary};

pub use matcher::{GuessEvent, GuessMatcher, MatchResult, Verdict};
pub use models::{ClipId, Outcome};
pub use playback::{PlaybackController, PlaybackPolicy, SoundOutput, Voice};

/// The interactive session and its configuration.
pub use session::{Frontend, InputMode, Key, PoolPolicy, Session, SessionConfig, UnguessedPool};
pub use ui::TerminalFrontend;
