use std::time::Duration;

use crate::error::PlaybackError;
use crate::models::ClipId;

/// One sounding instance of a clip.
pub trait Voice: Send {
    /// False once the clip has played to the end or was stopped.
    fn is_playing(&self) -> bool;

    /// Silence the voice. Must be safe to call on a finished voice and more
    /// than once.
    fn stop(&mut self);
}

/// The sound primitive the playback controller drives.
///
/// Implementations: [`RodioOutput`](super::RodioOutput) for real speakers,
/// scripted doubles in tests.
pub trait SoundOutput: Send + Sync {
    /// Load `clip` and start it. Load and decode failures are reported here,
    /// before any background work is spawned.
    fn play(&self, clip: &ClipId) -> Result<Box<dyn Voice>, PlaybackError>;

    /// Length of the clip when the format reports one.
    fn duration(&self, _clip: &ClipId) -> Option<Duration> {
        None
    }
}
