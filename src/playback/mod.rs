//! Cancellable background playback of one clip at a time.

mod controller;
mod device;
mod output;

pub use controller::{PlaybackController, PlaybackPolicy, POLL_INTERVAL};
pub use device::{open_default_output, AudioDevice, RodioOutput};
pub use output::{SoundOutput, Voice};
