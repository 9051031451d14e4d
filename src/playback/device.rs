//! rodio-backed sound output.
//!
//! rodio's `OutputStream` has to stay alive for as long as anything plays,
//! but it cannot move between threads. It is therefore split off into
//! [`AudioDevice`], which the binary keeps on the main thread, while the
//! thread-safe [`RodioOutput`] is shared with the playback worker.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, info};

use super::output::{SoundOutput, Voice};
use crate::error::PlaybackError;
use crate::models::ClipId;

/// Keeps the system output stream open. Drop it last.
pub struct AudioDevice {
    _stream: OutputStream,
}

/// Plays clips through the default output device.
pub struct RodioOutput {
    handle: OutputStreamHandle,
}

/// Open the default output device.
pub fn open_default_output() -> Result<(AudioDevice, RodioOutput), PlaybackError> {
    let (stream, handle) =
        OutputStream::try_default().map_err(|err| PlaybackError::Device(err.to_string()))?;
    info!("audio output device opened");
    Ok((AudioDevice { _stream: stream }, RodioOutput { handle }))
}

impl RodioOutput {
    fn decode(&self, clip: &ClipId) -> Result<Decoder<BufReader<File>>, PlaybackError> {
        let file = File::open(clip.path()).map_err(|err| PlaybackError::Open {
            clip: clip.to_string(),
            reason: err.to_string(),
        })?;
        Decoder::new(BufReader::new(file)).map_err(|err| PlaybackError::Decode {
            clip: clip.to_string(),
            reason: err.to_string(),
        })
    }
}

impl SoundOutput for RodioOutput {
    fn play(&self, clip: &ClipId) -> Result<Box<dyn Voice>, PlaybackError> {
        let source = self.decode(clip)?;
        let sink =
            Sink::try_new(&self.handle).map_err(|err| PlaybackError::Device(err.to_string()))?;
        sink.append(source);
        debug!(%clip, "voice started");
        Ok(Box::new(RodioVoice { sink }))
    }

    fn duration(&self, clip: &ClipId) -> Option<Duration> {
        self.decode(clip).ok()?.total_duration()
    }
}

struct RodioVoice {
    sink: Sink,
}

impl Voice for RodioVoice {
    fn is_playing(&self) -> bool {
        !self.sink.empty()
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}
