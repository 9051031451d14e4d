use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

use super::output::{SoundOutput, Voice};
use crate::error::PlaybackError;
use crate::models::ClipId;

/// Longest stretch the worker goes without looking at its stop signal.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the worker does once a clip has played to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPolicy {
    /// Play the clip a single time.
    #[default]
    Once,
    /// Replay the clip after `pause` until stopped.
    Loop { pause: Duration },
}

/// Stop request for one playback activity. A new signal is made for every
/// `start`, so a stale request can never cancel the next clip.
#[derive(Default)]
struct StopSignal {
    raised: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    fn raise(&self) {
        *self.raised.lock() = true;
        self.wake.notify_all();
    }

    /// Block for at most `timeout`; returns true once the signal is raised.
    fn wait(&self, timeout: Duration) -> bool {
        let mut raised = self.raised.lock();
        if !*raised {
            self.wake.wait_for(&mut raised, timeout);
        }
        *raised
    }

    /// Sleep for `total` in poll-sized slices. Returns true if stopped early.
    fn sleep(&self, total: Duration) -> bool {
        let deadline = Instant::now() + total;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return *self.raised.lock();
            }
            if self.wait((deadline - now).min(POLL_INTERVAL)) {
                return true;
            }
        }
    }
}

/// Fault recorded by a worker after `start` already returned.
type FaultSlot = Arc<Mutex<Option<PlaybackError>>>;

/// The one live playback activity.
struct PlaybackHandle {
    clip: ClipId,
    signal: Arc<StopSignal>,
    fault: FaultSlot,
    worker: JoinHandle<()>,
}

impl PlaybackHandle {
    /// Raise the signal and wait for the worker to exit.
    fn stop(self) -> Result<(), PlaybackError> {
        self.signal.raise();
        if self.worker.join().is_err() {
            return Err(PlaybackError::WorkerPanicked(self.clip.to_string()));
        }
        debug!(clip = %self.clip, "playback stopped");
        match self.fault.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Runs clips on a background thread, at most one at a time.
///
/// Every operation that replaces or ends playback joins the previous worker
/// before returning, so once `stop` comes back nothing is touching the audio
/// device any more.
pub struct PlaybackController {
    output: Arc<dyn SoundOutput>,
    policy: PlaybackPolicy,
    active: Option<PlaybackHandle>,
}

impl PlaybackController {
    pub fn new(output: Arc<dyn SoundOutput>, policy: PlaybackPolicy) -> Self {
        Self {
            output,
            policy,
            active: None,
        }
    }

    /// Start `clip` in the background. Any live playback is stopped first.
    ///
    /// Load failures are returned directly and leave nothing running.
    pub fn start(&mut self, clip: &ClipId) -> Result<(), PlaybackError> {
        if let Err(err) = self.stop() {
            warn!(error = %err, "previous playback ended with a fault");
        }

        let voice = self.output.play(clip)?;
        let signal = Arc::new(StopSignal::default());
        let fault: FaultSlot = Arc::new(Mutex::new(None));

        let worker = {
            let output = Arc::clone(&self.output);
            let signal = Arc::clone(&signal);
            let fault = Arc::clone(&fault);
            let clip = clip.clone();
            let policy = self.policy;
            thread::Builder::new()
                .name("playback".into())
                .spawn(move || run_worker(output, clip, policy, voice, signal, fault))
                .map_err(|err| {
                    PlaybackError::Device(format!("cannot spawn playback thread: {err}"))
                })?
        };

        debug!(%clip, policy = ?self.policy, "playback started");
        self.active = Some(PlaybackHandle {
            clip: clip.clone(),
            signal,
            fault,
            worker,
        });
        Ok(())
    }

    /// Stop the live playback, if any, and wait until it has fully exited.
    /// Returns a fault the worker recorded along the way. Calling it with
    /// nothing running is a cheap no-op.
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        match self.active.take() {
            Some(handle) => handle.stop(),
            None => Ok(()),
        }
    }

    /// Restart `clip` from the beginning.
    pub fn replay(&mut self, clip: &ClipId) -> Result<(), PlaybackError> {
        if let Err(err) = self.stop() {
            warn!(error = %err, "playback ended with a fault before replay");
        }
        self.start(clip)
    }

    /// Clip of the live handle, even if it has already finished sounding.
    pub fn current(&self) -> Option<&ClipId> {
        self.active.as_ref().map(|handle| &handle.clip)
    }

    /// True while the worker thread is still running.
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .map(|handle| !handle.worker.is_finished())
            .unwrap_or(false)
    }

    pub fn duration(&self, clip: &ClipId) -> Option<Duration> {
        self.output.duration(clip)
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(error = %err, "playback fault during shutdown");
        }
    }
}

fn run_worker(
    output: Arc<dyn SoundOutput>,
    clip: ClipId,
    policy: PlaybackPolicy,
    mut voice: Box<dyn Voice>,
    signal: Arc<StopSignal>,
    fault: FaultSlot,
) {
    loop {
        while voice.is_playing() {
            if signal.wait(POLL_INTERVAL) {
                voice.stop();
                return;
            }
        }
        voice.stop();

        let PlaybackPolicy::Loop { pause } = policy else {
            debug!(%clip, "clip finished");
            return;
        };
        if signal.sleep(pause) {
            return;
        }
        match output.play(&clip) {
            Ok(next) => voice = next,
            Err(err) => {
                warn!(%clip, error = %err, "repeat playback failed");
                *fault.lock() = Some(err);
                return;
            }
        }
    }
}
