#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use shucks::error::PlaybackError;
use shucks::session::{Frontend, Key, SessionView};
use shucks::{ClipId, PlaybackController, PlaybackPolicy, SongLibrary, SoundOutput, Voice};

/// Output that never makes a sound. Voices run until stopped; clips whose
/// file name starts with `broken` fail to load.
#[derive(Default)]
pub struct SilentOutput {
    pub plays: Mutex<Vec<ClipId>>,
    pub live: Arc<AtomicUsize>,
}

impl SilentOutput {
    pub fn plays(&self) -> Vec<ClipId> {
        self.plays.lock().unwrap().clone()
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

struct SilentVoice {
    stopped: bool,
    live: Arc<AtomicUsize>,
}

impl Voice for SilentVoice {
    fn is_playing(&self) -> bool {
        !self.stopped
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for SilentVoice {
    fn drop(&mut self) {
        self.stop();
    }
}

impl SoundOutput for SilentOutput {
    fn play(&self, clip: &ClipId) -> Result<Box<dyn Voice>, PlaybackError> {
        if clip.to_string().starts_with("broken") {
            return Err(PlaybackError::Open {
                clip: clip.to_string(),
                reason: "no such file".into(),
            });
        }
        self.plays.lock().unwrap().push(clip.clone());
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(SilentVoice {
            stopped: false,
            live: Arc::clone(&self.live),
        }))
    }
}

pub fn silent_playback() -> (PlaybackController, Arc<SilentOutput>) {
    let output = Arc::new(SilentOutput::default());
    let shared: Arc<dyn SoundOutput> = output.clone();
    (PlaybackController::new(shared, PlaybackPolicy::Once), output)
}

/// Feeds a fixed list of keys and keeps every rendered view. Running out of
/// keys is an error so a stuck session fails the test instead of hanging.
pub struct ScriptedFrontend {
    keys: VecDeque<Key>,
    pub views: Vec<SessionView>,
}

impl ScriptedFrontend {
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys: keys.into(),
            views: Vec::new(),
        }
    }

    /// Status texts in the order they were shown, repeats collapsed.
    pub fn statuses(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for view in &self.views {
            if let Some(status) = &view.status {
                if seen.last() != Some(&status.text) {
                    seen.push(status.text.clone());
                }
            }
        }
        seen
    }

    pub fn last_view(&self) -> &SessionView {
        self.views.last().expect("nothing was rendered")
    }
}

impl Frontend for ScriptedFrontend {
    fn next_key(&mut self) -> Result<Key> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => bail!("script ran out of keys"),
        }
    }

    fn render(&mut self, view: &SessionView) -> Result<()> {
        self.views.push(view.clone());
        Ok(())
    }
}

/// Keys for typing `text` one character at a time.
pub fn typed(text: &str) -> Vec<Key> {
    text.chars().map(Key::Char).collect()
}

/// Typing `text` and pressing Enter.
pub fn line(text: &str) -> Vec<Key> {
    let mut keys = typed(text);
    keys.push(Key::Enter);
    keys
}

pub fn library(entries: &[(&str, &str)]) -> SongLibrary {
    SongLibrary::from_entries(
        entries
            .iter()
            .map(|(clip, title)| (ClipId::from(*clip), title.to_string())),
    )
    .unwrap()
}
