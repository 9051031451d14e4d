use std::mem;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use super::input::{char_command, line_command, Command, InputMode, Key};
use super::pool::{PoolPolicy, UnguessedPool};
use super::view::{Phase, Resolution, SessionView, StatusKind, StatusMessage};
use crate::error::GameError;
use crate::library::SongLibrary;
use crate::matcher::{GuessEvent, GuessMatcher, Verdict};
use crate::models::{ClipId, Outcome};
use crate::playback::PlaybackController;

/// Pause after "Correct!", "Nope" and revealed answers.
pub const DEFAULT_FEEDBACK_PAUSE: Duration = Duration::from_millis(1500);
/// Pool size used in debug mode when none is requested.
pub const DEBUG_POOL_SIZE: usize = 5;

/// Where keys come from and where screens go.
pub trait Frontend {
    /// Block until the next key press.
    fn next_key(&mut self) -> Result<Key>;

    fn render(&mut self, view: &SessionView) -> Result<()>;
}

/// Knobs that shape one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub mode: InputMode,
    pub pool_policy: PoolPolicy,
    /// Replay the clip from the start after a wrong guess.
    pub restart_on_wrong_guess: bool,
    /// Number of clips to ask; `None` asks them all (or a few in debug mode).
    pub pool_size: Option<usize>,
    /// Show the correct answer on screen and in the log.
    pub debug: bool,
    pub feedback_pause: Duration,
    /// Fixed seed for reproducible clip order.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Defaults for `mode`: character-stream removes a clip from the pool as
    /// soon as it is asked and keeps playing after a wrong guess; line mode
    /// keeps it in the pool and restarts the clip after every wrong guess.
    pub fn for_mode(mode: InputMode) -> Self {
        let line = mode == InputMode::LineBuffered;
        Self {
            mode,
            pool_policy: if line {
                PoolPolicy::RemoveOnCorrect
            } else {
                PoolPolicy::RemoveOnDraw
            },
            restart_on_wrong_guess: line,
            pool_size: None,
            debug: false,
            feedback_pause: DEFAULT_FEEDBACK_PAUSE,
            seed: None,
        }
    }

    /// Reject a requested pool size the library cannot fill.
    pub fn validate(&self, clip_count: usize) -> std::result::Result<(), GameError> {
        match self.effective_pool_size(clip_count) {
            Some(size) => UnguessedPool::check_size(size, clip_count),
            None => Ok(()),
        }
    }

    /// Requested pool size after applying the debug default.
    pub fn effective_pool_size(&self, clip_count: usize) -> Option<usize> {
        match self.pool_size {
            Some(size) => Some(size),
            None if self.debug => Some(DEBUG_POOL_SIZE.min(clip_count)),
            None => None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_mode(InputMode::default())
    }
}

fn seeded_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}

/// The game loop: draws clips, plays them, reads keys and scores guesses.
///
/// The session is the only writer of the pool, the buffer and the counters.
/// Before anything that changes the current clip or ends the game it stops
/// playback and waits for the worker to exit.
pub struct Session<'a, F: Frontend> {
    library: &'a SongLibrary,
    matcher: GuessMatcher<'a>,
    config: SessionConfig,
    pool: UnguessedPool,
    playback: PlaybackController,
    frontend: F,
    rng: Box<dyn RngCore>,
    phase: Phase,
    current: Option<ClipId>,
    clip_length: Option<Duration>,
    buffer: String,
    candidates: Vec<&'a str>,
    correct: usize,
    total: usize,
    status: Option<StatusMessage>,
}

impl<'a, F: Frontend> Session<'a, F> {
    /// Sample the pool from `library` and set up a session. Fails with
    /// [`GameError::Config`] when the requested pool size is out of range.
    pub fn new(
        library: &'a SongLibrary,
        playback: PlaybackController,
        config: SessionConfig,
        frontend: F,
    ) -> std::result::Result<Self, GameError> {
        let mut rng = seeded_rng(config.seed);
        let size = config.effective_pool_size(library.clip_count());
        let pool = UnguessedPool::sample(library, size, config.pool_policy, &mut rng)?;
        Self::assemble(library, pool, playback, config, frontend, rng)
    }

    /// Set up a session over an explicit pool. Every pooled clip must belong
    /// to the library.
    pub fn with_pool(
        library: &'a SongLibrary,
        pool: UnguessedPool,
        playback: PlaybackController,
        config: SessionConfig,
        frontend: F,
    ) -> std::result::Result<Self, GameError> {
        let rng = seeded_rng(config.seed);
        Self::assemble(library, pool, playback, config, frontend, rng)
    }

    fn assemble(
        library: &'a SongLibrary,
        pool: UnguessedPool,
        playback: PlaybackController,
        config: SessionConfig,
        frontend: F,
        rng: Box<dyn RngCore>,
    ) -> std::result::Result<Self, GameError> {
        if let Some(clip) = pool.clips().find(|clip| !library.contains(clip)) {
            return Err(GameError::InternalConsistency(format!(
                "pooled clip {clip} is not in the library"
            )));
        }
        let total = pool.len();
        Ok(Self {
            library,
            matcher: GuessMatcher::new(library),
            config,
            pool,
            playback,
            frontend,
            rng,
            phase: Phase::Idle,
            current: None,
            clip_length: None,
            buffer: String::new(),
            candidates: Vec::new(),
            correct: 0,
            total,
            status: None,
        })
    }

    /// Replace the random source used to draw clips.
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Play until the pool is empty or the player quits. Playback is stopped
    /// on every way out, errors included.
    pub fn run(&mut self) -> Result<Outcome> {
        let result = self.drive();
        self.stop_playback();
        let outcome = result?;
        info!(
            completed = outcome.completed,
            correct = outcome.correct,
            total = outcome.total,
            "session ended"
        );
        Ok(outcome)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pool(&self) -> &UnguessedPool {
        &self.pool
    }

    pub fn current(&self) -> Option<&ClipId> {
        self.current.as_ref()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn outcome(&self) -> Outcome {
        Outcome {
            completed: self.phase == Phase::Done,
            correct: self.correct,
            total: self.total,
            unguessed: self.pool.len(),
        }
    }

    fn drive(&mut self) -> Result<Outcome> {
        info!(
            clips = self.total,
            mode = ?self.config.mode,
            policy = ?self.config.pool_policy,
            "session started"
        );
        self.next_clip()?;
        while self.phase == Phase::Playing {
            self.render()?;
            let key = self.frontend.next_key()?;
            self.handle_key(key)?;
        }
        self.render()?;
        Ok(self.outcome())
    }

    fn handle_key(&mut self, key: Key) -> Result<()> {
        let command = match self.config.mode {
            InputMode::CharStream => char_command(key),
            InputMode::LineBuffered => self.edit_line(key),
        };
        match command {
            Some(command) => self.apply(command),
            None => Ok(()),
        }
    }

    /// Line editing for line-buffered mode. Only Enter (or a quit key)
    /// produces a command.
    fn edit_line(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Char(ch) if !ch.is_control() => {
                self.buffer.push(ch);
                None
            }
            Key::Backspace => {
                self.buffer.pop();
                None
            }
            Key::Enter => {
                let line = mem::take(&mut self.buffer);
                Some(line_command(&line, self.library.titles().len()))
            }
            Key::Esc | Key::Interrupt => Some(Command::Quit),
            Key::Char(_) | Key::Tab => None,
        }
    }

    fn apply(&mut self, command: Command) -> Result<()> {
        let library = self.library;
        match command {
            Command::Match(event) => self.apply_match(event)?,
            Command::Submit => match self.submitted_title()? {
                Some(title) => self.resolve(title)?,
                None => self.set_status("Keep typing: no single title yet.", StatusKind::Info),
            },
            Command::Pick(index) => {
                let title = library.titles()[index].as_str();
                self.resolve(title)?;
            }
            Command::Replay => {
                self.status = None;
                self.replay();
            }
            Command::Skip => {
                info!(clip = ?self.current, "clip skipped");
                self.set_status("Skipped.", StatusKind::Info);
                self.next_clip()?;
            }
            Command::Reveal => self.reveal()?,
            Command::Quit => {
                self.stop_playback();
                self.phase = Phase::Terminated;
                info!("quit requested");
            }
            Command::Invalid => {
                self.set_status("Invalid input. Please try again.", StatusKind::Error)
            }
        }
        Ok(())
    }

    fn apply_match(&mut self, event: GuessEvent) -> Result<()> {
        let result = self.matcher.update(&self.buffer, event);
        self.buffer = result.buffer;
        self.candidates = result.candidates;
        self.status = None;

        match result.verdict {
            Verdict::Neutral | Verdict::Ambiguous => {}
            Verdict::BadInput => {
                self.set_status("Letters only. Start again.", StatusKind::Error);
            }
            Verdict::NoMatch => {
                debug!(buffer = %self.buffer, "no title matches");
                self.set_status("Nope.", StatusKind::Error);
                self.render()?;
                self.pause();
                self.clear_guess();
                self.status = None;
            }
            Verdict::Resolved(title) => self.resolve(title)?,
        }
        Ok(())
    }

    /// Title chosen with Enter. Titles that share the typed letters cannot be
    /// told apart by typing, so the current clip's title wins among them.
    fn submitted_title(&self) -> Result<Option<&'a str>> {
        let matches = self.matcher.exact(&self.buffer);
        let answer = match &self.current {
            Some(clip) => Some(self.library.title_of(clip)?),
            None => None,
        };
        let chosen = matches
            .iter()
            .copied()
            .find(|title| Some(*title) == answer)
            .or_else(|| matches.first().copied());
        Ok(chosen)
    }

    /// Score a uniquely identified title against the clip being asked.
    fn resolve(&mut self, title: &'a str) -> Result<()> {
        let clip = self.current.clone().ok_or_else(|| {
            GameError::InternalConsistency("a guess was resolved with no clip selected".into())
        })?;
        let answer = self.library.title_of(&clip)?;

        if title == answer {
            self.phase = Phase::Resolving(Resolution::Correct);
            self.stop_playback();
            self.correct += 1;
            self.pool.resolve_correct();
            self.clear_guess();
            info!(
                %clip,
                title,
                correct = self.correct,
                remaining = self.pool.len(),
                "correct guess"
            );
            self.set_status(
                format!("Correct! The audio clip is from {title}."),
                StatusKind::Success,
            );
            self.render()?;
            self.pause();
            self.status = None;
            self.next_clip()?;
        } else {
            self.phase = Phase::Resolving(Resolution::Incorrect);
            self.clear_guess();
            info!(%clip, guess = title, "incorrect guess");
            self.set_status(
                format!("Incorrect. Your guess was: {title}. Try again."),
                StatusKind::Error,
            );
            self.render()?;
            if self.config.restart_on_wrong_guess {
                self.pause();
                self.replay();
            }
            self.phase = Phase::Playing;
        }
        Ok(())
    }

    /// Show the answer for the current clip, then move on to another one.
    fn reveal(&mut self) -> Result<()> {
        let Some(clip) = self.current.clone() else {
            return Ok(());
        };
        let answer = self.library.title_of(&clip)?;
        self.stop_playback();
        info!(%clip, answer, "answer revealed");
        self.set_status(format!("The correct song is: {answer}"), StatusKind::Info);
        self.render()?;
        self.pause();
        self.status = None;
        self.next_clip()
    }

    /// Stop playback, then draw and start the next clip, or finish.
    fn next_clip(&mut self) -> Result<()> {
        self.stop_playback();
        self.clear_guess();

        let Some(clip) = self.pool.draw(&mut self.rng) else {
            self.current = None;
            self.clip_length = None;
            self.phase = Phase::Done;
            info!("every clip identified");
            return Ok(());
        };

        let answer = self.library.title_of(&clip)?;
        if self.config.debug {
            debug!(%clip, answer, "next clip");
        }
        self.clip_length = self.playback.duration(&clip);
        self.current = Some(clip.clone());
        self.phase = Phase::Playing;
        if let Err(err) = self.playback.start(&clip) {
            warn!(%clip, error = %err, "could not start playback");
            self.set_status(format!("Could not play clip: {err}"), StatusKind::Error);
        }
        Ok(())
    }

    fn replay(&mut self) {
        let Some(clip) = self.current.clone() else {
            return;
        };
        debug!(%clip, "replaying clip");
        if let Err(err) = self.playback.replay(&clip) {
            warn!(%clip, error = %err, "could not replay clip");
            self.set_status(format!("Could not play clip: {err}"), StatusKind::Error);
        }
    }

    fn stop_playback(&mut self) {
        if let Err(err) = self.playback.stop() {
            warn!(error = %err, "playback ended with a fault");
            self.set_status(format!("Playback problem: {err}"), StatusKind::Error);
        }
    }

    fn clear_guess(&mut self) {
        self.buffer.clear();
        self.candidates.clear();
    }

    fn pause(&self) {
        if !self.config.feedback_pause.is_zero() {
            thread::sleep(self.config.feedback_pause);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn render(&mut self) -> Result<()> {
        let view = self.view();
        self.frontend.render(&view)
    }

    fn view(&self) -> SessionView {
        let answer = if self.config.debug {
            self.current
                .as_ref()
                .and_then(|clip| self.library.title_of(clip).ok())
                .map(str::to_string)
        } else {
            None
        };
        SessionView {
            mode: self.config.mode,
            phase: self.phase,
            titles: self.library.titles().to_vec(),
            candidates: self.candidates.iter().map(|title| title.to_string()).collect(),
            buffer: self.buffer.clone(),
            correct: self.correct,
            total: self.total,
            remaining: self.pool.len(),
            playing: self.playback.is_active(),
            clip_length: self.clip_length,
            status: self.status.clone(),
            answer,
        }
    }
}
