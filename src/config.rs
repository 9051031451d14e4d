//! Command-line flags and the resolved game configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::{GameError, Result};
use crate::playback::PlaybackPolicy;
use crate::session::{InputMode, PoolPolicy, SessionConfig};

/// Directory scanned for clips when none is given.
pub const DEFAULT_AUDIO_DIR: &str = "audio_files";

#[derive(Parser, Debug)]
#[command(name = "shucks", version, about = "Hear a short clip, name the tune")]
pub struct Cli {
    /// Number of clips to ask (default: all of them, or 5 with --debug)
    pub count: Option<usize>,

    /// Show the correct answer on screen and log at debug level
    #[arg(short, long)]
    pub debug: bool,

    /// Directory holding the clips, named like `song_title_1.mp3`
    #[arg(long, env = "SHUCKS_AUDIO_DIR", default_value = DEFAULT_AUDIO_DIR)]
    pub audio_dir: PathBuf,

    /// How guesses are typed
    #[arg(long, value_enum, default_value_t = ModeArg::Char)]
    pub mode: ModeArg,

    /// When an asked clip leaves the pool (default depends on --mode)
    #[arg(long, value_enum)]
    pub pool_policy: Option<PoolPolicyArg>,

    /// Restart the clip after a wrong guess (default: true in line mode)
    #[arg(long, value_name = "BOOL")]
    pub restart_on_wrong: Option<bool>,

    /// Keep repeating the clip until it is guessed
    #[arg(long = "loop")]
    pub repeat: bool,

    /// Silence between repeats with --loop, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub repeat_pause_ms: u64,

    /// How long feedback such as "Correct!" stays up, in milliseconds
    #[arg(long, default_value_t = 1500)]
    pub feedback_ms: u64,

    /// Seed for a reproducible clip order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file (default: ~/.shucks/shucks.log)
    #[arg(long, env = "SHUCKS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Letters narrow the titles as they are typed
    Char,
    /// Type a title number or an action, then Enter
    Line,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolPolicyArg {
    RemoveOnCorrect,
    RemoveOnDraw,
}

/// Everything the binary needs once flags are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub audio_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub playback: PlaybackPolicy,
    pub session: SessionConfig,
}

impl Cli {
    /// Apply mode-dependent defaults. A pool size of zero is rejected here;
    /// the upper bound is checked once the library is known.
    pub fn into_config(self) -> Result<GameConfig> {
        if self.count == Some(0) {
            return Err(GameError::Config(
                "invalid number of files: 0. Must be at least 1".into(),
            ));
        }

        let mode = match self.mode {
            ModeArg::Char => InputMode::CharStream,
            ModeArg::Line => InputMode::LineBuffered,
        };
        let mut session = SessionConfig::for_mode(mode);
        if let Some(policy) = self.pool_policy {
            session.pool_policy = match policy {
                PoolPolicyArg::RemoveOnCorrect => PoolPolicy::RemoveOnCorrect,
                PoolPolicyArg::RemoveOnDraw => PoolPolicy::RemoveOnDraw,
            };
        }
        if let Some(restart) = self.restart_on_wrong {
            session.restart_on_wrong_guess = restart;
        }
        session.pool_size = self.count;
        session.debug = self.debug;
        session.feedback_pause = Duration::from_millis(self.feedback_ms);
        session.seed = self.seed;

        let playback = if self.repeat {
            PlaybackPolicy::Loop {
                pause: Duration::from_millis(self.repeat_pause_ms),
            }
        } else {
            PlaybackPolicy::Once
        };

        Ok(GameConfig {
            audio_dir: self.audio_dir,
            log_file: self.log_file,
            playback,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GameConfig {
        Cli::try_parse_from(std::iter::once("shucks").chain(args.iter().copied()))
            .unwrap()
            .into_config()
            .unwrap()
    }

    #[test]
    fn char_mode_defaults() {
        let config = parse(&["--audio-dir", "clips"]);
        assert_eq!(config.audio_dir, PathBuf::from("clips"));
        assert_eq!(config.playback, PlaybackPolicy::Once);
        assert_eq!(config.session.mode, InputMode::CharStream);
        assert_eq!(config.session.pool_policy, PoolPolicy::RemoveOnDraw);
        assert!(!config.session.restart_on_wrong_guess);
        assert_eq!(config.session.pool_size, None);
        assert_eq!(config.session.feedback_pause, Duration::from_millis(1500));
    }

    #[test]
    fn line_mode_defaults_follow_the_numbered_game() {
        let config = parse(&["--mode", "line", "-d", "3"]);
        assert_eq!(config.session.mode, InputMode::LineBuffered);
        assert_eq!(config.session.pool_policy, PoolPolicy::RemoveOnCorrect);
        assert!(config.session.restart_on_wrong_guess);
        assert!(config.session.debug);
        assert_eq!(config.session.pool_size, Some(3));
    }

    #[test]
    fn explicit_policies_override_mode_defaults() {
        let config = parse(&[
            "--mode",
            "line",
            "--pool-policy",
            "remove-on-draw",
            "--restart-on-wrong",
            "false",
            "--loop",
            "--repeat-pause-ms",
            "500",
        ]);
        assert_eq!(config.session.pool_policy, PoolPolicy::RemoveOnDraw);
        assert!(!config.session.restart_on_wrong_guess);
        assert_eq!(
            config.playback,
            PlaybackPolicy::Loop {
                pause: Duration::from_millis(500)
            }
        );
    }

    #[test]
    fn zero_clips_is_a_config_error() {
        let cli = Cli::try_parse_from(["shucks", "0"]).unwrap();
        assert!(matches!(cli.into_config(), Err(GameError::Config(_))));
    }

    #[test]
    fn negative_count_does_not_parse() {
        assert!(Cli::try_parse_from(["shucks", "-3"]).is_err());
    }

    #[test]
    fn debug_pool_defaults_to_five_capped_by_library() {
        let config = parse(&["--debug"]);
        assert_eq!(config.session.effective_pool_size(20), Some(5));
        assert_eq!(config.session.effective_pool_size(2), Some(2));
        assert_eq!(parse(&[]).session.effective_pool_size(20), None);
    }

    #[test]
    fn pool_larger_than_library_is_caught_before_launch() {
        let config = parse(&["3"]);
        assert!(matches!(
            config.session.validate(2),
            Err(GameError::Config(message)) if message == "invalid number of files: 3. Must be between 1 and 2"
        ));
        assert!(config.session.validate(3).is_ok());
        assert!(parse(&["--debug"]).session.validate(2).is_ok());
        assert!(parse(&[]).session.validate(1).is_ok());
    }
}
