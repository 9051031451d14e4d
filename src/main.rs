//! Binary entry point: resolve flags, index the clip directory, open the audio
//! device and hand the terminal to the game until the player is done.
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shucks::config::Cli;
use shucks::playback::open_default_output;
use shucks::{logging, scan_audio_dir, PlaybackController, Session, SongLibrary, TerminalFrontend};
use tracing::{error, info};

/// Run one game session.
///
/// Startup problems (a bad pool size, an empty or missing clip directory, no
/// audio device) are returned before the terminal switches to raw mode.
fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config()?;
    let log_path = logging::init(config.log_file.as_deref(), config.session.debug)?;
    info!(log = %log_path.display(), audio_dir = %config.audio_dir.display(), "starting");

    let entries = scan_audio_dir(&config.audio_dir)?;
    let library = SongLibrary::from_entries(entries)?;
    info!(
        titles = library.titles().len(),
        clips = library.clip_count(),
        "library loaded"
    );
    config.session.validate(library.clip_count())?;

    // The device has to outlive every voice started through `output`.
    let (_device, output) = open_default_output().context("failed to open audio output")?;
    let playback = PlaybackController::new(Arc::new(output), config.playback);

    let frontend = TerminalFrontend::enter()?;
    let mut session = Session::new(&library, playback, config.session, frontend)?;
    let outcome = session.run();
    drop(session);

    match outcome {
        Ok(outcome) => {
            println!("{}", outcome.farewell());
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "session aborted");
            Err(err)
        }
    }
}
