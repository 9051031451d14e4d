use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{GameError, Result};
use super::catalog::normalize_title;
use crate::models::ClipId;

/// File extensions the sound output can decode.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

/// List the clips in `dir` together with the title derived from each file
/// name. Sub-directories and files with other extensions are ignored. The
/// result is sorted by path so repeated scans agree.
pub fn scan_audio_dir(dir: &Path) -> Result<Vec<(ClipId, String)>> {
    let entries = fs::read_dir(dir).map_err(|err| {
        GameError::Library(format!("cannot read audio directory {}: {err}", dir.display()))
    })?;

    let mut clips = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !supported {
            debug!(path = %path.display(), "skipping non-audio file");
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!(path = %path.display(), "skipping clip with a non UTF-8 name");
            continue;
        };
        let title = derive_title(stem);
        if normalize_title(&title).is_empty() {
            warn!(path = %path.display(), "skipping clip whose title has no letters to type");
            continue;
        }
        clips.push((ClipId::new(path), title));
    }

    clips.sort();
    info!(dir = %dir.display(), clips = clips.len(), "scanned audio directory");
    Ok(clips)
}

/// Turn a file stem such as `beaver_creek_2` into `Beaver Creek`.
///
/// Words are separated by underscores and the last word is the clip number,
/// so it is dropped. A stem with a single word is used as-is.
pub fn derive_title(stem: &str) -> String {
    let words: Vec<&str> = stem.split('_').filter(|word| !word.is_empty()).collect();
    let kept = if words.len() > 1 {
        &words[..words.len() - 1]
    } else {
        &words[..]
    };
    kept.iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
