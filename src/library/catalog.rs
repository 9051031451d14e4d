use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::{GameError, Result};
use crate::models::ClipId;

/// Immutable title index built once at startup.
///
/// Titles keep the casing they were first seen with for display, but two
/// titles that differ only in case are treated as the same song. Each title
/// also carries a matching key (see [`normalize_title`]) that the guess
/// matcher compares typed letters against.
#[derive(Debug, Clone)]
pub struct SongLibrary {
    /// Display titles in presentation order.
    titles: Vec<String>,
    /// Matching keys, parallel to `titles`.
    keys: Vec<String>,
    /// Clips for each title, parallel to `titles`.
    clips: Vec<BTreeSet<ClipId>>,
    /// Reverse lookup from clip to its index in `titles`.
    owner: HashMap<ClipId, usize>,
}

/// Reduce a title to the letters a player can type: lower-cased alphabetic
/// characters only, spaces and punctuation dropped.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive identity used to merge titles that only differ in case.
fn identity_key(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl SongLibrary {
    /// Build the index from `(clip, title)` pairs.
    ///
    /// Fails when no clips are given, when a title is blank or has no letters,
    /// or when the same clip is listed twice (a clip must belong to exactly one title).
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ClipId, S)>,
        S: AsRef<str>,
    {
        let mut grouped: HashMap<String, (String, BTreeSet<ClipId>)> = HashMap::new();
        let mut seen: BTreeSet<ClipId> = BTreeSet::new();

        for (clip, title) in entries {
            let title = title.as_ref().trim();
            if title.is_empty() {
                return Err(GameError::Library(format!("clip {clip} has a blank title")));
            }
            if normalize_title(title).is_empty() {
                return Err(GameError::Library(format!(
                    "clip {clip} has the title {title:?}, which has no letters to type"
                )));
            }
            if !seen.insert(clip.clone()) {
                return Err(GameError::Library(format!("clip {clip} is listed twice")));
            }
            grouped
                .entry(identity_key(title))
                .or_insert_with(|| (title.to_string(), BTreeSet::new()))
                .1
                .insert(clip);
        }

        if grouped.is_empty() {
            return Err(GameError::Library("no clips found".into()));
        }

        let mut songs: Vec<(String, BTreeSet<ClipId>)> = grouped.into_values().collect();
        songs.sort_by(|(a, _), (b, _)| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));

        let mut titles = Vec::with_capacity(songs.len());
        let mut keys = Vec::with_capacity(songs.len());
        let mut clips = Vec::with_capacity(songs.len());
        let mut owner = HashMap::new();
        for (index, (title, song_clips)) in songs.into_iter().enumerate() {
            for clip in &song_clips {
                owner.insert(clip.clone(), index);
            }
            keys.push(normalize_title(&title));
            titles.push(title);
            clips.push(song_clips);
        }

        for (i, key) in keys.iter().enumerate() {
            if let Some(j) = keys[..i].iter().position(|other| other == key) {
                warn!(
                    first = %titles[j],
                    second = %titles[i],
                    "titles share the same letters and can only be told apart in line mode"
                );
            }
        }

        debug!(titles = titles.len(), clips = owner.len(), "song library built");
        Ok(Self {
            titles,
            keys,
            clips,
            owner,
        })
    }

    /// All display titles, sorted case-insensitively. Line mode numbers
    /// guesses against this order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Matching keys in the same order as [`SongLibrary::titles`].
    pub fn normalized_titles(&self) -> &[String] {
        &self.keys
    }

    /// Title of the song a clip belongs to.
    pub fn title_of(&self, clip: &ClipId) -> Result<&str> {
        self.owner
            .get(clip)
            .map(|&index| self.titles[index].as_str())
            .ok_or_else(|| {
                GameError::InternalConsistency(format!("clip {clip} is not in the library"))
            })
    }

    /// Clips recorded for a title, matched case-insensitively.
    pub fn clips_of(&self, title: &str) -> Option<&BTreeSet<ClipId>> {
        let wanted = identity_key(title);
        self.titles
            .iter()
            .position(|candidate| identity_key(candidate) == wanted)
            .map(|index| &self.clips[index])
    }

    /// Every clip across all titles, in path order.
    pub fn clips(&self) -> Vec<ClipId> {
        let mut all: Vec<ClipId> = self.owner.keys().cloned().collect();
        all.sort();
        all
    }

    pub fn contains(&self, clip: &ClipId) -> bool {
        self.owner.contains_key(clip)
    }

    pub fn clip_count(&self) -> usize {
        self.owner.len()
    }
}
