use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{GameError, Result};
use crate::library::SongLibrary;
use crate::models::ClipId;

/// When the clip being asked leaves the waiting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolPolicy {
    /// The asked clip stays in the waiting list until it is guessed, so a
    /// skip may draw the same clip again.
    #[default]
    RemoveOnCorrect,
    /// Drawing takes the clip out of the waiting list; skipping puts it back
    /// only after the next clip has been drawn.
    RemoveOnDraw,
}

/// Clips not yet identified in this session.
///
/// The pool only shrinks, by one clip per correct guess. [`UnguessedPool::len`]
/// always counts the clip being asked, whatever the policy.
#[derive(Debug, Clone)]
pub struct UnguessedPool {
    waiting: Vec<ClipId>,
    asking: Option<ClipId>,
    policy: PoolPolicy,
}

impl UnguessedPool {
    /// Pick `size` distinct clips at random from the library, or all of them
    /// when no size is requested.
    pub fn sample<R: Rng>(
        library: &SongLibrary,
        size: Option<usize>,
        policy: PoolPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        let clips = library.clips();
        let size = size.unwrap_or(clips.len());
        Self::check_size(size, clips.len())?;
        let mut chosen: Vec<ClipId> = clips.choose_multiple(rng, size).cloned().collect();
        chosen.sort();
        debug!(size, ?policy, "pool sampled");
        Self::from_clips(chosen, policy)
    }

    /// A pool must hold between one clip and every clip in the library.
    pub fn check_size(size: usize, available: usize) -> Result<()> {
        if size < 1 || size > available {
            return Err(GameError::Config(format!(
                "invalid number of files: {size}. Must be between 1 and {available}"
            )));
        }
        Ok(())
    }

    /// Build a pool from an explicit clip list. Fails on an empty list or a
    /// repeated clip.
    pub fn from_clips(clips: Vec<ClipId>, policy: PoolPolicy) -> Result<Self> {
        if clips.is_empty() {
            return Err(GameError::Config("the pool needs at least one clip".into()));
        }
        let mut seen = HashSet::new();
        if let Some(repeat) = clips.iter().find(|clip| !seen.insert(*clip)) {
            return Err(GameError::Config(format!("clip {repeat} appears twice in the pool")));
        }
        Ok(Self {
            waiting: clips,
            asking: None,
            policy,
        })
    }

    /// Choose the next clip to ask uniformly at random. Returns `None` once
    /// every clip has been guessed.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<ClipId> {
        match self.policy {
            PoolPolicy::RemoveOnCorrect => {
                if self.waiting.is_empty() {
                    self.asking = None;
                    return None;
                }
                let index = rng.gen_range(0..self.waiting.len());
                self.asking = Some(self.waiting[index].clone());
            }
            PoolPolicy::RemoveOnDraw => {
                let previous = self.asking.take();
                if self.waiting.is_empty() {
                    self.asking = previous;
                } else {
                    let index = rng.gen_range(0..self.waiting.len());
                    self.asking = Some(self.waiting.remove(index));
                    self.waiting.extend(previous);
                }
            }
        }
        self.asking.clone()
    }

    /// Drop the clip being asked for good after a correct guess.
    pub fn resolve_correct(&mut self) -> Option<ClipId> {
        let clip = self.asking.take()?;
        if self.policy == PoolPolicy::RemoveOnCorrect {
            self.waiting.retain(|waiting| waiting != &clip);
        }
        Some(clip)
    }

    /// Every unguessed clip, the one being asked included.
    pub fn clips(&self) -> impl Iterator<Item = &ClipId> + '_ {
        let asking = match self.policy {
            PoolPolicy::RemoveOnDraw => self.asking.as_ref(),
            PoolPolicy::RemoveOnCorrect => None,
        };
        self.waiting.iter().chain(asking)
    }

    pub fn asking(&self) -> Option<&ClipId> {
        self.asking.as_ref()
    }

    pub fn contains(&self, clip: &ClipId) -> bool {
        self.asking.as_ref() == Some(clip) || self.waiting.contains(clip)
    }

    pub fn len(&self) -> usize {
        match (self.policy, &self.asking) {
            (PoolPolicy::RemoveOnDraw, Some(_)) => self.waiting.len() + 1,
            _ => self.waiting.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
