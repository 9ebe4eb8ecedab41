//! Progression engine - level gating, star scoring, and aggregate totals.
//!
//! One engine instance owns the durable progress for a single minigame type
//! for the lifetime of a play session. The presentation layer constructs it
//! once and passes it into each scene; completion results come back as plain
//! return values, not events.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{LevelCatalog, LevelDefinition};
use crate::consts::{MAX_STARS, STAR_TIME_RATIO};
use crate::platform::storage::KeyValueStore;
use crate::platform::time::now_millis;
use crate::progression::progress::{progress_key, LevelProgressRecord, MinigameProgress};

/// Recoverable progression failures. None of these abort the session; the
/// caller decides whether to show a message or fall back to the menu.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("no level {0} in the catalog")]
    NotFound(u32),
    #[error("level {0} is locked")]
    LevelLocked(u32),
    #[error("unknown minigame type: {0}")]
    UnknownMinigameType(String),
}

/// Measured performance of one completed puzzle session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelPerformance {
    pub time_secs: f64,
    pub attempts: u32,
}

/// Outcome of [`ProgressionEngine::complete_level`], handed to the
/// presentation layer for the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    /// Stars earned by this completion (1-3), before merging.
    pub stars_awarded: u32,
    /// Total stars across all levels after the merge.
    pub total_stars: u32,
    /// Whether the following level is now open.
    pub next_level_unlocked: bool,
    /// Whether a following level exists at all.
    pub has_next_level: bool,
}

/// Aggregate progress for the level-select and profile screens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub completed_levels: u32,
    pub total_levels: u32,
    /// Rounded to whole percent.
    pub completion_percentage: u32,
    pub total_stars: u32,
    pub max_stars: u32,
    pub total_points: u64,
    pub is_completed: bool,
}

/// Star rule: one for finishing, one for beating the time budget, one for a
/// first-try solve. Deterministic for identical inputs.
pub fn calculate_stars(performance: &LevelPerformance, level: &LevelDefinition) -> u32 {
    let mut stars = 1;
    if performance.time_secs <= level.max_time_secs * STAR_TIME_RATIO {
        stars += 1;
    }
    if performance.attempts == 1 {
        stars += 1;
    }
    stars.min(MAX_STARS)
}

/// Level progression for one minigame type.
pub struct ProgressionEngine<S: KeyValueStore> {
    minigame_type: String,
    catalog: LevelCatalog,
    current_level: u32,
    progress: MinigameProgress,
    store: S,
}

impl<S: KeyValueStore> ProgressionEngine<S> {
    /// Initialize for a minigame type, loading saved progress from `store`.
    ///
    /// Absent or corrupt progress falls back to defaults (level 1 unlocked,
    /// no records). Only an unknown minigame type is an error.
    pub fn new(minigame_type: &str, store: S) -> Result<Self, ProgressionError> {
        let catalog = LevelCatalog::for_minigame(minigame_type)
            .ok_or_else(|| ProgressionError::UnknownMinigameType(minigame_type.to_string()))?;
        let progress = MinigameProgress::load(&store, minigame_type);

        Ok(Self {
            minigame_type: minigame_type.to_string(),
            catalog,
            current_level: 1,
            progress,
            store,
        })
    }

    /// The catalog backing this engine.
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Look up a level definition.
    pub fn level_definition(&self, level_number: u32) -> Result<&LevelDefinition, ProgressionError> {
        self.catalog
            .get(level_number)
            .ok_or(ProgressionError::NotFound(level_number))
    }

    /// Whether the player may enter a level.
    pub fn is_unlocked(&self, level_number: u32) -> bool {
        self.progress.unlocked_levels.contains(&level_number)
    }

    /// The level the pointer currently rests on.
    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    /// Move the pointer to an unlocked level. A locked target leaves the
    /// pointer untouched.
    pub fn set_current_level(&mut self, level_number: u32) -> Result<(), ProgressionError> {
        if !self.is_unlocked(level_number) {
            return Err(ProgressionError::LevelLocked(level_number));
        }
        self.current_level = level_number;
        Ok(())
    }

    /// Whether a level follows the current one in the catalog.
    pub fn has_next_level(&self) -> bool {
        self.catalog.contains(self.current_level + 1)
    }

    /// Advance the pointer past a finished level. Returns the new level
    /// number, or `None` at the end of the catalog. Gating stays with
    /// [`set_current_level`]; this is plain pointer movement for the
    /// "next level" button.
    pub fn advance_to_next_level(&mut self) -> Option<u32> {
        if self.has_next_level() {
            self.current_level += 1;
            Some(self.current_level)
        } else {
            None
        }
    }

    /// Step the pointer back one level. Returns the new level number, or
    /// `None` when already at level 1.
    pub fn back_to_previous_level(&mut self) -> Option<u32> {
        if self.current_level > 1 {
            self.current_level -= 1;
            Some(self.current_level)
        } else {
            None
        }
    }

    /// Record a completion: score it, merge it into the stored record,
    /// unlock the next level, recompute totals, and persist.
    ///
    /// Replays only improve the stored record (stars up, best time down) but
    /// always re-earn points, matching the game's long-standing scoring.
    pub fn complete_level(
        &mut self,
        level_number: u32,
        performance: LevelPerformance,
    ) -> Result<CompletionResult, ProgressionError> {
        let level = self
            .catalog
            .get(level_number)
            .ok_or(ProgressionError::NotFound(level_number))?;
        let stars_awarded = calculate_stars(&performance, level);
        let points = level.points;

        self.progress
            .levels
            .entry(level_number)
            .or_default()
            .record_completion(stars_awarded, performance.time_secs, now_millis());

        let next_level = level_number + 1;
        let has_next_level = self.catalog.contains(next_level);
        if has_next_level {
            self.progress.unlocked_levels.insert(next_level);
        }

        self.progress.total_stars = self.progress.sum_stars();
        self.progress.total_points += u64::from(points) * u64::from(stars_awarded);
        self.progress.save(&self.store, &self.minigame_type);

        log::info!(
            "level {} of {} complete: {} stars in {:.1}s",
            level_number,
            self.minigame_type,
            stars_awarded,
            performance.time_secs
        );

        Ok(CompletionResult {
            stars_awarded,
            total_stars: self.progress.total_stars,
            next_level_unlocked: self.progress.unlocked_levels.contains(&next_level),
            has_next_level,
        })
    }

    /// Stored record for a level, or a zeroed default when never completed.
    pub fn level_progress(&self, level_number: u32) -> LevelProgressRecord {
        self.progress
            .levels
            .get(&level_number)
            .cloned()
            .unwrap_or_default()
    }

    /// Aggregate totals for the level-select screen.
    pub fn summary(&self) -> ProgressSummary {
        let completed_levels = self.progress.levels.len() as u32;
        let total_levels = self.catalog.total_levels();
        let completion_percentage = if total_levels == 0 {
            0
        } else {
            (f64::from(completed_levels) / f64::from(total_levels) * 100.0).round() as u32
        };

        ProgressSummary {
            completed_levels,
            total_levels,
            completion_percentage,
            total_stars: self.progress.total_stars,
            max_stars: total_levels * MAX_STARS,
            total_points: self.progress.total_points,
            is_completed: completed_levels == total_levels,
        }
    }

    /// Erase the persisted blob and restart from defaults.
    pub fn reset_progress(&mut self) {
        self.store.remove(&progress_key(&self.minigame_type));
        self.progress = MinigameProgress::load(&self.store, &self.minigame_type);
        self.current_level = 1;
        log::info!("progress reset for {}", self.minigame_type);
    }
}
