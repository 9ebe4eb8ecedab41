//! Persisted progress shapes and their merge rules.
//!
//! Stored as one JSON blob per minigame type under `"<type>_progress"`.
//! Loading merges field-by-field with defaults so blobs written by older
//! builds (or hand-edited ones missing fields) still load; a blob that does
//! not parse at all is discarded and progress restarts from defaults.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::platform::storage::KeyValueStore;
use crate::platform::time::now_millis;

/// Storage key for a minigame's progress blob.
pub fn progress_key(minigame_type: &str) -> String {
    format!("{}_progress", minigame_type)
}

/// Per-level record, created on first completion and only ever improved:
/// stars never drop, best time never rises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LevelProgressRecord {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub best_time_secs: Option<f64>,
    /// Number of completions recorded for this level.
    #[serde(default)]
    pub attempts: u32,
    /// Epoch ms of the most recent completion.
    #[serde(default)]
    pub completed_at: Option<f64>,
}

impl LevelProgressRecord {
    /// Fold one completion into the record.
    pub fn record_completion(&mut self, stars: u32, time_secs: f64, now: f64) {
        self.completed = true;
        self.stars = self.stars.max(stars);
        self.best_time_secs = Some(match self.best_time_secs {
            Some(best) => best.min(time_secs),
            None => time_secs,
        });
        self.attempts += 1;
        self.completed_at = Some(now);
    }
}

/// All durable state for one minigame type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinigameProgress {
    /// Level numbers the player may enter. Always contains 1; only grows.
    #[serde(default = "default_unlocked")]
    pub unlocked_levels: BTreeSet<u32>,
    /// Completion records keyed by level number.
    #[serde(default)]
    pub levels: BTreeMap<u32, LevelProgressRecord>,
    #[serde(default)]
    pub total_stars: u32,
    #[serde(default)]
    pub total_points: u64,
    #[serde(default = "now_millis")]
    pub first_played_at: f64,
    #[serde(default = "now_millis")]
    pub last_played_at: f64,
}

fn default_unlocked() -> BTreeSet<u32> {
    BTreeSet::from([1])
}

impl Default for MinigameProgress {
    fn default() -> Self {
        let now = now_millis();
        Self {
            unlocked_levels: default_unlocked(),
            levels: BTreeMap::new(),
            total_stars: 0,
            total_points: 0,
            first_played_at: now,
            last_played_at: now,
        }
    }
}

impl MinigameProgress {
    /// Load progress for `minigame_type`, falling back to defaults when the
    /// blob is absent or corrupt. Corruption is discarded, never fatal.
    pub fn load(store: &impl KeyValueStore, minigame_type: &str) -> Self {
        let key = progress_key(minigame_type);
        let mut progress = match store.get(&key) {
            Some(json) => match serde_json::from_str::<MinigameProgress>(&json) {
                Ok(progress) => progress,
                Err(e) => {
                    log::warn!(
                        "discarding corrupt progress for {}: {}",
                        minigame_type,
                        e
                    );
                    store.remove(&key);
                    Self::default()
                }
            },
            None => {
                log::info!("no saved progress for {}, starting fresh", minigame_type);
                Self::default()
            }
        };

        // Invariant regardless of what the blob said: level 1 is open.
        progress.unlocked_levels.insert(1);
        progress
    }

    /// Persist the blob. A rejected write is logged and swallowed; the
    /// in-memory state stays authoritative for the session.
    pub fn save(&mut self, store: &impl KeyValueStore, minigame_type: &str) {
        self.last_played_at = now_millis();
        if let Ok(json) = serde_json::to_string(self) {
            if let Err(e) = store.set(&progress_key(minigame_type), &json) {
                log::warn!(
                    "failed to save progress for {}: {}; continuing in-memory",
                    minigame_type,
                    e
                );
            }
        }
    }

    /// Recomputed sum of stars over all level records.
    pub fn sum_stars(&self) -> u32 {
        self.levels.values().map(|r| r.stars).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    #[test]
    fn test_fresh_progress_defaults() {
        let store = MemoryStore::new();
        let progress = MinigameProgress::load(&store, "sequence");
        assert_eq!(progress.unlocked_levels, BTreeSet::from([1]));
        assert!(progress.levels.is_empty());
        assert_eq!(progress.total_stars, 0);
        assert_eq!(progress.total_points, 0);
    }

    #[test]
    fn test_partial_blob_merges_with_defaults() {
        let store = MemoryStore::new();
        store
            .set("sequence_progress", r#"{"unlocked_levels":[1,2,3]}"#)
            .unwrap();

        let progress = MinigameProgress::load(&store, "sequence");
        assert_eq!(progress.unlocked_levels, BTreeSet::from([1, 2, 3]));
        assert!(progress.levels.is_empty());
        assert_eq!(progress.total_points, 0);
        assert!(progress.first_played_at > 0.0);
    }

    #[test]
    fn test_corrupt_blob_is_discarded() {
        let store = MemoryStore::new();
        store.set("sequence_progress", "{not json").unwrap();

        let progress = MinigameProgress::load(&store, "sequence");
        assert_eq!(progress.unlocked_levels, BTreeSet::from([1]));
        assert!(store.get("sequence_progress").is_none());
    }

    #[test]
    fn test_level_one_reinserted_after_load() {
        let store = MemoryStore::new();
        store
            .set("sequence_progress", r#"{"unlocked_levels":[4]}"#)
            .unwrap();

        let progress = MinigameProgress::load(&store, "sequence");
        assert!(progress.unlocked_levels.contains(&1));
        assert!(progress.unlocked_levels.contains(&4));
    }

    #[test]
    fn test_record_completion_is_monotonic() {
        let mut record = LevelProgressRecord::default();

        record.record_completion(3, 12.0, 1_000.0);
        assert!(record.completed);
        assert_eq!(record.stars, 3);
        assert_eq!(record.best_time_secs, Some(12.0));
        assert_eq!(record.attempts, 1);

        // Worse replay: stars and best time hold, attempts advance.
        record.record_completion(1, 40.0, 2_000.0);
        assert_eq!(record.stars, 3);
        assert_eq!(record.best_time_secs, Some(12.0));
        assert_eq!(record.attempts, 2);
        assert_eq!(record.completed_at, Some(2_000.0));

        // Better time on a later replay is kept.
        record.record_completion(2, 8.0, 3_000.0);
        assert_eq!(record.best_time_secs, Some(8.0));
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let store = MemoryStore::new();
        let mut progress = MinigameProgress::load(&store, "sequence");
        progress.unlocked_levels.insert(2);
        progress
            .levels
            .entry(1)
            .or_default()
            .record_completion(2, 20.0, now_millis());
        progress.total_stars = progress.sum_stars();
        progress.total_points = 200;
        progress.save(&store, "sequence");

        let reloaded = MinigameProgress::load(&store, "sequence");
        assert_eq!(reloaded.unlocked_levels, BTreeSet::from([1, 2]));
        assert_eq!(reloaded.levels.get(&1).unwrap().stars, 2);
        assert_eq!(reloaded.total_stars, 2);
        assert_eq!(reloaded.total_points, 200);
    }
}
