//! First-visit tracking for the in-game guide.
//!
//! The guide character walks the player through a minigame the first time
//! they open it, then stays out of the way. One boolean flag per minigame
//! type, persisted alongside the rest of the save data.

use crate::platform::storage::KeyValueStore;

fn seen_key(minigame_type: &str) -> String {
    format!("guide_{}_seen", minigame_type)
}

/// Decides whether the onboarding guide should run for a minigame.
pub struct GuideTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> GuideTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// True on the first visit to `minigame_type`, false afterwards.
    /// Marks the minigame as visited as a side effect.
    pub fn should_show_guide(&self, minigame_type: &str) -> bool {
        let key = seen_key(minigame_type);
        if self.store.get(&key).as_deref() == Some("true") {
            return false;
        }
        if let Err(e) = self.store.set(&key, "true") {
            log::warn!("failed to mark guide seen for {}: {}", minigame_type, e);
        }
        true
    }

    /// Forget the visit, so the guide runs again next time.
    pub fn reset(&self, minigame_type: &str) {
        self.store.remove(&seen_key(minigame_type));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    #[test]
    fn test_guide_shows_exactly_once() {
        let tracker = GuideTracker::new(MemoryStore::new());
        assert!(tracker.should_show_guide("sequence"));
        assert!(!tracker.should_show_guide("sequence"));
        assert!(!tracker.should_show_guide("sequence"));
    }

    #[test]
    fn test_guide_tracked_per_minigame() {
        let tracker = GuideTracker::new(MemoryStore::new());
        assert!(tracker.should_show_guide("sequence"));
        assert!(tracker.should_show_guide("matching"));
        assert!(!tracker.should_show_guide("sequence"));
    }

    #[test]
    fn test_reset_restores_first_visit() {
        let tracker = GuideTracker::new(MemoryStore::new());
        tracker.should_show_guide("sequence");
        tracker.reset("sequence");
        assert!(tracker.should_show_guide("sequence"));
    }
}
