//! Scene resume - where to drop the player after a page reload.
//!
//! One global record under a fixed key. Only allow-listed scenes are ever
//! persisted: level menus and in-level scenes carry enough context to
//! rebuild themselves, while transient scenes (congratulations overlays,
//! menu transitions) depend on data that no longer exists after a reload.
//! A record past its shelf life, or one that fails to parse, is cleared on
//! read and treated as absent.

use serde::{Deserialize, Serialize};

use crate::platform::storage::KeyValueStore;
use crate::platform::time::now_millis;

/// Storage key for the single scene record.
const STORAGE_KEY: &str = "game_current_scene";

/// Records older than this are dropped on read (24 hours).
pub const MAX_SCENE_AGE_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// The scene every resume falls back to.
pub const FALLBACK_SCENE: &str = "MainMenuScene";

/// Scenes that may be resumed into after a reload.
pub const RESUMABLE_SCENES: &[&str] = &[
    "SequenceGameScene",
    "LevelMenuScene",
    "NumbersLevelMenuScene",
    "AdditionsLevelMenuScene",
    "SubtractionsLevelMenuScene",
    "LogicTowerLevelMenuScene",
    "EnglishWorldLevelMenuScene",
];

/// Whether a scene key is on the resumable allow-list.
pub fn is_resumable(scene_key: &str) -> bool {
    RESUMABLE_SCENES.contains(&scene_key)
}

/// Whether a saved scene key can actually be started: the designated
/// fallback always passes, anything else must be a known scene.
pub fn is_valid_scene(scene_key: &str, known_scenes: &[&str]) -> bool {
    scene_key == FALLBACK_SCENE || known_scenes.contains(&scene_key)
}

/// The persisted "last resumable location".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub scene_key: String,
    /// Epoch ms when the record was written.
    pub timestamp: f64,
    /// Optional scene payload, e.g. which level the menu had selected.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Persistence for the single global [`SceneRecord`].
pub struct SceneStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SceneStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrite the record with `scene_key` and an optional payload.
    pub fn save(&self, scene_key: &str, data: Option<serde_json::Value>) {
        let record = SceneRecord {
            scene_key: scene_key.to_string(),
            timestamp: now_millis(),
            data,
        };
        if let Ok(json) = serde_json::to_string(&record) {
            if let Err(e) = self.store.set(STORAGE_KEY, &json) {
                log::warn!("failed to save scene state: {}", e);
            }
        }
    }

    /// Save `scene_key` only if it is resumable; transient scenes are
    /// silently skipped. Hook this into the host's scene-start event.
    pub fn track(&self, scene_key: &str) {
        if is_resumable(scene_key) {
            self.save(scene_key, None);
        }
    }

    /// The saved record, or `None` when missing, corrupt, or stale.
    /// Corrupt and stale records are cleared as a side effect.
    pub fn read(&self) -> Option<SceneRecord> {
        let json = self.store.get(STORAGE_KEY)?;

        let record = match serde_json::from_str::<SceneRecord>(&json) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("clearing corrupt scene state: {}", e);
                self.clear();
                return None;
            }
        };

        if now_millis() - record.timestamp > MAX_SCENE_AGE_MS {
            log::info!("saved scene state is too old, clearing");
            self.clear();
            return None;
        }

        Some(record)
    }

    /// Remove the record unconditionally.
    pub fn clear(&self) {
        self.store.remove(STORAGE_KEY);
    }

    /// Whether a usable record exists.
    pub fn has_saved_scene(&self) -> bool {
        self.read().is_some()
    }

    /// Key of the saved scene, if a usable record exists.
    pub fn saved_scene_key(&self) -> Option<String> {
        self.read().map(|r| r.scene_key)
    }

    /// Payload of the saved scene, if a usable record carries one.
    pub fn saved_scene_data(&self) -> Option<serde_json::Value> {
        self.read().and_then(|r| r.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;
    use serde_json::json;

    fn scene_store() -> (SceneStore<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        (SceneStore::new(store.clone()), store)
    }

    #[test]
    fn test_save_then_read_roundtrip() {
        let (scenes, _) = scene_store();
        scenes.save("LevelMenuScene", Some(json!({ "level": 3 })));

        let record = scenes.read().expect("record present");
        assert_eq!(record.scene_key, "LevelMenuScene");
        assert_eq!(record.data, Some(json!({ "level": 3 })));
        assert!(record.timestamp > 0.0);
    }

    #[test]
    fn test_read_without_save_is_absent() {
        let (scenes, _) = scene_store();
        assert!(scenes.read().is_none());
        assert!(!scenes.has_saved_scene());
    }

    #[test]
    fn test_stale_record_cleared_on_read() {
        let (scenes, store) = scene_store();
        let stale = SceneRecord {
            scene_key: "LevelMenuScene".to_string(),
            timestamp: now_millis() - MAX_SCENE_AGE_MS - 1_000.0,
            data: None,
        };
        store
            .set(STORAGE_KEY, &serde_json::to_string(&stale).unwrap())
            .unwrap();

        assert!(scenes.read().is_none());
        assert!(store.get(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_corrupt_record_cleared_on_read() {
        let (scenes, store) = scene_store();
        store.set(STORAGE_KEY, "{broken").unwrap();

        assert!(scenes.read().is_none());
        assert!(store.get(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_clear_removes_record() {
        let (scenes, store) = scene_store();
        scenes.save("SequenceGameScene", None);
        scenes.clear();
        assert!(store.get(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let (scenes, _) = scene_store();
        scenes.save("LevelMenuScene", Some(json!({ "level": 1 })));
        scenes.save("SequenceGameScene", None);

        let record = scenes.read().unwrap();
        assert_eq!(record.scene_key, "SequenceGameScene");
        assert_eq!(record.data, None);
    }

    #[test]
    fn test_track_skips_transient_scenes() {
        let (scenes, _) = scene_store();
        scenes.track("CongratulationsScene");
        assert!(scenes.read().is_none());

        scenes.track("SequenceGameScene");
        assert_eq!(scenes.saved_scene_key().as_deref(), Some("SequenceGameScene"));
    }

    #[test]
    fn test_is_valid_scene_fallback_and_membership() {
        let known = ["LevelMenuScene", "SequenceGameScene"];
        assert!(is_valid_scene("MainMenuScene", &known));
        assert!(is_valid_scene("LevelMenuScene", &known));
        assert!(!is_valid_scene("GhostScene", &known));
        assert!(is_valid_scene("MainMenuScene", &[]));
    }

    #[test]
    fn test_saved_scene_accessors() {
        let (scenes, _) = scene_store();
        assert!(scenes.saved_scene_key().is_none());
        assert!(scenes.saved_scene_data().is_none());

        scenes.save("LevelMenuScene", Some(json!({ "level": 5 })));
        assert!(scenes.has_saved_scene());
        assert_eq!(scenes.saved_scene_key().as_deref(), Some("LevelMenuScene"));
        assert_eq!(scenes.saved_scene_data(), Some(json!({ "level": 5 })));
    }
}
