//! Cuy Minigames - progression core for an educational browser game
//!
//! Core modules:
//! - `catalog`: Static level definitions per minigame type
//! - `progression`: Unlocks, star scoring, aggregate totals, persistence
//! - `session`: Per-level attempt state machine with a completion guard
//! - `navigation`: Resumable-scene record across page reloads
//! - `onboarding`: First-visit guide tracking
//! - `platform`: Browser/native time, storage, and logging
//!
//! The crate is an embedded library: the rendering host delivers drop
//! events and reads back completion and progress results. Everything here
//! runs synchronously inside the host's input and timer callbacks.

pub mod catalog;
pub mod navigation;
pub mod onboarding;
pub mod platform;
pub mod progression;
pub mod session;

pub use catalog::{Difficulty, LevelCatalog, LevelCategory, LevelDefinition, MinigameConfig, Slot};
pub use navigation::{is_resumable, is_valid_scene, SceneRecord, SceneStore};
pub use onboarding::GuideTracker;
pub use platform::storage::{KeyValueStore, MemoryStore, StorageError};
pub use progression::{
    CompletionResult, LevelPerformance, MinigameProgress, ProgressSummary, ProgressionEngine,
    ProgressionError,
};
pub use session::{AttemptOutcome, CompletionReport, PuzzleSession, SessionPhase};

/// Tuning constants shared with the presentation layer
pub mod consts {
    /// Star cap per level.
    pub const MAX_STARS: u32 = 3;
    /// Fraction of a level's time budget that still earns the speed star.
    pub const STAR_TIME_RATIO: f64 = 0.7;
    /// Drop-to-target distance (pixels) the presentation layer treats as
    /// on-target when it evaluates a drag release.
    pub const DROP_PROXIMITY_PX: f32 = 50.0;
}
