//! Progression state - what the player has unlocked, earned, and beaten.
//!
//! Split into the durable shapes with their merge rules (`progress`) and
//! the engine that owns them for a session (`engine`).

pub mod engine;
pub mod progress;

pub use engine::{
    calculate_stars, CompletionResult, LevelPerformance, ProgressSummary, ProgressionEngine,
    ProgressionError,
};
pub use progress::{progress_key, LevelProgressRecord, MinigameProgress};
