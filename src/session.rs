//! Puzzle session - the interactive loop of a single level attempt.
//!
//! The presentation layer owns drag geometry; by the time an event reaches
//! the session it is just "this candidate was dropped, on or off the
//! target". The session counts attempts, times the run, and guards against
//! the one real reentrancy hazard: a drag-end callback racing the delayed
//! completion transition. Only the first correct drop returns a
//! [`CompletionReport`]; everything after completion is a no-op.

use crate::catalog::LevelDefinition;
use crate::platform::time::now_millis;

/// Lifecycle of one session. There is no failed terminal state; wrong
/// answers return to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    Completed,
}

/// Performance data for the completing drop, forwarded by the caller to
/// `ProgressionEngine::complete_level`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionReport {
    pub time_secs: f64,
    pub attempts: u32,
}

/// What a drop attempt amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptOutcome {
    /// Right value on the target: the session is complete.
    Correct(CompletionReport),
    /// Wrong value on the target; the session stays active.
    Wrong,
    /// Dropped away from the target; presentation returns the candidate to
    /// its origin.
    Miss,
    /// The session already completed; ignore this drop entirely.
    AlreadyCompleted,
}

/// One live attempt at a single level, created on entry and discarded on
/// exit or completion. Never persisted.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    answer: i32,
    phase: SessionPhase,
    attempts: u32,
    started_at: f64,
}

impl PuzzleSession {
    /// Start a session for a level. The clock starts immediately.
    pub fn new(level: &LevelDefinition) -> Self {
        Self {
            answer: level.missing_number,
            phase: SessionPhase::Active,
            attempts: 0,
            started_at: now_millis(),
        }
    }

    /// Evaluate a dropped candidate.
    ///
    /// Every drop while active counts as an attempt, off-target drops
    /// included. Once completed, further calls change nothing and return
    /// [`AttemptOutcome::AlreadyCompleted`], so completion side effects can
    /// only fire once however callbacks interleave.
    pub fn attempt(&mut self, candidate: i32, on_target: bool) -> AttemptOutcome {
        if self.phase == SessionPhase::Completed {
            return AttemptOutcome::AlreadyCompleted;
        }

        self.attempts += 1;

        if !on_target {
            return AttemptOutcome::Miss;
        }

        if candidate == self.answer {
            self.phase = SessionPhase::Completed;
            AttemptOutcome::Correct(CompletionReport {
                time_secs: self.elapsed_secs(),
                attempts: self.attempts,
            })
        } else {
            AttemptOutcome::Wrong
        }
    }

    /// Drops evaluated so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Seconds since the session started.
    pub fn elapsed_secs(&self) -> f64 {
        (now_millis() - self.started_at) / 1000.0
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }
}
