//! Reading progress across visits
//!
//! Tracks which page modules have been viewed, persists the viewed set, and
//! decides whether a returning reader should be offered to pick up where they
//! left off.

pub mod tracker;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

pub use tracker::ProgressTracker;

/// Default gap after which a returning reader is offered to resume (one hour)
pub const DEFAULT_RESUME_AFTER_MS: i64 = 3_600_000;

/// Message announced once when the last module is viewed
pub const COMPLETION_MESSAGE: &str = "Congratulations! You've viewed all modules.";

/// Persisted record of a module's first view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProgress {
    /// Always true once a record exists
    pub viewed: bool,

    /// Epoch milliseconds of the first view
    pub timestamp: i64,
}

impl ModuleProgress {
    /// Record for a module first viewed at `timestamp`
    pub fn first_viewed(timestamp: i64) -> Self {
        Self { viewed: true, timestamp }
    }
}

/// Completion summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Distinct configured modules viewed
    pub viewed: usize,
    /// Configured module count
    pub total: usize,
    /// `viewed / total` as a rounded percentage (0 when there are no modules)
    pub percentage: u32,
}

/// Result of reporting a module as visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordOutcome {
    /// A new record was written
    pub created: bool,
    /// This view completed the set of modules
    pub completed: bool,
}

/// Offer shown to a returning reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumePrompt {
    /// First module, in page order, that has not been viewed
    pub next_module: String,
    /// Module with the latest first-view timestamp
    pub last_viewed: Option<String>,
}

/// Errors raised by the progress tracker
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Module id is not one of the configured modules
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// Persisting progress failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
