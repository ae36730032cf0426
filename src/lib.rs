//! Enablement Hub - the interactive core of an enablement page
//!
//! Scores a readiness questionnaire into tiers and tracks which page modules
//! a reader has seen across visits, with a few smaller helpers for knowledge
//! checks, FAQ browsing and module navigation. Nothing here owns an event
//! loop; the surrounding page forwards events in.

pub mod config;
pub mod faq;
pub mod navigation;
pub mod notify;
pub mod progress;
pub mod quiz;
pub mod scoring;
pub mod store;

pub use config::Config;
pub use progress::ProgressTracker;
pub use scoring::ScoringEngine;

/// `part / whole` as a percentage rounded half up; zero when `whole` is zero
pub fn percent_of(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u128::from(part), u128::from(whole));
    ((part * 200 + whole) / (whole * 2)) as u32
}

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
