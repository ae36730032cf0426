//! Readiness calculator
//!
//! Runs a fixed questionnaire to a score and classifies the result into a
//! tier with recommendation content.

pub mod engine;
pub mod error;
pub mod tier;

pub use engine::{AnswerOption, Assessment, Question, Questionnaire, ScoringEngine, SessionState};
pub use error::ScoringError;
pub use tier::{ImpactMetric, Tier, TierContent};
