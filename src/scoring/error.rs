//! Error types for the readiness questionnaire

use thiserror::Error;

/// Errors raised while building or running a questionnaire
///
/// None of these leave the session in a changed state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A questionnaire needs at least one question
    #[error("Questionnaire has no questions")]
    EmptyQuestionnaire,

    /// Question ids must run 1, 2, 3, ... in order
    #[error("Expected question {expected}, found question {found}")]
    NonContiguousQuestion {
        /// Id that should appear at this position
        expected: usize,
        /// Id that was supplied
        found: usize,
    },

    /// Every question needs something to pick
    #[error("Question {question} has no options")]
    NoOptions {
        /// Offending question id
        question: usize,
    },

    /// Only the current question may be answered
    #[error("Question {got} answered while question {expected} is current")]
    OutOfSequence {
        /// Current question
        expected: usize,
        /// Question the answer was for
        got: usize,
    },

    /// Every question has been answered already
    #[error("Questionnaire is already complete")]
    AlreadyComplete,

    /// Selected option does not exist on the question
    #[error("Question {question} has no option {option}")]
    UnknownOption {
        /// Question id
        question: usize,
        /// Zero-based option index
        option: usize,
    },

    /// Score is larger than any option can award
    #[error("Score {score} exceeds the maximum option score {max}")]
    ScoreOutOfRange {
        /// Score supplied
        score: u32,
        /// Largest score any option awards
        max: u32,
    },

    /// Results were requested before the last question was answered
    #[error("Questionnaire is not complete yet")]
    NotComplete,
}

impl ScoringError {
    /// Whether this error came from a caller breaking the answering contract
    /// (as opposed to a malformed questionnaire definition)
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ScoringError::OutOfSequence { .. }
                | ScoringError::AlreadyComplete
                | ScoringError::UnknownOption { .. }
                | ScoringError::ScoreOutOfRange { .. }
                | ScoringError::NotComplete
        )
    }
}
