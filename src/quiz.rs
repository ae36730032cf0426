//! Single-question knowledge checks
//!
//! The first pick locks the question; the reader sees whether it was right
//! and which options were correct.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when answering a knowledge check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The question was already answered
    #[error("Question has already been answered")]
    AlreadyAnswered,

    /// There is no option at this index
    #[error("No option at index {0}")]
    NoSuchOption(usize),
}

/// A selectable answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Text shown to the reader
    pub label: String,
    /// Whether picking this option is correct
    #[serde(default)]
    pub correct: bool,
}

/// Result of the reader's pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome<'a> {
    /// Index picked
    pub selected: usize,
    /// Whether the pick was correct
    pub correct: bool,
    /// Every correct option, to highlight after a wrong pick
    pub correct_options: Vec<usize>,
    /// Feedback for this outcome
    pub feedback: &'a str,
}

/// A multiple-choice question answered at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeCheck {
    /// Question text
    pub prompt: String,
    /// Options in display order
    pub options: Vec<QuizOption>,
    /// Feedback shown after a correct pick
    pub correct_feedback: String,
    /// Feedback shown after a wrong pick
    pub incorrect_feedback: String,
    /// Index picked, once answered
    #[serde(skip)]
    selected: Option<usize>,
}

impl KnowledgeCheck {
    /// Create an unanswered check
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<QuizOption>,
        correct_feedback: impl Into<String>,
        incorrect_feedback: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_feedback: correct_feedback.into(),
            incorrect_feedback: incorrect_feedback.into(),
            selected: None,
        }
    }

    /// Index picked, if answered
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the question is locked
    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Indexes of all correct options
    pub fn correct_options(&self) -> Vec<usize> {
        self.options.iter().enumerate().filter(|(_, o)| o.correct).map(|(i, _)| i).collect()
    }

    /// Pick the option at `index` and lock the question
    pub fn select(&mut self, index: usize) -> Result<QuizOutcome<'_>, QuizError> {
        if self.selected.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let option = self.options.get(index).ok_or(QuizError::NoSuchOption(index))?;
        let correct = option.correct;

        self.selected = Some(index);
        tracing::debug!(index, correct, "knowledge check answered");

        let feedback = if correct { &self.correct_feedback } else { &self.incorrect_feedback };
        Ok(QuizOutcome {
            selected: index,
            correct,
            correct_options: self.correct_options(),
            feedback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check() -> KnowledgeCheck {
        KnowledgeCheck::new(
            "Who maintains the protocol?",
            vec![
                QuizOption { label: "A single vendor".into(), correct: false },
                QuizOption { label: "An open industry group".into(), correct: true },
                QuizOption { label: "Nobody".into(), correct: false },
            ],
            "Correct!",
            "Not quite.",
        )
    }

    #[test]
    fn correct_pick() {
        let mut quiz = check();
        let outcome = quiz.select(1).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.feedback, "Correct!");
    }

    #[test]
    fn wrong_pick_reveals_correct_option() {
        let mut quiz = check();
        let outcome = quiz.select(0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_options, vec![1]);
        assert_eq!(outcome.feedback, "Not quite.");
    }

    #[test]
    fn question_locks_after_first_pick() {
        let mut quiz = check();
        quiz.select(0).unwrap();

        assert_eq!(quiz.select(1), Err(QuizError::AlreadyAnswered));
        assert_eq!(quiz.selected(), Some(0));
    }

    #[test]
    fn out_of_range_pick_does_not_lock() {
        let mut quiz = check();
        assert_eq!(quiz.select(9), Err(QuizError::NoSuchOption(9)));
        assert!(!quiz.is_answered());
    }

    #[test]
    fn deserializes_without_answer_state() {
        let json = r#"{
            "prompt": "Q",
            "options": [{"label": "yes", "correct": true}, {"label": "no"}],
            "correct_feedback": "ok",
            "incorrect_feedback": "nope"
        }"#;
        let quiz: KnowledgeCheck = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.correct_options(), vec![0]);
        assert!(!quiz.is_answered());
    }
}
