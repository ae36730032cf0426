//! Readiness questionnaire session
//!
//! A session walks a fixed questionnaire exactly once, front to back. Each
//! answer adds the chosen option's score to a running total; once the last
//! question is answered the session is complete and can be classified.

use serde::{Deserialize, Serialize};

use super::error::ScoringError;
use super::tier::{Tier, TierContent};
use crate::percent_of;

/// A selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Points awarded when chosen
    pub score: u32,
}

/// One questionnaire step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the questionnaire
    pub id: usize,
    /// Options in display order
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Create a question whose options award `scores`
    pub fn new(id: usize, scores: &[u32]) -> Self {
        Self { id, options: scores.iter().map(|&score| AnswerOption { score }).collect() }
    }

    /// Highest score any option awards
    pub fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }
}

/// Validated, immutable list of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    questions: Vec<Question>,
    max_option_score: u32,
}

impl Questionnaire {
    /// Number of questions in the standard readiness questionnaire
    pub const READINESS_QUESTIONS: usize = 8;

    /// Option scores used by every readiness question
    pub const READINESS_SCORES: [u32; 4] = [0, 1, 2, 3];

    /// Build a questionnaire, checking ids run 1..=n and every question has options
    pub fn new(questions: Vec<Question>) -> Result<Self, ScoringError> {
        if questions.is_empty() {
            return Err(ScoringError::EmptyQuestionnaire);
        }

        for (position, question) in questions.iter().enumerate() {
            let expected = position + 1;
            if question.id != expected {
                return Err(ScoringError::NonContiguousQuestion { expected, found: question.id });
            }
            if question.options.is_empty() {
                return Err(ScoringError::NoOptions { question: question.id });
            }
        }

        let max_option_score = questions.iter().map(Question::max_score).max().unwrap_or(0);
        Ok(Self { questions, max_option_score })
    }

    /// `count` questions that all share the same option scores
    pub fn uniform(count: usize, option_scores: &[u32]) -> Result<Self, ScoringError> {
        Self::new((1..=count).map(|id| Question::new(id, option_scores)).collect())
    }

    /// The standard eight-question readiness calculator
    pub fn readiness() -> Self {
        let questions = (1..=Self::READINESS_QUESTIONS)
            .map(|id| Question::new(id, &Self::READINESS_SCORES))
            .collect();
        let max_option_score = Self::READINESS_SCORES.iter().copied().max().unwrap_or(0);
        Self { questions, max_option_score }
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated questionnaire
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by its 1-based id
    pub fn question(&self, id: usize) -> Option<&Question> {
        id.checked_sub(1).and_then(|i| self.questions.get(i))
    }

    /// All questions in order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Highest score any option in any question awards
    pub fn max_option_score(&self) -> u32 {
        self.max_option_score
    }

    /// Upper bound on a session's total score
    pub fn max_total_score(&self) -> u64 {
        self.questions.len() as u64 * u64::from(self.max_option_score)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::readiness()
    }
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Some questions remain (including "none answered yet")
    #[default]
    InProgress,
    /// Every question has been answered
    Complete,
}

/// Final classification of a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    /// Total points scored
    pub score: u64,
    /// Maximum attainable points
    pub max_score: u64,
    /// Score as a rounded share of the maximum
    pub percentage: u32,
    /// Tier for `percentage`
    pub tier: Tier,
}

impl Assessment {
    /// Static result content for the tier
    pub fn content(&self) -> &'static TierContent {
        self.tier.content()
    }
}

/// One run through a questionnaire
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    questionnaire: Questionnaire,
    /// 1-based; `len + 1` once complete
    current_question: usize,
    total_score: u64,
}

impl ScoringEngine {
    /// Start a session at question 1
    pub fn new(questionnaire: Questionnaire) -> Self {
        Self { questionnaire, current_question: 1, total_score: 0 }
    }

    /// The questionnaire being run
    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Question awaiting an answer (exceeds the question count once complete)
    pub fn current_question(&self) -> usize {
        self.current_question
    }

    /// Points accumulated so far
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Number of questions answered
    pub fn answered(&self) -> usize {
        self.current_question - 1
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        if self.current_question > self.questionnaire.len() {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    /// Record `score` for question `question`
    ///
    /// Only the current question may be answered. Rejected answers leave the
    /// session untouched.
    pub fn answer(&mut self, question: usize, score: u32) -> Result<SessionState, ScoringError> {
        if self.state() == SessionState::Complete {
            tracing::debug!(question, "answer rejected, questionnaire already complete");
            return Err(ScoringError::AlreadyComplete);
        }
        if question != self.current_question {
            tracing::debug!(question, expected = self.current_question, "answer out of sequence");
            return Err(ScoringError::OutOfSequence {
                expected: self.current_question,
                got: question,
            });
        }
        let max = self.questionnaire.max_option_score();
        if score > max {
            return Err(ScoringError::ScoreOutOfRange { score, max });
        }

        self.total_score += u64::from(score);
        self.current_question += 1;

        let state = self.state();
        if state == SessionState::Complete {
            tracing::info!(score = self.total_score, "questionnaire complete");
        }
        Ok(state)
    }

    /// Record the option at `option` (0-based) for question `question`
    pub fn select_option(
        &mut self,
        question: usize,
        option: usize,
    ) -> Result<SessionState, ScoringError> {
        let score = self
            .questionnaire
            .question(question)
            .and_then(|q| q.options.get(option))
            .map(|o| o.score);

        match score {
            Some(score) => self.answer(question, score),
            None if self.state() == SessionState::Complete => Err(ScoringError::AlreadyComplete),
            None if question != self.current_question => Err(ScoringError::OutOfSequence {
                expected: self.current_question,
                got: question,
            }),
            None => Err(ScoringError::UnknownOption { question, option }),
        }
    }

    /// Live percentage against the questions answered so far
    ///
    /// This tracks pace rather than outcome: answering the first question
    /// with a top score previews 100% even though the final result divides by
    /// the full question count. Zero before anything is answered.
    pub fn current_percentage(&self) -> u32 {
        let possible = self.answered() as u64 * u64::from(self.questionnaire.max_option_score());
        percent_of(self.total_score, possible)
    }

    /// Tier of the live percentage, for colouring the preview
    pub fn preview_tier(&self) -> Tier {
        Tier::from_percentage(self.current_percentage())
    }

    /// Share of the questionnaire reached, for the step progress bar
    pub fn progress_percentage(&self) -> u32 {
        let total = self.questionnaire.len();
        percent_of(self.current_question.min(total) as u64, total as u64)
    }

    /// Classify a completed session
    pub fn finalize(&self) -> Result<Assessment, ScoringError> {
        if self.state() != SessionState::Complete {
            return Err(ScoringError::NotComplete);
        }

        let max_score = self.questionnaire.max_total_score();
        let percentage = percent_of(self.total_score, max_score);
        Ok(Assessment {
            score: self.total_score,
            max_score,
            percentage,
            tier: Tier::from_percentage(percentage),
        })
    }

    /// Discard all answers and return to question 1
    pub fn reset(&mut self) {
        self.current_question = 1;
        self.total_score = 0;
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(Questionnaire::readiness())
    }
}
