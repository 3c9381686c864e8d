//! Error types shared by the quiz engine, the key/value store and config loading.

use thiserror::Error;

/// Errors raised while building question banks, recording answers or loading config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {question} has no option tagged '{tag}'")]
    UnknownOption { question: usize, tag: String },
    #[error("question {question} repeats option tag '{tag}'")]
    DuplicateOption { question: usize, tag: String },
    #[error("question {0} has no options")]
    EmptyQuestion(usize),
    #[error("question bank is empty")]
    EmptyBank,
    #[error("question index {index} out of range (bank has {len} questions)")]
    OutOfRange { index: usize, len: usize },
    #[error("option tag '{tag}' on question {question} shadows category '{shadows}'")]
    ShadowedCategory {
        question: usize,
        tag: String,
        shadows: String,
    },
    #[error("page has {views} question views but the bank has {questions} questions")]
    ViewCountMismatch { views: usize, questions: usize },
    #[error("question {answered} is not the active question ({active})")]
    NotActive { answered: usize, active: usize },
    #[error("unknown category tag '{0}'")]
    UnknownCategory(String),
    #[error("invalid config: {0}")]
    Config(String),
}

/// Errors from the persistent key/value store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage rejected write for key '{0}'")]
    WriteRejected(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
