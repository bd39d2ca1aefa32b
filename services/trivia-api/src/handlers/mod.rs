//! HTTP handlers
//!
//! Handlers are generic over the store so the same router runs against
//! PostgreSQL in production and the in-memory store in tests.

pub mod categories;
pub mod questions;
pub mod quizzes;

use serde::Serialize;

use crate::models::Question;

/// Stores shared by every trivia handler
#[derive(Debug, Clone)]
pub struct TriviaState<Q, C> {
    pub questions: Q,
    pub categories: C,
}

impl<Q, C> TriviaState<Q, C> {
    pub fn new(questions: Q, categories: C) -> Self {
        Self {
            questions,
            categories,
        }
    }
}

/// One page of questions
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    pub current_category: Option<i64>,
}
