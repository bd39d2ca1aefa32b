use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{debug, instrument};

use plinth::{
    error::{Error, Result},
    extract::JsonBody,
    repository::Repository,
};

use super::TriviaState;
use crate::models::{Question, QuizRequest};
use crate::quiz::{select_question, QuizFilter, QuizOutcome};
use crate::repository::{CategoryRepository, QuestionRepository};

/// Category id the quiz screen sends for "All"
const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
    pub exhausted: bool,
}

impl From<QuizOutcome> for QuizResponse {
    fn from(outcome: QuizOutcome) -> Self {
        match outcome {
            QuizOutcome::Question(question) => Self {
                success: true,
                question: Some(question),
                exhausted: false,
            },
            QuizOutcome::Exhausted => Self {
                success: true,
                question: None,
                exhausted: true,
            },
        }
    }
}

/// `POST /quizzes`: a random unseen question, optionally from one category
#[instrument(skip(state))]
pub async fn play_quiz<Q, C>(
    State(state): State<TriviaState<Q, C>>,
    JsonBody(body): JsonBody<QuizRequest>,
) -> Result<Json<QuizResponse>>
where
    Q: QuestionRepository,
    C: CategoryRepository,
{
    let category = match &body.quiz_category {
        None => None,
        Some(selection) => match selection.id.as_i64() {
            Some(ALL_CATEGORIES) => None,
            Some(id) => Some(id),
            None => return Err(Error::BadRequest("invalid quiz category".to_string())),
        },
    };

    let questions = match category {
        Some(id) => state.questions.find_by_category(id).await?,
        None => state.questions.find_all().await?,
    };

    let filter = QuizFilter::new(category, body.previous_questions.unwrap_or_default());
    let outcome = select_question(&questions, &filter, &mut rand::rng());

    if outcome == QuizOutcome::Exhausted {
        debug!(?category, seen = filter.previous.len(), "Quiz exhausted");
    }

    Ok(Json(outcome.into()))
}
