//! Trivia question API
//!
//! Categories, paginated questions, search, question creation and deletion,
//! and quiz play that never repeats a question within a round.

pub mod handlers;
pub mod models;
pub mod quiz;
pub mod repository;

use axum::{
    routing::{delete, get, post},
    Router,
};
use plinth::{health, server::json_fallbacks, state::AppState};

use handlers::{categories, questions, quizzes, TriviaState};
use repository::{CategoryRepository, QuestionRepository};

/// Build the trivia router, health probes included
pub fn router<Q, C>(stores: TriviaState<Q, C>, app_state: AppState) -> Router
where
    Q: QuestionRepository + Clone + 'static,
    C: CategoryRepository + Clone + 'static,
{
    let api = Router::new()
        .route("/categories", get(categories::list_categories::<Q, C>))
        .route(
            "/categories/{id}/questions",
            get(categories::category_questions::<Q, C>),
        )
        .route(
            "/questions",
            get(questions::list_questions::<Q, C>).post(questions::create_or_search::<Q, C>),
        )
        .route("/questions/{id}", delete(questions::delete_question::<Q, C>))
        .route("/quizzes", post(quizzes::play_quiz::<Q, C>))
        .with_state(stores);

    json_fallbacks(api.merge(health::routes(app_state)))
}
