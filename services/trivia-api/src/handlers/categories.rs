use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use plinth::{
    error::Result,
    extract::{EntityPath, PageParams},
    pagination::require_page,
};

use super::{QuestionPage, TriviaState};
use crate::repository::{CategoryRepository, QuestionRepository};

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<String>,
}

/// `GET /categories`: every category name, ordered by id
#[instrument(skip(state))]
pub async fn list_categories<Q, C>(
    State(state): State<TriviaState<Q, C>>,
) -> Result<Json<CategoriesResponse>>
where
    Q: QuestionRepository,
    C: CategoryRepository,
{
    let categories = state
        .categories
        .list()
        .await?
        .into_iter()
        .map(|category| category.kind)
        .collect();

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// `GET /categories/{id}/questions`
#[instrument(skip(state))]
pub async fn category_questions<Q, C>(
    State(state): State<TriviaState<Q, C>>,
    EntityPath(category_id): EntityPath<i64>,
    PageParams(page): PageParams,
) -> Result<Json<QuestionPage>>
where
    Q: QuestionRepository,
    C: CategoryRepository,
{
    let selection = state.questions.find_by_category(category_id).await?;
    let questions = require_page(&selection, page.page_number())?;

    Ok(Json(QuestionPage {
        success: true,
        questions,
        total_questions: selection.len(),
        categories: None,
        current_category: Some(category_id),
    }))
}
