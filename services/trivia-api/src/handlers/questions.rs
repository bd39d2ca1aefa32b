use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, instrument};

use plinth::{
    error::{Error, Result},
    extract::{EntityPath, JsonBody, PageParams},
    pagination::require_page,
    repository::Repository,
};

use super::{QuestionPage, TriviaState};
use crate::models::QuestionsRequest;
use crate::repository::{CategoryRepository, QuestionRepository};

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub question: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i64,
    pub num_questions: u64,
}

/// `GET /questions`: every question ordered by id, plus the category names
#[instrument(skip(state))]
pub async fn list_questions<Q, C>(
    State(state): State<TriviaState<Q, C>>,
    PageParams(page): PageParams,
) -> Result<Json<QuestionPage>>
where
    Q: QuestionRepository,
    C: CategoryRepository,
{
    let selection = state.questions.find_all().await?;
    let questions = require_page(&selection, page.page_number())?;
    let categories = state
        .categories
        .list()
        .await?
        .into_iter()
        .map(|category| category.kind)
        .collect();

    Ok(Json(QuestionPage {
        success: true,
        questions,
        total_questions: selection.len(),
        categories: Some(categories),
        current_category: None,
    }))
}

/// `DELETE /questions/{id}`
#[instrument(skip(state))]
pub async fn delete_question<Q, C>(
    State(state): State<TriviaState<Q, C>>,
    EntityPath(id): EntityPath<i64>,
) -> Result<Json<DeletedResponse>>
where
    Q: QuestionRepository,
    C: CategoryRepository,
{
    if !state.questions.delete(&id).await? {
        return Err(Error::resource_not_found());
    }

    info!(question_id = id, "Deleted question");
    Ok(Json(DeletedResponse {
        success: true,
        question: id,
    }))
}

/// `POST /questions`: search when `searchTerm` is set, otherwise create
#[instrument(skip(state))]
pub async fn create_or_search<Q, C>(
    State(state): State<TriviaState<Q, C>>,
    PageParams(page): PageParams,
    JsonBody(body): JsonBody<QuestionsRequest>,
) -> Result<Response>
where
    Q: QuestionRepository,
    C: CategoryRepository,
{
    if let Some(term) = body.search() {
        let selection = state.questions.search(term).await?;
        let questions = require_page(&selection, page.page_number())?;

        return Ok(Json(QuestionPage {
            success: true,
            questions,
            total_questions: selection.len(),
            categories: None,
            current_category: None,
        })
        .into_response());
    }

    let new_question = body
        .to_new_question()
        .map_err(|field| Error::BadRequest(format!("missing or invalid field: {field}")))?;

    let question = state.questions.create(new_question).await?;
    let num_questions = state.questions.count().await?;
    info!(question_id = question.id, category = question.category, "Created question");

    Ok(Json(CreatedResponse {
        success: true,
        created: question.id,
        num_questions,
    })
    .into_response())
}
