use axum::{extract::State, response::Redirect, Json};
use serde::Serialize;
use tracing::{info, instrument};

use plinth::{
    error::{Error, Result},
    extract::{EntityPath, JsonBody},
    repository::Repository,
};

use super::{Success, TodoState};
use crate::models::{CreateListRequest, Todo, TodoList};
use crate::repository::{TodoListRepository, TodoRepository};

/// Everything the list page shows
#[derive(Debug, Serialize)]
pub struct ListView {
    pub success: bool,
    pub lists: Vec<TodoList>,
    pub active_list: TodoList,
    pub todos: Vec<Todo>,
}

/// `POST /lists`
#[instrument(skip(state))]
pub async fn create_list<L, T>(
    State(state): State<TodoState<L, T>>,
    JsonBody(body): JsonBody<CreateListRequest>,
) -> Result<Json<Success<TodoList>>>
where
    L: TodoListRepository,
    T: TodoRepository,
{
    let new_list = body
        .into_new_list()
        .map_err(|field| Error::BadRequest(format!("missing or invalid field: {field}")))?;
    let list = state.lists.create(new_list).await?;

    info!(list_id = list.id, "Created list");
    Ok(Json(Success::with(list)))
}

/// `GET /lists/{id}`: all lists, the active one, and its todos
#[instrument(skip(state))]
pub async fn show_list<L, T>(
    State(state): State<TodoState<L, T>>,
    EntityPath(id): EntityPath<i64>,
) -> Result<Json<ListView>>
where
    L: TodoListRepository,
    T: TodoRepository,
{
    let active_list = state
        .lists
        .find_by_id(&id)
        .await?
        .ok_or_else(Error::resource_not_found)?;
    let lists = state.lists.find_all().await?;
    let todos = state.todos.find_by_list(&id).await?;

    Ok(Json(ListView {
        success: true,
        lists,
        active_list,
        todos,
    }))
}

/// `POST /lists/{id}/set-completed`: complete the list and its todos, then show it
#[instrument(skip(state))]
pub async fn complete_list<L, T>(
    State(state): State<TodoState<L, T>>,
    EntityPath(id): EntityPath<i64>,
) -> Result<Redirect>
where
    L: TodoListRepository,
    T: TodoRepository,
{
    if !state.lists.mark_completed(&id).await? {
        return Err(Error::resource_not_found());
    }

    info!(list_id = id, "Completed list");
    Ok(Redirect::to(&format!("/lists/{id}")))
}

/// `DELETE /lists/{id}/delete`: the list and every todo on it
#[instrument(skip(state))]
pub async fn delete_list<L, T>(
    State(state): State<TodoState<L, T>>,
    EntityPath(id): EntityPath<i64>,
) -> Result<Json<Success>>
where
    L: TodoListRepository,
    T: TodoRepository,
{
    if !state.lists.delete(&id).await? {
        return Err(Error::resource_not_found());
    }

    info!(list_id = id, "Deleted list");
    Ok(Json(Success::empty()))
}

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::to("/lists/1")
}
