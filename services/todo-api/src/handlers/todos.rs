use axum::{extract::State, response::Redirect, Json};
use tracing::{info, instrument};

use plinth::{
    error::{Error, Result},
    extract::{EntityPath, JsonBody},
    repository::{Repository, UpdateRepository},
};

use super::{Success, TodoState};
use crate::models::{CreateTodoRequest, SetCompletedRequest, Todo, TodoPatch};
use crate::repository::{TodoListRepository, TodoRepository};

/// `POST /todos/create`
#[instrument(skip(state))]
pub async fn create_todo<L, T>(
    State(state): State<TodoState<L, T>>,
    JsonBody(body): JsonBody<CreateTodoRequest>,
) -> Result<Json<Success<Todo>>>
where
    L: TodoListRepository,
    T: TodoRepository,
{
    let new_todo = body
        .into_new_todo()
        .map_err(|field| Error::BadRequest(format!("missing or invalid field: {field}")))?;
    let todo = state.todos.create(new_todo).await?;

    info!(todo_id = todo.id, list_id = todo.list_id, "Created todo");
    Ok(Json(Success::with(todo)))
}

/// `POST /todos/{id}/set-completed`, then back to the index
#[instrument(skip(state))]
pub async fn set_completed<L, T>(
    State(state): State<TodoState<L, T>>,
    EntityPath(id): EntityPath<i64>,
    JsonBody(body): JsonBody<SetCompletedRequest>,
) -> Result<Redirect>
where
    L: TodoListRepository,
    T: TodoRepository,
{
    let completed = body
        .completed
        .ok_or_else(|| Error::BadRequest("missing or invalid field: completed".to_string()))?;

    state
        .todos
        .update(&id, TodoPatch { completed })
        .await?
        .ok_or_else(Error::resource_not_found)?;

    info!(todo_id = id, completed, "Updated todo");
    Ok(Redirect::to("/"))
}

/// `DELETE /todos/{id}`
#[instrument(skip(state))]
pub async fn delete_todo<L, T>(
    State(state): State<TodoState<L, T>>,
    EntityPath(id): EntityPath<i64>,
) -> Result<Json<Success>>
where
    L: TodoListRepository,
    T: TodoRepository,
{
    if !state.todos.delete(&id).await? {
        return Err(Error::resource_not_found());
    }

    info!(todo_id = id, "Deleted todo");
    Ok(Json(Success::empty()))
}
