//! Todo list API
//!
//! Lists own their todos: deleting a list deletes its todos, and completing
//! a list completes every todo on it.

pub mod handlers;
pub mod models;
pub mod repository;

use axum::{
    routing::{delete, get, post},
    Router,
};
use plinth::{health, server::json_fallbacks, state::AppState};

use handlers::{lists, todos, TodoState};
use repository::{TodoListRepository, TodoRepository};

/// Build the todo router, health probes included
pub fn router<L, T>(stores: TodoState<L, T>, app_state: AppState) -> Router
where
    L: TodoListRepository + Clone + 'static,
    T: TodoRepository + Clone + 'static,
{
    let api = Router::new()
        .route("/", get(lists::index))
        .route("/lists", post(lists::create_list::<L, T>))
        .route("/lists/{id}", get(lists::show_list::<L, T>))
        .route("/lists/{id}/set-completed", post(lists::complete_list::<L, T>))
        .route("/lists/{id}/delete", delete(lists::delete_list::<L, T>))
        .route("/todos/create", post(todos::create_todo::<L, T>))
        .route("/todos/{id}/set-completed", post(todos::set_completed::<L, T>))
        .route("/todos/{id}", delete(todos::delete_todo::<L, T>))
        .with_state(stores);

    json_fallbacks(api.merge(health::routes(app_state)))
}
