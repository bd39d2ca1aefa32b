//! List and todo stores

use std::future::Future;

use plinth::repository::{Repository, RepositoryResult, UpdateRepository};

use crate::models::{NewTodo, NewTodoList, Todo, TodoList, TodoPatch};

mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use memory::{InMemoryLists, InMemoryTodoStore, InMemoryTodos};
#[cfg(feature = "database")]
pub use postgres::{PgTodoListRepository, PgTodoRepository};

/// List store
///
/// `delete` removes the list together with every todo it owns, atomically.
pub trait TodoListRepository: Repository<i64, TodoList, NewTodoList> {
    /// Mark the list and all of its todos completed in one step
    ///
    /// Returns `false` if the list does not exist.
    fn mark_completed(&self, id: &i64) -> impl Future<Output = RepositoryResult<bool>> + Send;
}

/// Todo store
///
/// `create` fails with a constraint violation when the list does not exist.
pub trait TodoRepository: UpdateRepository<i64, Todo, NewTodo, TodoPatch> {
    /// Todos on one list, ordered by id
    fn find_by_list(&self, list_id: &i64) -> impl Future<Output = RepositoryResult<Vec<Todo>>> + Send;
}
