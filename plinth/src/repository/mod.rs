//! Repository traits for store abstractions
//!
//! Handlers depend on these traits, never on a concrete store. Each service
//! ships an in-memory implementation (tests, local runs) and a PostgreSQL one
//! behind the `database` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use plinth::repository::{Repository, RepositoryResult};
//!
//! struct PgTodoListRepository {
//!     pool: PgPool,
//! }
//!
//! impl Repository<i64, TodoList, NewTodoList> for PgTodoListRepository {
//!     async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<TodoList>> {
//!         sqlx::query_as("SELECT id, name, completed FROM todolists WHERE id = $1")
//!             .bind(id)
//!             .fetch_optional(&self.pool)
//!             .await
//!             .map_err(Into::into)
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use traits::{Repository, RepositoryResult, UpdateRepository};
