//! PostgreSQL list and todo store
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE todolists (
//!     id        BIGSERIAL PRIMARY KEY,
//!     name      TEXT NOT NULL,
//!     completed BOOLEAN NOT NULL DEFAULT FALSE
//! );
//!
//! CREATE TABLE todos (
//!     id          BIGSERIAL PRIMARY KEY,
//!     description TEXT NOT NULL,
//!     completed   BOOLEAN NOT NULL DEFAULT FALSE,
//!     list_id     BIGINT NOT NULL REFERENCES todolists (id)
//! );
//! ```
//!
//! Multi-row changes run in one transaction. An early return drops the
//! uncommitted transaction, which rolls it back.

use sqlx::PgPool;

use plinth::repository::{
    Repository, RepositoryError, RepositoryOperation, RepositoryResult, UpdateRepository,
};

use super::{TodoListRepository, TodoRepository};
use crate::models::{NewTodo, NewTodoList, Todo, TodoList, TodoPatch};

#[derive(Debug, Clone)]
pub struct PgTodoListRepository {
    pool: PgPool,
}

impl PgTodoListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn failed(operation: RepositoryOperation) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| RepositoryError::from(e).with_operation(operation)
}

impl Repository<i64, TodoList, NewTodoList> for PgTodoListRepository {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<TodoList>> {
        sqlx::query_as::<_, TodoList>("SELECT id, name, completed FROM todolists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::FindById))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<TodoList>> {
        sqlx::query_as::<_, TodoList>("SELECT id, name, completed FROM todolists ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::FindAll))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todolists")
            .fetch_one(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::Count))?;
        Ok(count.max(0) as u64)
    }

    async fn create(&self, data: NewTodoList) -> RepositoryResult<TodoList> {
        sqlx::query_as::<_, TodoList>(
            "INSERT INTO todolists (name) VALUES ($1) RETURNING id, name, completed",
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(failed(RepositoryOperation::Create))
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        let op = RepositoryOperation::Delete;
        let mut tx = self.pool.begin().await.map_err(failed(op))?;

        sqlx::query("DELETE FROM todos WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(failed(op))?;

        let deleted = sqlx::query("DELETE FROM todolists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(failed(op))?
            .rows_affected();

        if deleted == 0 {
            return Ok(false);
        }

        tx.commit().await.map_err(failed(op))?;
        tracing::debug!(list_id = id, "Deleted list and its todos");
        Ok(true)
    }
}

impl TodoListRepository for PgTodoListRepository {
    async fn mark_completed(&self, id: &i64) -> RepositoryResult<bool> {
        let op = RepositoryOperation::Update;
        let mut tx = self.pool.begin().await.map_err(failed(op))?;

        let updated = sqlx::query("UPDATE todolists SET completed = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(failed(op))?
            .rows_affected();

        if updated == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE todos SET completed = TRUE WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(failed(op))?;

        tx.commit().await.map_err(failed(op))?;
        Ok(true)
    }
}

impl Repository<i64, Todo, NewTodo> for PgTodoRepository {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Todo>> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, description, completed, list_id FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(failed(RepositoryOperation::FindById))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Todo>> {
        sqlx::query_as::<_, Todo>("SELECT id, description, completed, list_id FROM todos ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::FindAll))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::Count))?;
        Ok(count.max(0) as u64)
    }

    async fn create(&self, data: NewTodo) -> RepositoryResult<Todo> {
        // A dangling list id surfaces as a foreign-key violation
        sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (description, list_id) VALUES ($1, $2) \
             RETURNING id, description, completed, list_id",
        )
        .bind(&data.description)
        .bind(data.list_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from(e)
                .with_operation(RepositoryOperation::Create)
                .with_entity("TodoList", data.list_id.to_string())
        })
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(failed(RepositoryOperation::Delete))?;
        Ok(result.rows_affected() > 0)
    }
}

impl UpdateRepository<i64, Todo, NewTodo, TodoPatch> for PgTodoRepository {
    async fn update(&self, id: &i64, data: TodoPatch) -> RepositoryResult<Option<Todo>> {
        sqlx::query_as::<_, Todo>(
            "UPDATE todos SET completed = $2 WHERE id = $1 \
             RETURNING id, description, completed, list_id",
        )
        .bind(id)
        .bind(data.completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(failed(RepositoryOperation::Update))
    }
}

impl TodoRepository for PgTodoRepository {
    async fn find_by_list(&self, list_id: &i64) -> RepositoryResult<Vec<Todo>> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, description, completed, list_id FROM todos WHERE list_id = $1 ORDER BY id",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await
        .map_err(failed(RepositoryOperation::Query))
    }
}
