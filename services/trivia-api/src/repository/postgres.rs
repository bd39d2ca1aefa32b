//! PostgreSQL trivia store
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE categories (
//!     id   BIGSERIAL PRIMARY KEY,
//!     type TEXT NOT NULL
//! );
//!
//! CREATE TABLE questions (
//!     id         BIGSERIAL PRIMARY KEY,
//!     question   TEXT NOT NULL,
//!     answer     TEXT NOT NULL,
//!     category   BIGINT NOT NULL REFERENCES categories (id),
//!     difficulty INTEGER NOT NULL
//! );
//! ```

use sqlx::PgPool;

use plinth::repository::{Repository, RepositoryError, RepositoryOperation, RepositoryResult};

use super::{CategoryRepository, QuestionRepository};
use crate::models::{Category, NewQuestion, Question};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

#[derive(Debug, Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Repository<i64, Question, NewQuestion> for PgQuestionRepository {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindById))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id");
        sqlx::query_as::<_, Question>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindAll))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Count))?;
        Ok(count.max(0) as u64)
    }

    async fn create(&self, data: NewQuestion) -> RepositoryResult<Question> {
        let sql = format!(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES ($1, $2, $3, $4) RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&sql)
            .bind(&data.question)
            .bind(&data.answer)
            .bind(data.category)
            .bind(data.difficulty)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Create))
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Delete))?;
        Ok(result.rows_affected() > 0)
    }
}

impl QuestionRepository for PgQuestionRepository {
    async fn find_by_category(&self, category: i64) -> RepositoryResult<Vec<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE category = $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Query))
    }

    async fn search(&self, term: &str) -> RepositoryResult<Vec<Question>> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions \
             WHERE question ILIKE '%' || $1 || '%' ESCAPE '\\' ORDER BY id"
        );
        sqlx::query_as::<_, Question>(&sql)
            .bind(escape_like(term))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::Query))
    }
}

impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> RepositoryResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(RepositoryOperation::FindAll))
    }
}

/// Escape LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("plain"), "plain");
    }
}
