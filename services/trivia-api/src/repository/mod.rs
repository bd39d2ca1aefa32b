//! Question and category stores

use std::future::Future;

use plinth::repository::{Repository, RepositoryResult};

use crate::models::{Category, NewQuestion, Question};

mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use memory::{InMemoryCategories, InMemoryQuestions, InMemoryTrivia};
#[cfg(feature = "database")]
pub use postgres::{PgCategoryRepository, PgQuestionRepository};

/// Question store
///
/// `create` fails with a constraint violation when the category does not
/// exist.
pub trait QuestionRepository: Repository<i64, Question, NewQuestion> {
    /// Questions in one category, ordered by id
    fn find_by_category(
        &self,
        category: i64,
    ) -> impl Future<Output = RepositoryResult<Vec<Question>>> + Send;

    /// Questions whose text contains `term`, case-insensitively, ordered by id
    fn search(&self, term: &str) -> impl Future<Output = RepositoryResult<Vec<Question>>> + Send;
}

/// Read-only category store
pub trait CategoryRepository: Send + Sync {
    /// Every category, ordered by id
    fn list(&self) -> impl Future<Output = RepositoryResult<Vec<Category>>> + Send;
}
