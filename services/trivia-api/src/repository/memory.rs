//! In-memory trivia store

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use plinth::repository::{Repository, RepositoryError, RepositoryOperation, RepositoryResult};

use super::{CategoryRepository, QuestionRepository};
use crate::models::{Category, NewQuestion, Question};

#[derive(Debug, Default)]
struct TriviaData {
    questions: BTreeMap<i64, Question>,
    categories: BTreeMap<i64, Category>,
    next_question_id: i64,
}

/// Shared backing data for [`InMemoryQuestions`] and [`InMemoryCategories`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrivia {
    data: Arc<RwLock<TriviaData>>,
}

impl InMemoryTrivia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the six stock categories
    pub fn with_default_categories() -> Self {
        let categories = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
            .iter()
            .zip(1..)
            .map(|(kind, id)| Category {
                id,
                kind: (*kind).to_string(),
            })
            .collect();
        Self::seeded(categories, Vec::new())
    }

    /// Store holding exactly these rows; new question ids continue after the highest one
    pub fn seeded(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_question_id = questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let data = TriviaData {
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            next_question_id,
        };
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    pub fn questions(&self) -> InMemoryQuestions {
        InMemoryQuestions {
            data: Arc::clone(&self.data),
        }
    }

    pub fn categories(&self) -> InMemoryCategories {
        InMemoryCategories {
            data: Arc::clone(&self.data),
        }
    }
}

/// Question view over [`InMemoryTrivia`]
#[derive(Debug, Clone)]
pub struct InMemoryQuestions {
    data: Arc<RwLock<TriviaData>>,
}

/// Category view over [`InMemoryTrivia`]
#[derive(Debug, Clone)]
pub struct InMemoryCategories {
    data: Arc<RwLock<TriviaData>>,
}

impl Repository<i64, Question, NewQuestion> for InMemoryQuestions {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Question>> {
        Ok(self.data.read().await.questions.get(id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Question>> {
        Ok(self.data.read().await.questions.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.data.read().await.questions.len() as u64)
    }

    async fn create(&self, data: NewQuestion) -> RepositoryResult<Question> {
        let mut guard = self.data.write().await;

        if !guard.categories.contains_key(&data.category) {
            return Err(RepositoryError::constraint_violation(
                RepositoryOperation::Create,
                format!("category {} does not exist", data.category),
            )
            .with_entity("Category", data.category.to_string()));
        }

        let id = guard.next_question_id.max(1);
        guard.next_question_id = id + 1;

        let question = Question {
            id,
            question: data.question,
            answer: data.answer,
            category: data.category,
            difficulty: data.difficulty,
        };
        guard.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        Ok(self.data.write().await.questions.remove(id).is_some())
    }
}

impl QuestionRepository for InMemoryQuestions {
    async fn find_by_category(&self, category: i64) -> RepositoryResult<Vec<Question>> {
        Ok(self
            .data
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> RepositoryResult<Vec<Question>> {
        let needle = term.to_lowercase();
        Ok(self
            .data
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

impl CategoryRepository for InMemoryCategories {
    async fn list(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.data.read().await.categories.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth::repository::RepositoryErrorKind;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = InMemoryTrivia::with_default_categories();
        let questions = store.questions();

        let first = questions.create(new_question("one", 1)).await.unwrap();
        let second = questions.create(new_question("two", 2)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(questions.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_is_constraint_violation() {
        let store = InMemoryTrivia::with_default_categories();
        let err = store
            .questions()
            .create(new_question("orphan", 42))
            .await
            .unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ConstraintViolation);
        assert_eq!(store.questions().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let store = InMemoryTrivia::with_default_categories();
        let questions = store.questions();
        questions
            .create(new_question("What movie earned Tom Hanks his third Oscar?", 5))
            .await
            .unwrap();
        questions
            .create(new_question("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", 4))
            .await
            .unwrap();
        questions
            .create(new_question("What is the heaviest organ?", 1))
            .await
            .unwrap();

        let hits = questions.search("TITLE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].question.contains("entitled"));
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let store = InMemoryTrivia::with_default_categories();
        let questions = store.questions();
        let created = questions.create(new_question("gone soon", 3)).await.unwrap();

        assert!(questions.exists(&created.id).await.unwrap());
        assert!(questions.delete(&created.id).await.unwrap());
        assert!(!questions.delete(&created.id).await.unwrap());
        assert!(!questions.exists(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_categories_are_ordered_by_id() {
        let store = InMemoryTrivia::with_default_categories();
        let kinds: Vec<String> = store
            .categories()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            kinds,
            ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        );
    }
}
