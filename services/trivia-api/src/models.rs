//! Trivia entities and request bodies

use serde::{Deserialize, Serialize};

/// A trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Category id
    pub category: i64,
    pub difficulty: i32,
}

/// A question category, read-only through the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "database", sqlx(rename = "type"))]
    pub kind: String,
}

/// Validated data for a new question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

/// A JSON value that clients send either as a number or a numeric string
///
/// The web client posts `"category": "3"` from a select box, while the quiz
/// screen sends `{"id": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    Text(String),
}

impl NumberOrString {
    /// The numeric value, if there is one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Body of `POST /questions`: a search when `searchTerm` is non-empty,
/// otherwise a new question
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub category: Option<NumberOrString>,
    #[serde(default)]
    pub difficulty: Option<NumberOrString>,
}

impl QuestionsRequest {
    /// The search term, if this request is a search
    pub fn search(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }

    /// Validate the creation fields
    ///
    /// Every field must be present and non-empty; numeric fields must be
    /// positive. Returns the name of the first offending field.
    pub fn to_new_question(&self) -> Result<NewQuestion, &'static str> {
        let text = |value: &Option<String>, field| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or(field)
        };
        let number = |value: &Option<NumberOrString>, field| {
            value
                .as_ref()
                .and_then(NumberOrString::as_i64)
                .filter(|n| *n > 0)
                .ok_or(field)
        };

        Ok(NewQuestion {
            question: text(&self.question, "question")?,
            answer: text(&self.answer, "answer")?,
            category: number(&self.category, "category")?,
            difficulty: number(&self.difficulty, "difficulty")?
                .try_into()
                .map_err(|_| "difficulty")?,
        })
    }
}

/// Category selection on the quiz screen
///
/// The client also echoes the category name as `type`; only the id matters.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    pub id: NumberOrString,
}

/// Body of `POST /quizzes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,
}
