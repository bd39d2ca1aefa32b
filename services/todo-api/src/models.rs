//! Todo lists, todos and request bodies

use serde::{Deserialize, Serialize};

/// A named list that owns its todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct TodoList {
    pub id: i64,
    pub name: String,
    pub completed: bool,
}

/// One item on a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
    /// Owning list id
    #[serde(rename = "list")]
    pub list_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoList {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub list_id: i64,
}

/// Completion change for a single todo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoPatch {
    pub completed: bool,
}

/// Body of `POST /lists`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateListRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl CreateListRequest {
    pub fn into_new_list(self) -> Result<NewTodoList, &'static str> {
        let name = non_empty(self.name).ok_or("name")?;
        Ok(NewTodoList { name })
    }
}

/// A list reference as the form sends it: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListRef {
    Id(i64),
    Text(String),
}

impl ListRef {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Body of `POST /todos/create`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub list: Option<ListRef>,
}

impl CreateTodoRequest {
    pub fn into_new_todo(self) -> Result<NewTodo, &'static str> {
        let description = non_empty(self.description).ok_or("description")?;
        let list_id = self.list.as_ref().and_then(ListRef::id).ok_or("list")?;
        Ok(NewTodo {
            description,
            list_id,
        })
    }
}

/// Body of `POST /todos/{id}/set-completed`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetCompletedRequest {
    #[serde(default)]
    pub completed: Option<bool>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
