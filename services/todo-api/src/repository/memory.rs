//! In-memory list and todo store
//!
//! Lists and todos share one lock so cascades happen under a single write
//! guard.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use plinth::repository::{
    Repository, RepositoryError, RepositoryOperation, RepositoryResult, UpdateRepository,
};

use super::{TodoListRepository, TodoRepository};
use crate::models::{NewTodo, NewTodoList, Todo, TodoList, TodoPatch};

#[derive(Debug, Default)]
struct Board {
    lists: BTreeMap<i64, TodoList>,
    todos: BTreeMap<i64, Todo>,
    last_list_id: i64,
    last_todo_id: i64,
}

/// Shared backing data for [`InMemoryLists`] and [`InMemoryTodos`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    board: Arc<RwLock<Board>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> InMemoryLists {
        InMemoryLists {
            board: Arc::clone(&self.board),
        }
    }

    pub fn todos(&self) -> InMemoryTodos {
        InMemoryTodos {
            board: Arc::clone(&self.board),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryLists {
    board: Arc<RwLock<Board>>,
}

#[derive(Debug, Clone)]
pub struct InMemoryTodos {
    board: Arc<RwLock<Board>>,
}

impl Repository<i64, TodoList, NewTodoList> for InMemoryLists {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<TodoList>> {
        Ok(self.board.read().await.lists.get(id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<TodoList>> {
        Ok(self.board.read().await.lists.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.board.read().await.lists.len() as u64)
    }

    async fn create(&self, data: NewTodoList) -> RepositoryResult<TodoList> {
        let mut board = self.board.write().await;
        board.last_list_id += 1;

        let list = TodoList {
            id: board.last_list_id,
            name: data.name,
            completed: false,
        };
        board.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        let mut board = self.board.write().await;
        if board.lists.remove(id).is_none() {
            return Ok(false);
        }
        board.todos.retain(|_, todo| todo.list_id != *id);
        Ok(true)
    }
}

impl TodoListRepository for InMemoryLists {
    async fn mark_completed(&self, id: &i64) -> RepositoryResult<bool> {
        let mut board = self.board.write().await;
        let Some(list) = board.lists.get_mut(id) else {
            return Ok(false);
        };
        list.completed = true;

        board
            .todos
            .values_mut()
            .filter(|todo| todo.list_id == *id)
            .for_each(|todo| todo.completed = true);
        Ok(true)
    }
}

impl Repository<i64, Todo, NewTodo> for InMemoryTodos {
    async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Todo>> {
        Ok(self.board.read().await.todos.get(id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Todo>> {
        Ok(self.board.read().await.todos.values().cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.board.read().await.todos.len() as u64)
    }

    async fn create(&self, data: NewTodo) -> RepositoryResult<Todo> {
        let mut board = self.board.write().await;
        if !board.lists.contains_key(&data.list_id) {
            return Err(RepositoryError::constraint_violation(
                RepositoryOperation::Create,
                format!("list {} does not exist", data.list_id),
            )
            .with_entity("TodoList", data.list_id.to_string()));
        }

        board.last_todo_id += 1;
        let todo = Todo {
            id: board.last_todo_id,
            description: data.description,
            completed: false,
            list_id: data.list_id,
        };
        board.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: &i64) -> RepositoryResult<bool> {
        Ok(self.board.write().await.todos.remove(id).is_some())
    }
}

impl UpdateRepository<i64, Todo, NewTodo, TodoPatch> for InMemoryTodos {
    async fn update(&self, id: &i64, data: TodoPatch) -> RepositoryResult<Option<Todo>> {
        let mut board = self.board.write().await;
        Ok(board.todos.get_mut(id).map(|todo| {
            todo.completed = data.completed;
            todo.clone()
        }))
    }
}

impl TodoRepository for InMemoryTodos {
    async fn find_by_list(&self, list_id: &i64) -> RepositoryResult<Vec<Todo>> {
        Ok(self
            .board
            .read()
            .await
            .todos
            .values()
            .filter(|todo| todo.list_id == *list_id)
            .cloned()
            .collect())
    }
}
