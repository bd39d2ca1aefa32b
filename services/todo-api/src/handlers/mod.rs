//! HTTP handlers

pub mod lists;
pub mod todos;

use serde::Serialize;

/// Stores shared by every todo handler
#[derive(Debug, Clone)]
pub struct TodoState<L, T> {
    pub lists: L,
    pub todos: T,
}

impl<L, T> TodoState<L, T> {
    pub fn new(lists: L, todos: T) -> Self {
        Self { lists, todos }
    }
}

/// `{"success": true}` plus the flattened entity, if any
#[derive(Debug, Serialize)]
pub struct Success<E: Serialize = ()> {
    pub success: bool,
    #[serde(flatten)]
    pub entity: E,
}

impl Success {
    pub fn empty() -> Self {
        Self {
            success: true,
            entity: (),
        }
    }
}

impl<E: Serialize> Success<E> {
    pub fn with(entity: E) -> Self {
        Self {
            success: true,
            entity,
        }
    }
}
