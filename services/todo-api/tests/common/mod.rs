#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use plinth::{config::Config, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

use todo_api::{handlers::TodoState, repository::InMemoryTodoStore, router};

pub fn app(store: &InMemoryTodoStore) -> Router {
    router(
        TodoState::new(store.lists(), store.todos()),
        AppState::new(Config::for_service("todo-api")),
    )
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: Router, request: Request<Body>) -> Reply {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// "Errands" (id 1) with milk and bread, "Chores" (id 2) with dishes
pub async fn seeded_store() -> InMemoryTodoStore {
    let store = InMemoryTodoStore::new();
    for name in ["Errands", "Chores"] {
        let reply = send(app(&store), post_json("/lists", json!({"name": name}))).await;
        assert_eq!(reply.status, StatusCode::OK);
    }
    for (description, list) in [("milk", 1), ("bread", 1), ("dishes", 2)] {
        let reply = send(
            app(&store),
            post_json("/todos/create", json!({"description": description, "list": list})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
    }
    store
}
