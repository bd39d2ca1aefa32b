#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use plinth::{config::Config, state::AppState};
use serde_json::Value;
use tower::ServiceExt;

use trivia_api::{
    handlers::TriviaState,
    models::{Category, Question},
    repository::InMemoryTrivia,
    router,
};

/// Categories 1..=6 plus twelve questions
///
/// Questions 1..=6 are in category 1, 7..=10 in category 2, 11 and 12 in
/// category 3. Two question texts contain "title" in different cases.
pub fn seeded_store() -> InMemoryTrivia {
    let categories = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .iter()
        .zip(1..)
        .map(|(kind, id)| Category {
            id,
            kind: kind.to_string(),
        })
        .collect();

    let questions = (1..=12)
        .map(|id| Question {
            id,
            question: match id {
                3 => "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?".to_string(),
                8 => "What was the TITLE of Tom Hanks' first Oscar film?".to_string(),
                _ => format!("Question number {id}?"),
            },
            answer: format!("Answer {id}"),
            category: match id {
                1..=6 => 1,
                7..=10 => 2,
                _ => 3,
            },
            difficulty: (id % 5 + 1) as i32,
        })
        .collect();

    InMemoryTrivia::seeded(categories, questions)
}

pub fn app(store: &InMemoryTrivia) -> Router {
    router(
        TriviaState::new(store.questions(), store.categories()),
        AppState::new(Config::for_service("trivia-api")),
    )
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
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

pub fn ids(body: &Value, key: &str) -> Vec<i64> {
    body[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}
