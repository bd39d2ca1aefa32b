#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    Router,
};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use plinth::{
    config::{Config, JwtConfig},
    middleware::JwtAuth,
    repository::Repository,
    state::AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use coffee_shop_api::{
    models::{Ingredient, NewDrink},
    repository::InMemoryDrinks,
    router,
};

pub const SECRET: &[u8] = b"coffee-shop-test-secret";

/// Every permission a manager holds
pub const MANAGER: &[&str] = &[
    "get:drinks-detail",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];

/// A barista may only look at recipes
pub const BARISTA: &[&str] = &["get:drinks-detail"];

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

pub fn token_expiring_at(exp: i64, permissions: &[&str]) -> String {
    let claims = json!({
        "sub": "auth0|coffee-tester",
        "permissions": permissions,
        "exp": exp,
        "iat": now(),
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

pub fn token(permissions: &[&str]) -> String {
    token_expiring_at(now() + 3600, permissions)
}

pub fn expired_token(permissions: &[&str]) -> String {
    token_expiring_at(now() - 3600, permissions)
}

/// Menu with water (id 1) and a mocha (id 2)
pub async fn seeded_drinks() -> InMemoryDrinks {
    let drinks = InMemoryDrinks::new();
    drinks.create(NewDrink::water()).await.unwrap();
    drinks
        .create(NewDrink {
            title: "mocha".to_string(),
            recipe: vec![
                Ingredient {
                    color: "brown".to_string(),
                    name: "espresso".to_string(),
                    parts: 1,
                },
                Ingredient {
                    color: "white".to_string(),
                    name: "milk".to_string(),
                    parts: 2,
                },
            ],
        })
        .await
        .unwrap();
    drinks
}

pub fn app(drinks: &InMemoryDrinks) -> Router {
    let jwt = JwtConfig {
        public_key_path: PathBuf::from("unused"),
        algorithm: "HS256".to_string(),
        issuer: None,
        audience: None,
    };
    let auth = JwtAuth::from_key(SECRET, &jwt).unwrap();
    router(
        drinks.clone(),
        &auth,
        AppState::new(Config::for_service("coffee-shop-api")),
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

/// Build a request; `auth` is the full Authorization header value
pub fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
