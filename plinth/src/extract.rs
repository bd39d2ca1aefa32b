//! Extractors whose rejections use the JSON error envelope
//!
//! axum's own `Json` and `Path` reject with plain-text bodies and a mix of
//! 400/415/422 statuses. These wrappers fold every body problem into 400 and
//! every unparseable path segment into 404, which is what a client of
//! `/questions/abc` or a bodyless `POST` should see. A query string that
//! cannot be read at all counts as asking for page 1.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Query,
    },
    http::request::Parts,
};

use crate::error::Error;
use crate::pagination::PageQuery;

/// JSON request body
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

/// Typed path parameters
#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct EntityPath<T>(pub T);

/// The `?page=` query, falling back to page 1 when the query string is unreadable
#[derive(Debug, Clone, Default)]
pub struct PageParams(pub PageQuery);

impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<PageQuery>::from_request_parts(parts, state).await {
            Ok(Query(query)) => Ok(Self(query)),
            Err(rejection) => {
                tracing::debug!("Ignoring query string: {}", rejection.body_text());
                Ok(Self(PageQuery::default()))
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Error::BadRequest("bad request".to_string())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameters: {}", rejection.body_text());
        Error::resource_not_found()
    }
}
