//! # plinth
//!
//! Shared groundwork for small JSON REST backends built on axum.
//!
//! ## Features
//!
//! - **Error envelope**: every failure renders as `{success, error, message}`
//! - **Extractors**: JSON body and path extractors that reject with the envelope
//! - **Pagination**: fixed ten-item pages with 404 on empty pages
//! - **Repositories**: RPITIT store traits with structured errors
//! - **Permissions**: bearer-token validation and per-route permission guards (`jwt`)
//! - **Server**: request ids, tracing, CORS, compression, timeouts, graceful shutdown
//! - **Health checks**: liveness and readiness probes
//! - **PostgreSQL**: pooled connections with retry (`database`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use plinth::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load_for_service("hello-api")?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::connect(config.clone()).await?;
//!
//!     let app = json_fallbacks(
//!         Router::new()
//!             .route("/hello", get(|| async { "hello" }))
//!             .merge(health_routes(state)),
//!     );
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod error;
pub mod extract;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod observability;
pub mod pagination;
pub mod repository;
pub mod server;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, JwtConfig, MiddlewareConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::extract::{EntityPath, JsonBody, PageParams};
    pub use crate::health::{health, readiness, routes as health_routes};
    pub use crate::ids::{MakeTypedRequestId, RequestId};
    pub use crate::middleware::{check_permission, extract_token, Claims, TokenValidator};
    #[cfg(feature = "jwt")]
    pub use crate::middleware::{JwtAuth, RequirePermission};
    pub use crate::observability::init_tracing;
    pub use crate::pagination::{page_slice, require_page, PageQuery, PAGE_SIZE};
    pub use crate::repository::{
        Repository, RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult,
        UpdateRepository,
    };
    pub use crate::server::{json_fallbacks, Server};
    pub use crate::state::AppState;

    pub use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Redirect, Response},
        routing::{delete, get, patch, post},
        Json, Router,
    };
    pub use serde::{Deserialize, Serialize};
    pub use tokio;
}
