//! Middleware for HTTP services

#[cfg(feature = "jwt")]
pub mod jwt;
pub mod request_tracking;
pub mod token;

#[cfg(feature = "jwt")]
pub use jwt::{JwtAuth, RequirePermission};
pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer, SENSITIVE_HEADERS,
};
pub use token::{check_permission, extract_token, Claims, TokenValidator};
