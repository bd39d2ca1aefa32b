//! Bearer token extraction and claims
//!
//! Verification itself lives behind [`TokenValidator`]; this module only knows
//! how to pull a token out of a request and what the decoded claims look like.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Claims carried by an access token
///
/// Identity providers disagree on the name of the permission claim; both
/// `permissions` and `perms` are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID or client ID)
    pub sub: String,

    /// Permission strings, e.g. `post:drinks`
    #[serde(default, alias = "perms")]
    pub permissions: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Check if the token grants a specific permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Token validator trait
pub trait TokenValidator: Send + Sync + Clone {
    /// Validate a token and extract claims
    fn validate_token(&self, token: &str) -> Result<Claims, Error>;
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively.
pub fn extract_token(headers: &HeaderMap) -> Result<String, Error> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            Error::unauthorized(
                "authorization_header_missing",
                "Authorization header is expected.",
            )
        })?;

    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::unauthorized(
            "invalid_header",
            "Authorization header must start with \"Bearer\".",
        ));
    }

    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(token.to_string()),
        (None, _) => Err(Error::unauthorized("invalid_header", "Token not found.")),
        (Some(_), Some(_)) => Err(Error::unauthorized(
            "invalid_header",
            "Authorization header must be bearer token.",
        )),
    }
}

/// Fail with 403 unless the claims grant `permission`
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), Error> {
    if claims.has_permission(permission) {
        Ok(())
    } else {
        Err(Error::forbidden(
            "permission_not_found",
            format!("Permission '{}' not found.", permission),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    fn code_of(error: Error) -> &'static str {
        match error {
            Error::Unauthorized { code, .. } | Error::Forbidden { code, .. } => code,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(extract_token(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_header() {
        let err = extract_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(code_of(err), "authorization_header_missing");
    }

    #[test]
    fn test_wrong_scheme_and_shape() {
        assert_eq!(
            code_of(extract_token(&headers("Basic dXNlcjpwYXNz")).unwrap_err()),
            "invalid_header"
        );
        assert_eq!(
            code_of(extract_token(&headers("Bearer")).unwrap_err()),
            "invalid_header"
        );
        assert_eq!(
            code_of(extract_token(&headers("Bearer a b")).unwrap_err()),
            "invalid_header"
        );
    }

    #[test]
    fn test_perms_alias() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "auth0|barista",
            "perms": ["get:drinks-detail"],
            "exp": 4_102_444_800_i64
        }))
        .unwrap();
        assert!(claims.has_permission("get:drinks-detail"));
        assert!(!claims.has_permission("post:drinks"));
    }

    #[test]
    fn test_check_permission() {
        let claims = Claims {
            sub: "auth0|manager".to_string(),
            permissions: vec!["delete:drinks".to_string()],
            exp: 0,
            iat: None,
            iss: None,
        };
        assert!(check_permission(&claims, "delete:drinks").is_ok());
        assert_eq!(
            code_of(check_permission(&claims, "patch:drinks").unwrap_err()),
            "permission_not_found"
        );
    }
}
