//! JWT authentication middleware (requires `jwt` feature)

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use std::{fs, sync::Arc};

use super::token::{check_permission, extract_token, Claims, TokenValidator};
use crate::{config::JwtConfig, error::Error};

/// JWT authentication middleware state
#[derive(Clone)]
pub struct JwtAuth {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl JwtAuth {
    /// Create a new JWT authenticator from the configured key file
    pub fn new(config: &JwtConfig) -> Result<Self, Error> {
        let key = fs::read(&config.public_key_path).map_err(|e| {
            Error::Config(Box::new(figment::Error::from(format!(
                "Failed to read JWT key from path '{}': {}",
                config.public_key_path.display(),
                e
            ))))
        })?;

        Self::from_key(&key, config)
    }

    /// Create a JWT authenticator from key material already in memory
    ///
    /// PEM for RS*/ES*, raw secret bytes for HS*.
    pub fn from_key(key: &[u8], config: &JwtConfig) -> Result<Self, Error> {
        let algorithm = parse_algorithm(&config.algorithm)?;

        let decoding_key = match algorithm {
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
                DecodingKey::from_rsa_pem(key)?
            }
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(key)?,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => DecodingKey::from_secret(key),
            _ => {
                return Err(Error::Config(Box::new(figment::Error::from(format!(
                    "Unsupported algorithm: {:?}",
                    algorithm
                )))))
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key: Arc::new(decoding_key),
            validation,
        })
    }

    /// Guard that admits only tokens carrying `permission`
    pub fn require(&self, permission: &'static str) -> RequirePermission {
        RequirePermission {
            auth: self.clone(),
            permission,
        }
    }
}

impl TokenValidator for JwtAuth {
    fn validate_token(&self, token: &str) -> Result<Claims, Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => Error::unauthorized("token_expired", "Token expired."),
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => Error::unauthorized(
                    "invalid_claims",
                    "Incorrect claims. Please, check the audience and issuer.",
                ),
                _ => Error::unauthorized("invalid_token", "Unable to parse authentication token."),
            })
    }
}

/// Per-route permission guard
///
/// Attach with `route_layer` so the check runs after routing and before the
/// handler:
///
/// ```rust,ignore
/// use axum::{middleware::from_fn_with_state, routing::post};
/// use plinth::middleware::RequirePermission;
///
/// let route = post(create_drink).route_layer(from_fn_with_state(
///     auth.require("post:drinks"),
///     RequirePermission::middleware,
/// ));
/// ```
#[derive(Clone)]
pub struct RequirePermission {
    auth: JwtAuth,
    permission: &'static str,
}

impl RequirePermission {
    /// Validate the bearer token, check the permission, inject claims
    pub async fn middleware(
        State(guard): State<Self>,
        mut request: Request<Body>,
        next: Next,
    ) -> Result<Response, Error> {
        let token = extract_token(request.headers())?;
        let claims = guard.auth.validate_token(&token)?;
        check_permission(&claims, guard.permission)?;

        tracing::debug!(sub = %claims.sub, permission = guard.permission, "Permission granted");
        request.extensions_mut().insert(claims);

        Ok(next.run(request).await)
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, Error> {
    match name.to_uppercase().as_str() {
        "RS256" => Ok(Algorithm::RS256),
        "RS384" => Ok(Algorithm::RS384),
        "RS512" => Ok(Algorithm::RS512),
        "ES256" => Ok(Algorithm::ES256),
        "ES384" => Ok(Algorithm::ES384),
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        alg => Err(Error::Config(Box::new(figment::Error::from(format!(
            "Unsupported JWT algorithm: {}",
            alg
        ))))),
    }
}
