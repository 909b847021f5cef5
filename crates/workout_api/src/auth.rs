//! Bearer-token authentication for the workout routes.
//!
//! Tokens are HS256 JWTs signed with the configured secret and must name the
//! configured audience. The layer is only installed when a secret is set.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use jwt_simple::prelude::*;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ApiError;

pub struct BearerAuth {
    key: HS256Key,
    audience: String,
}

impl BearerAuth {
    pub fn new(secret: &SecretString, audience: impl Into<String>) -> Self {
        Self {
            key: HS256Key::from_bytes(secret.expose_secret().as_bytes()),
            audience: audience.into(),
        }
    }

    /// Mint a token for `subject` accepted by [`BearerAuth::verify`].
    pub fn issue_token(
        &self,
        subject: &str,
        valid_for: std::time::Duration,
    ) -> anyhow::Result<String> {
        let claims = Claims::create(Duration::from_secs(valid_for.as_secs()))
            .with_audience(&self.audience)
            .with_subject(subject);
        Ok(self.key.authenticate(claims)?)
    }

    pub fn verify(&self, token: &str) -> Result<JWTClaims<NoCustomClaims>, ApiError> {
        let options = VerificationOptions {
            allowed_audiences: Some(HashSet::from([self.audience.clone()])),
            ..Default::default()
        };
        self.key
            .verify_token::<NoCustomClaims>(token, Some(options))
            .map_err(|e| ApiError::Unauthorized(e.to_string()))
    }
}

fn bearer_token(request: &Request) -> Result<&str, ApiError> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed Authorization header".into()))?;
    // Auth schemes are case-insensitive.
    value
        .trim()
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("expected a Bearer token".into()))
}

pub async fn require_bearer(
    State(auth): State<Arc<BearerAuth>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = auth.verify(bearer_token(&request)?)?;
    tracing::trace!(subject = ?claims.subject, "bearer token accepted");
    Ok(next.run(request).await)
}
