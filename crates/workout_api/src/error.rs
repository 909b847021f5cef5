//! Error types for the HTTP layer and their problem-details rendering.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use workout_store::{StoreError, WorkoutId};

use crate::types::Violation;

pub const PROBLEM_JSON: &str = "application/problem+json";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("validation failed: {} rule(s) violated", .0.len())]
    Validation(Vec<Violation>),

    #[error("route id {path} does not match payload id {payload:?}")]
    IdentityMismatch {
        path: WorkoutId,
        payload: Option<Uuid>,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge(rejection.body_text()),
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// RFC 7807 error body.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::IdentityMismatch { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn problem(&self) -> ProblemDetails {
        let (kind, title) = match self {
            ApiError::Validation(_) => (
                "urn:workout-api:problem:validation",
                "One or more validation errors occurred.",
            ),
            ApiError::Store(StoreError::NotFound(_)) => ("about:blank", "Not Found"),
            ApiError::Store(StoreError::Conflict(_)) => ("about:blank", "Conflict"),
            ApiError::IdentityMismatch { .. } | ApiError::BadRequest(_) => {
                ("about:blank", "One or more errors on input occurred.")
            }
            ApiError::PayloadTooLarge(_) => ("about:blank", "Payload Too Large"),
            ApiError::Unauthorized(_) => ("about:blank", "Unauthorized"),
        };

        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if let ApiError::Validation(violations) = self {
            for v in violations {
                errors
                    .entry(v.field.clone())
                    .or_default()
                    .push(v.message.clone());
            }
        }

        ProblemDetails {
            kind,
            title,
            status: self.status().as_u16(),
            detail: match self {
                ApiError::Validation(_) => "See the errors field for details.".to_string(),
                other => other.to_string(),
            },
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");

        let body = match serde_json::to_vec(&self.problem()) {
            Ok(body) => body,
            Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        };
        let mut response = (status, body).into_response();
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        if status == StatusCode::UNAUTHORIZED {
            headers.insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
