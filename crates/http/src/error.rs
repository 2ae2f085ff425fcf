//! Translation of domain failures into HTTP responses.
//!
//! Every failure leaves the process as the same JSON shape:
//! `{"error": {"code", "message", "details", "trace_id", "timestamp"}}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use quill_kernel::{StoreError, ValidationError};

/// Header attached to 404 responses.
pub const NOT_FOUND_HEADER: HeaderName = HeaderName::from_static("x-header-error");
const NOT_FOUND_HINT: &str = "Nothing to be seen at the ID";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub details: Vec<serde_json::Value>,
    pub message: String,
    pub code: String,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("conflict: {message}")]
    Conflict {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String, code: String },

    /// Non-positive prefix count; answered with 418.
    #[error("negative count: {message}")]
    NegativeCount {
        requested: i64,
        code: String,
        message: String,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    pub fn conflict(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Conflict {
            details,
            code: "conflict".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            code: "unauthorized".to_string(),
        }
    }

    /// `entity` is the singular resource name, e.g. `book`.
    pub fn negative_count(entity: &str, requested: i64) -> Self {
        Self::NegativeCount {
            requested,
            code: "negative_count".to_string(),
            message: format!(
                "Hey, why do you want {requested} {entity}s? You need to read more!"
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NegativeCount { .. } => StatusCode::IM_A_TEAPOT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn rejected(source: &str, reason: String) -> Self {
        Self::validation(
            vec![json!({ "field": source, "reason": reason })],
            format!("invalid request {source}"),
        )
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, .. } => {
                Self::not_found(format!("{} not found", capitalized(entity)))
            }
            StoreError::NegativeCount { entity, requested } => {
                Self::negative_count(entity, requested)
            }
            StoreError::Duplicate { entity, id } => Self::conflict(
                vec![json!({ "field": "id", "reason": format!("{id} is already taken") })],
                format!("{} already exists", capitalized(entity)),
            ),
            StoreError::Backend(source) => Self::Internal(source),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let details = err
            .violations
            .iter()
            .map(|violation| json!(violation))
            .collect();
        Self::validation(details, "request validation failed")
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected("body", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected("path", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected("query", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        let status = self.status();

        let (error_code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            }
            | AppError::Conflict {
                details,
                code,
                message,
            } => (code, message, details),
            AppError::NotFound { message, code } | AppError::Unauthorized { message, code } => {
                (code, message, Vec::new())
            }
            AppError::NegativeCount {
                requested,
                code,
                message,
            } => (code, message, vec![json!({ "requested": requested })]),
            AppError::Internal(e) => ("internal_error".to_string(), format!("{e:#}"), Vec::new()),
        };

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                error = %message,
                "Request failed"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                error_code = %error_code,
                status_code = %status.as_u16(),
                "Request rejected"
            );
        }

        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let body = ErrorBody {
            details,
            message,
            code: error_code,
            trace_id: error_id.to_string(),
            timestamp,
        };

        let mut response = (status, Json(json!({ "error": body }))).into_response();
        if status == StatusCode::NOT_FOUND {
            response
                .headers_mut()
                .insert(NOT_FOUND_HEADER, HeaderValue::from_static(NOT_FOUND_HINT));
        }
        response
    }
}
