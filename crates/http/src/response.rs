//! Fixed-shape success responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// `{"status": <code>, "transaction": "Successful"}`, returned instead of
/// echoing the entity. The HTTP status always equals `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    pub transaction: String,
}

impl Envelope {
    pub fn successful(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            transaction: "Successful".to_string(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
