//! Translation of domain failures into HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::LedgerError;

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            LedgerError::Authentication => (StatusCode::UNAUTHORIZED, "you need to sign in".to_string()),
            LedgerError::Conflict(message) => (StatusCode::CONFLICT, message),
            LedgerError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            LedgerError::Persistence(e) => {
                // Store details stay in the log
                error!("Storage failure: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "something went wrong".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        LedgerError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for LedgerError {
    fn from(rejection: QueryRejection) -> Self {
        LedgerError::Validation(rejection.body_text())
    }
}
