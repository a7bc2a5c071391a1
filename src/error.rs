use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Reasons a submitted form is turned away before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("age must be a whole number")]
    InvalidAge,

    #[error("{value:?} is not a valid {field}")]
    UnknownOption { field: &'static str, value: String },
}

/// Errors surfaced by the JSON API.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("data store unavailable")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Store and internal details stay in the logs.
        let message = match &self {
            AppError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_names() {
        let e = ValidationError::MissingFields(vec!["name", "age"]);
        assert_eq!(e.to_string(), "missing required fields: name, age");
    }

    #[test]
    fn status_codes() {
        let v = AppError::from(ValidationError::InvalidAge).into_response();
        assert_eq!(v.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let s = AppError::from(StoreError::Decode("x".into())).into_response();
        assert_eq!(s.status(), StatusCode::BAD_GATEWAY);

        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
