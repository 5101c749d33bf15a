use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use queries::StoreError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::responses::ApiResponse;
use crate::validation::ValidationError;

/// Every way an album request can end without success. The `Display` text
/// is the `msg` clients see.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("All fields of the JSON body are mandatory.")]
    Validation,

    #[error("The \"score\" field in the JSON body is required.")]
    MissingScore,

    #[error("The ID {0} is not a valid identifier.")]
    InvalidId(String),

    #[error("The document with ID {0} was not found.")]
    NotFound(String),

    #[error("Cannot {0}")]
    UnknownRoute(String),

    #[error("There are no documents stored in the database.")]
    NoDocuments,

    #[error("Duplicate album entry. This album already exists.")]
    Duplicate,

    /// The detail goes out in the envelope's `error` member.
    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation
            | ApiError::MissingScore
            | ApiError::InvalidId(_)
            | ApiError::Duplicate => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::UnknownRoute(_) | ApiError::NoDocuments => {
                StatusCode::NOT_FOUND
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::Duplicate,
            StoreError::Database(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFields => ApiError::Validation,
            ValidationError::MissingScore => ApiError::MissingScore,
            ValidationError::InvalidId(id) => ApiError::InvalidId(id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Internal(detail) => {
                error!("Request failed: {}", detail);
                Some(detail.to_owned())
            }
            _ => None,
        };
        let body = ApiResponse::failure(self.to_string(), detail);
        (status, Json(body)).into_response()
    }
}

/// Anything that stops the service from coming up.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Error connecting to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Error running migrations: {0}")]
    Migration(#[from] sea_orm::DbErr),

    #[error("Error binding listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_failure_kind() {
        assert_eq!(ApiError::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound("x".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::NoDocuments.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_route_names_method_and_path() {
        let err = ApiError::UnknownRoute("GET /nothing".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Cannot GET /nothing");
    }

    #[test]
    fn store_duplicate_maps_to_duplicate() {
        assert!(matches!(
            ApiError::from(StoreError::Duplicate),
            ApiError::Duplicate
        ));
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = ApiError::NotFound("14fc517ca659338c884ec670".to_string());
        assert_eq!(
            err.to_string(),
            "The document with ID 14fc517ca659338c884ec670 was not found."
        );
    }
}
