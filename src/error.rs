use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failure kinds of the calculation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A required divisor evaluated to zero; the result is mathematically undefined.
    #[error("calculation undefined: {0}")]
    Domain(String),

    /// A numeric field is non-positive, non-finite, out of bounds or missing.
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// An enumerated field holds an unrecognized value.
    #[error("invalid value `{value}` for `{field}`")]
    InvalidEnum { field: &'static str, value: String },
}

impl EngineError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput { field, reason: reason.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Domain(_) => "DomainError",
            EngineError::InvalidInput { .. } => "InvalidInputError",
            EngineError::InvalidEnum { .. } => "InvalidEnumError",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Engine(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::Engine(e) => e.kind(),
            ApiError::BadRequest(_) => "BadRequest",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "rejected calculation request");
        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_map_to_unprocessable_entity() {
        let err = ApiError::from(EngineError::Domain("efficiency is zero".into()));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_type(), "DomainError");

        let err = ApiError::from(EngineError::InvalidEnum {
            field: "installation_surface",
            value: "roof".into(),
        });
        assert_eq!(err.error_type(), "InvalidEnumError");
    }

    #[test]
    fn test_bad_request_status() {
        let err = ApiError::BadRequest("missing capacity".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::invalid_input("installed_capacity_kwp", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid input for `installed_capacity_kwp`: must be positive"
        );
    }
}
