use actix_web::{error, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::core::{EditRejection, MerchError, RegistrationError, SignupError};
use crate::models::ErrorResponse;
use crate::services::StoreError;

/// Errors surfaced by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation_failed",
            AppError::Conflict(_) => "conflict",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

impl From<EditRejection> for AppError {
    fn from(value: EditRejection) -> Self {
        AppError::BadRequest(value.to_string())
    }
}

impl From<RegistrationError> for AppError {
    fn from(value: RegistrationError) -> Self {
        match value {
            RegistrationError::AlreadyRegistered => AppError::Conflict(value.to_string()),
            RegistrationError::NotNormalEvent
            | RegistrationError::DeadlinePassed
            | RegistrationError::LimitReached => AppError::BadRequest(value.to_string()),
        }
    }
}

impl From<MerchError> for AppError {
    fn from(value: MerchError) -> Self {
        match value {
            MerchError::NotYourOrder => AppError::Forbidden(value.to_string()),
            MerchError::AlreadyOrdered => AppError::Conflict(value.to_string()),
            MerchError::NotMerchEvent
            | MerchError::PurchaseLimitExceeded
            | MerchError::MissingPaymentProof
            | MerchError::AlreadyDecided
            | MerchError::OutOfStock => AppError::BadRequest(value.to_string()),
        }
    }
}

impl From<SignupError> for AppError {
    fn from(value: SignupError) -> Self {
        AppError::BadRequest(value.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateEmail => AppError::Conflict(value.to_string()),
            StoreError::SeedIo(_) | StoreError::SeedFormat(_) => AppError::Internal(value.to_string()),
        }
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    AppError::BadRequest(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    AppError::BadRequest(format!("Invalid query: {}", err)).into()
}
