use axum::http::StatusCode;
use thiserror::Error;

use crate::{error::HttpError, messaging::whatsapp::MessagingError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No verification code found for this phone number")]
    VerificationNotFound,

    #[error("Phone number is already verified")]
    AlreadyVerified,

    #[error("Verification code has expired. Please request a new code")]
    CodeExpired,

    #[error("Invalid verification code")]
    InvalidCode { attempts_remaining: i32 },

    #[error("Too many failed attempts. Please request a new code")]
    TooManyAttempts,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("WhatsApp delivery failed: {0}")]
    Messaging(#[from] MessagingError),

    #[error("{0}")]
    Other(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match &error {
            ServiceError::VerificationNotFound => HttpError::not_found(error.to_string()),

            ServiceError::AlreadyVerified
            | ServiceError::CodeExpired
            | ServiceError::InvalidCode { .. }
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::TooManyAttempts => HttpError::too_many_requests(error.to_string()),

            _ => HttpError::server_error(error.to_string()),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::VerificationNotFound => StatusCode::NOT_FOUND,

            ServiceError::AlreadyVerified
            | ServiceError::CodeExpired
            | ServiceError::InvalidCode { .. }
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,

            ServiceError::Database(_) | ServiceError::Messaging(_) | ServiceError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
