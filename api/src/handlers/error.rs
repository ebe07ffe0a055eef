//! Mapping from domain errors to HTTP responses
//!
//! Every error leaves the API as the same JSON shape: an error code for
//! programmatic handling, a human-readable message, and a timestamp.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use te_core::errors::{AuthError, DomainError, ErrorResponse};

/// HTTP-facing error wrapper
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No credentials on a request that requires them
    #[error("Authentication credentials were not provided")]
    NotAuthenticated,
}

impl ApiError {
    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(err) => ErrorResponse::from(err),
            ApiError::NotAuthenticated => ErrorResponse::new("not_authenticated", self),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Domain(err) => match err {
                DomainError::Auth(AuthError::InvalidToken(_))
                | DomainError::Auth(AuthError::InvalidCredentials)
                | DomainError::Auth(AuthError::UserNotFound)
                | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
                DomainError::Auth(AuthError::RoleRequired { .. })
                | DomainError::Auth(AuthError::PhoneVerificationRequired) => StatusCode::FORBIDDEN,
                DomainError::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
                DomainError::Auth(AuthError::OtpInvalid { .. })
                | DomainError::Auth(AuthError::OtpExpired)
                | DomainError::Auth(AuthError::OtpAttemptsExceeded) => StatusCode::BAD_REQUEST,
                DomainError::Auth(AuthError::OtpCooldown { .. })
                | DomainError::Auth(AuthError::OtpResendLimit) => StatusCode::TOO_MANY_REQUESTS,
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::ProfileNotFound => StatusCode::NOT_FOUND,
                DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
                DomainError::Database(_)
                | DomainError::Dispatch(_)
                | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("request failed: {}", self);
        }
        HttpResponse::build(self.status_code()).json(self.body())
    }
}
