//! Domain-specific error types for authentication and related operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// A credential was presented but failed validation. The underlying
    /// token error is preserved as the cause so rejections can reference it.
    #[error("Invalid token: {0}")]
    InvalidToken(#[source] TokenError),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Only {role} users can access this endpoint")]
    RoleRequired { role: String },

    #[error("Phone verification required")]
    PhoneVerificationRequired,

    #[error("Invalid OTP. {remaining} attempt(s) remaining")]
    OtpInvalid { remaining: u32 },

    #[error("OTP has expired. Please request a new one")]
    OtpExpired,

    #[error("Too many failed attempts. Please request a new OTP")]
    OtpAttemptsExceeded,

    #[error("Please wait {retry_after} seconds before requesting a new OTP")]
    OtpCooldown { retry_after: u64 },

    #[error("Too many OTP requests. Please try again after some time")]
    OtpResendLimit,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Wrong token type: expected {expected}")]
    WrongTokenType { expected: &'static str },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Top-level domain error
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Auth(AuthError::InvalidToken(_)) => "token_not_valid",
            DomainError::Auth(AuthError::InvalidCredentials) => "invalid_credentials",
            DomainError::Auth(AuthError::UserNotFound) => "user_not_found",
            DomainError::Auth(AuthError::UserAlreadyExists) => "user_exists",
            DomainError::Auth(AuthError::RoleRequired { .. }) => "forbidden",
            DomainError::Auth(AuthError::PhoneVerificationRequired) => "phone_unverified",
            DomainError::Auth(AuthError::OtpInvalid { .. }) => "otp_invalid",
            DomainError::Auth(AuthError::OtpExpired) => "otp_expired",
            DomainError::Auth(AuthError::OtpAttemptsExceeded) => "otp_attempts_exceeded",
            DomainError::Auth(AuthError::OtpCooldown { .. }) => "otp_cooldown",
            DomainError::Auth(AuthError::OtpResendLimit) => "otp_resend_limit",
            DomainError::Token(_) => "token_not_valid",
            DomainError::Validation(_) => "validation_error",
            DomainError::ProfileNotFound => "profile_not_found",
            DomainError::Database(_) => "database_error",
            DomainError::Dispatch(_) => "dispatch_error",
            DomainError::ExternalService(_) => "external_service_error",
            DomainError::Internal(_) => "internal_error",
        }
    }
}

/// Unified error body for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.code(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_token_preserves_cause() {
        let err = AuthError::InvalidToken(TokenError::InvalidSignature);
        let message = err.to_string();
        assert!(message.contains("signature"));

        // Source chain keeps the original token error
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), TokenError::InvalidSignature.to_string());
    }

    #[test]
    fn test_error_codes() {
        let err: DomainError = AuthError::InvalidToken(TokenError::TokenExpired).into();
        assert_eq!(err.code(), "token_not_valid");

        let err: DomainError = AuthError::PhoneVerificationRequired.into();
        assert_eq!(err.code(), "phone_unverified");
    }

    #[test]
    fn test_otp_error_codes_and_messages() {
        let err: DomainError = AuthError::OtpCooldown { retry_after: 12 }.into();
        assert_eq!(err.code(), "otp_cooldown");
        assert!(err.to_string().contains("12 seconds"));

        let err: DomainError = AuthError::OtpInvalid { remaining: 2 }.into();
        assert_eq!(err.code(), "otp_invalid");
        assert!(err.to_string().contains("2 attempt"));
    }

    #[test]
    fn test_error_response_body() {
        let err: DomainError = ValidationError::InvalidFormat {
            field: "phone_number".to_string(),
        }
        .into();
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "validation_error");
        assert!(body.message.contains("phone_number"));
    }
}
