//! Route handlers

pub mod auth;
pub mod client;
pub mod consultant;
pub mod health;

use validator::Validate;

use te_core::errors::{DomainError, ValidationError};

use crate::handlers::ApiError;

/// Validate a request body, converting the first failure into a 400
pub(crate) fn validate(request: &impl Validate) -> Result<(), ApiError> {
    request.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "request".to_string());
        ApiError::from(DomainError::Validation(ValidationError::InvalidFormat {
            field,
        }))
    })
}
