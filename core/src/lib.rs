//! # TaxEase Core
//!
//! Core business logic and domain layer for the TaxEase backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::otp::OtpDispatch;
pub use domain::entities::token::{Claims, TokenPair};
pub use domain::entities::user::{User, UserRole};
pub use errors::{AuthError, DomainError, TokenError, ValidationError};
pub use repositories::UserRepository;
pub use services::auth::{
    AuthScheme, AuthenticatedUser, CookieJwtScheme, RequestCredentials, SchemeChain,
};
pub use services::token::TokenService;
pub use services::verification::{CodeRequested, OtpQueue, OtpRecord, OtpStore, VerificationService};
