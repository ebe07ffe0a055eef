//! # TaxEase Infrastructure
//!
//! Concrete implementations behind the core crate's interfaces: MySQL
//! persistence, the background OTP dispatch queue, and external identity
//! providers. Nothing in here leaks into domain logic; the API crate wires
//! these implementations to the core traits at startup.

pub mod database;
pub mod dispatch;
pub mod google;

use thiserror::Error;

use te_core::errors::DomainError;

pub use database::connection::DatabasePool;
pub use database::memory::InMemoryUserRepository;
pub use database::mysql::MySqlUserRepository;
pub use dispatch::channel::{ConsoleOtpChannel, OtpChannel};
pub use dispatch::queue::DispatchQueue;
pub use dispatch::store::InMemoryOtpStore;
pub use google::{GoogleIdentity, GoogleTokenVerifier, IdTokenVerifier};

/// Infrastructure-level errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::Database(e.to_string()),
            InfrastructureError::Config(msg) => DomainError::Internal(msg),
            InfrastructureError::Dispatch(msg) => DomainError::Dispatch(msg),
            InfrastructureError::ExternalService(msg) => DomainError::ExternalService(msg),
        }
    }
}
