//! Request/response plumbing shared across routes

pub mod error;

pub use error::ApiError;
