//! Shared utilities and common types for the TaxEase server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures
//! - Utility functions (phone validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CookieConfig, DatabaseConfig, DispatchConfig, Environment,
    JwtConfig, MediaConfig, ServerConfig,
};
pub use types::response::ApiResponse;
pub use utils::phone;
