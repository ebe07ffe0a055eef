//! Configuration module with business-specific sub-modules
//!
//! Configuration is organized by concern:
//! - `auth` - JWT signing and auth-cookie configuration
//! - `database` - Database connection and pool configuration
//! - `dispatch` - OTP dispatch queue and delivery channel configuration
//! - `environment` - Environment detection
//! - `media` - Debug-only media file serving
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod dispatch;
pub mod environment;
pub mod media;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, CookieConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use dispatch::DispatchConfig;
pub use environment::Environment;
pub use media::MediaConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// OTP dispatch configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Media serving configuration
    #[serde(default)]
    pub media: MediaConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            dispatch: DispatchConfig::default(),
            media: MediaConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            dispatch: DispatchConfig::from_env(),
            media: MediaConfig::from_env(),
            cors: if environment.is_development() {
                CorsConfig::development()
            } else {
                CorsConfig::default()
            },
        }
    }

    /// Whether the media mount should be registered; media is only ever
    /// served by this process in development
    pub fn serve_media(&self) -> bool {
        self.environment.is_development() && self.media.serve_in_debug
    }
}
