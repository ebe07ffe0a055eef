//! Authentication and auth-cookie configuration

use serde::{Deserialize, Serialize};

/// Cookie name carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie name carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-in-production"),
            access_token_expiry: 3600,   // 1 hour
            refresh_token_expiry: 86400, // 24 hours
            issuer: String::from("taxease"),
            audience: String::from("taxease-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-change-in-production"
    }
}

/// HttpOnly auth-cookie configuration
///
/// The client never reads these cookies; the browser presents them and the
/// cookie authentication scheme consumes them server side.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Access token cookie name
    #[serde(default = "default_access_cookie")]
    pub access_name: String,

    /// Refresh token cookie name
    #[serde(default = "default_refresh_cookie")]
    pub refresh_name: String,

    /// Access cookie lifetime in seconds
    #[serde(default = "default_access_max_age")]
    pub access_max_age: i64,

    /// Refresh cookie lifetime in seconds
    #[serde(default = "default_refresh_max_age")]
    pub refresh_max_age: i64,

    /// Cookie Secure flag (HTTPS only); enable in production
    #[serde(default)]
    pub secure: bool,

    /// Cookie SameSite attribute
    #[serde(default = "default_same_site")]
    pub same_site: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_name: default_access_cookie(),
            refresh_name: default_refresh_cookie(),
            access_max_age: default_access_max_age(),
            refresh_max_age: default_refresh_max_age(),
            secure: false,
            same_site: default_same_site(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Auth-cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,

    /// Google OAuth client id, required for Google sign-in
    #[serde(default)]
    pub google_client_id: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookies: CookieConfig::default(),
            google_client_id: None,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-change-in-production".to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);
        let secure = std::env::var("AUTH_COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                refresh_token_expiry,
                ..Default::default()
            },
            cookies: CookieConfig {
                access_max_age: access_token_expiry,
                refresh_max_age: refresh_token_expiry,
                secure,
                ..Default::default()
            },
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").ok(),
        }
    }
}

fn default_access_cookie() -> String {
    String::from(ACCESS_TOKEN_COOKIE)
}

fn default_refresh_cookie() -> String {
    String::from(REFRESH_TOKEN_COOKIE)
}

fn default_access_max_age() -> i64 {
    3600
}

fn default_refresh_max_age() -> i64 {
    86400
}

fn default_same_site() -> String {
    String::from("Lax")
}
