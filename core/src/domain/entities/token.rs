//! Token entities for JWT-based cookie authentication

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserRole};

/// Token type claim value for access tokens
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// Token type claim value for refresh tokens
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims structure for the JWT payload
///
/// Besides the registered claims, access tokens carry the caller's role,
/// display name, and phone-verification state so the frontend can render
/// without an extra round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Token type ("access" or "refresh")
    pub token_type: String,

    /// Platform role of the user
    pub user_role: UserRole,

    /// Display name of the user
    pub full_name: String,

    /// Whether the user's phone number is verified
    pub is_phone_verified: bool,
}

impl Claims {
    /// Creates claims for a token of the given type
    pub fn for_user(
        user: &User,
        token_type: &str,
        expires_in_secs: i64,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expires_in_secs);

        Self {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
            user_role: user.role,
            full_name: user.full_name(),
            is_phone_verified: user.is_phone_verified,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Whether this is an access token
    pub fn is_access(&self) -> bool {
        self.token_type == TOKEN_TYPE_ACCESS
    }

    /// Whether this is a refresh token
    pub fn is_refresh(&self) -> bool {
        self.token_type == TOKEN_TYPE_REFRESH
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair issued at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}
