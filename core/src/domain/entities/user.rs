//! User entity and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Platform role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Consultant,
    Client,
}

impl UserRole {
    /// Database/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Consultant => "CONSULTANT",
            UserRole::Client => "CLIENT",
        }
    }

    /// Parse from the stored representation, defaulting unknown values to Client
    pub fn from_str_or_client(s: &str) -> Self {
        match s {
            "ADMIN" => UserRole::Admin,
            "CONSULTANT" => UserRole::Consultant,
            _ => UserRole::Client,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Login name
    pub username: String,

    /// Email address
    pub email: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// bcrypt password hash; absent for accounts created via Google sign-in
    pub password_hash: Option<String>,

    /// Platform role
    pub role: UserRole,

    /// Phone number in E.164 format
    pub phone_number: Option<String>,

    /// Whether the phone number has been verified via OTP
    pub is_phone_verified: bool,

    /// Whether onboarding is complete
    pub is_onboarded: bool,

    /// Staff flag; staff bypass the phone-verification gate
    pub is_staff: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new client account, the default role for self-signup
    pub fn new_client(
        username: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password_hash: None,
            role: UserRole::Client,
            phone_number: None,
            is_phone_verified: false,
            is_onboarded: false,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name: "first last", falling back to the username
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }

    /// Verify a raw password against the stored bcrypt hash
    ///
    /// Accounts without a password (Google sign-in) never match.
    pub fn verify_password(&self, raw: &str) -> Result<bool, DomainError> {
        match &self.password_hash {
            Some(hash) => bcrypt::verify(raw, hash)
                .map_err(|e| DomainError::Internal(format!("Password verification failed: {}", e))),
            None => Ok(false),
        }
    }

    /// Hash and store a new password
    pub fn set_password(&mut self, raw: &str) -> Result<(), DomainError> {
        let hash = bcrypt::hash(raw, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::Internal(format!("Password hashing failed: {}", e)))?;
        self.password_hash = Some(hash);
        Ok(())
    }
}
