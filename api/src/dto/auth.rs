//! Authentication request/response DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use te_core::domain::entities::user::{User, UserRole};

/// POST /api/auth/token request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

/// POST /api/auth/google request body
#[derive(Debug, Deserialize, Validate)]
pub struct GoogleSignInRequest {
    /// Google ID token obtained by the frontend
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// POST /api/auth/send-otp request body
#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(length(min = 8, max = 16, message = "Phone number must be in E.164 format"))]
    pub phone_number: String,
}

/// POST /api/auth/verify-otp request body
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 4, max = 8, message = "Invalid code"))]
    pub otp: String,
}

/// Signed-in user as returned by auth endpoints
///
/// Tokens never appear here; they travel only in HttpOnly cookies.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_phone_verified: bool,
    pub is_onboarded: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name(),
            role: user.role,
            is_phone_verified: user.is_phone_verified,
            is_onboarded: user.is_onboarded,
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// POST /api/auth/send-otp response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
    /// Seconds to wait before requesting another code
    pub resend_after: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            username: "asha".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing = LoginRequest {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn test_user_response_excludes_tokens() {
        let user = User::new_client("asha", "asha@example.com", "Asha", "Verma");
        let body = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(body.get("access_token").is_none());
        assert!(body.get("password_hash").is_none());
        assert_eq!(body["role"], "CLIENT");
    }
}
