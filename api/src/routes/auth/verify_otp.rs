//! POST /api/auth/verify-otp

use actix_web::{web, HttpResponse};

use te_core::domain::entities::user::UserRole;
use te_core::errors::{DomainError, ValidationError};
use te_core::repositories::UserRepository;

use crate::dto::auth::{MessageResponse, VerifyOtpRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::validate;
use crate::state::AppState;

/// Confirm the caller's phone number
///
/// Checks the submitted code against the stored one; a match marks the
/// phone verified and, for clients, completes onboarding.
pub async fn verify_otp<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
    body: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&body.0)?;

    let mut user = auth.0.user;
    let phone = match &user.phone_number {
        Some(phone) => phone.clone(),
        None => {
            return Err(DomainError::Validation(ValidationError::RequiredField {
                field: "phone_number".to_string(),
            })
            .into())
        }
    };

    state.verification.verify_code(&phone, &body.otp).await?;

    user.is_phone_verified = true;
    if user.role == UserRole::Client {
        user.is_onboarded = true;
    }
    state.users.update(&user).await?;
    log::info!("phone verified for user {}", user.username);

    Ok(HttpResponse::Ok().json(MessageResponse::new("OTP Verified")))
}
