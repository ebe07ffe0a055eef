//! POST /api/auth/send-otp

use actix_web::{web, HttpResponse};

use te_core::repositories::UserRepository;
use te_shared::utils::phone::normalize_phone_number;

use crate::dto::auth::{SendOtpRequest, SendOtpResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::validate;
use crate::state::AppState;

/// Queue a verification code for the caller's phone
///
/// The handler returns as soon as the job is accepted; delivery happens
/// on the dispatch worker. Submitting a new number resets the caller's
/// verified flag until the new number is confirmed.
pub async fn send_otp<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
    body: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&body.0)?;

    let outcome = state.verification.request_code(&body.phone_number).await?;

    let mut user = auth.0.user;
    user.phone_number = Some(normalize_phone_number(&body.phone_number));
    user.is_phone_verified = false;
    state.users.update(&user).await?;

    Ok(HttpResponse::Ok().json(SendOtpResponse {
        message: format!("Verification code sent to {}", outcome.masked_phone),
        resend_after: outcome.resend_after,
    }))
}
