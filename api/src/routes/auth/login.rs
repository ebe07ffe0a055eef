//! POST /api/auth/token

use actix_web::{web, HttpResponse};

use te_core::errors::{AuthError, DomainError};
use te_core::repositories::UserRepository;
use te_shared::utils::phone::mask_phone;

use crate::dto::auth::{LoginRequest, UserResponse};
use crate::handlers::ApiError;
use crate::routes::auth::cookies::{access_cookie, refresh_cookie};
use crate::routes::validate;
use crate::state::AppState;

/// Username/password login
///
/// On success both auth cookies are set and the body carries the user,
/// never the tokens. Unknown username and wrong password produce the
/// same response.
pub async fn login<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&body.0)?;

    let user = state
        .users
        .find_by_username(&body.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !user.verify_password(&body.password)? {
        log::warn!("failed login attempt for {}", body.username);
        return Err(AuthError::InvalidCredentials.into());
    }

    let pair = state
        .token_service
        .issue_pair(&user)
        .map_err(DomainError::Token)?;

    log::info!(
        "user {} logged in (phone: {})",
        user.username,
        user.phone_number.as_deref().map(mask_phone).unwrap_or_else(|| "none".to_string())
    );

    let cookie_config = &state.config.auth.cookies;
    Ok(HttpResponse::Ok()
        .cookie(access_cookie(cookie_config, pair.access_token))
        .cookie(refresh_cookie(cookie_config, pair.refresh_token))
        .json(UserResponse::from(&user)))
}
