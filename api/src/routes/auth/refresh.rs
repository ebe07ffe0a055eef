//! POST /api/auth/token/refresh

use actix_web::{web, HttpRequest, HttpResponse};

use te_core::errors::{AuthError, DomainError, TokenError};
use te_core::repositories::UserRepository;

use crate::dto::auth::MessageResponse;
use crate::handlers::ApiError;
use crate::routes::auth::cookies::access_cookie;
use crate::state::AppState;

/// Exchange the refresh cookie for a fresh access cookie
///
/// The new access token is built from the user's current record, so role
/// and phone-verification changes take effect at refresh time.
pub async fn refresh<U: UserRepository + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError> {
    let cookie_config = &state.config.auth.cookies;

    let refresh_token = req
        .cookie(&cookie_config.refresh_name)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::NotAuthenticated)?;

    let claims = state
        .token_service
        .verify_refresh_token(&refresh_token)
        .map_err(|e| DomainError::from(AuthError::InvalidToken(e)))?;

    let user_id = claims
        .user_id()
        .map_err(|_| DomainError::from(AuthError::InvalidToken(TokenError::InvalidClaims)))?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let access_token = state
        .token_service
        .issue_access_token(&user)
        .map_err(DomainError::Token)?;

    Ok(HttpResponse::Ok()
        .cookie(access_cookie(cookie_config, access_token))
        .json(MessageResponse::new("Token refreshed")))
}
