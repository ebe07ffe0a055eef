//! POST /api/auth/logout

use actix_web::{web, HttpResponse};

use te_core::repositories::UserRepository;

use crate::dto::auth::MessageResponse;
use crate::handlers::ApiError;
use crate::routes::auth::cookies::{clear_cookie, REFRESH_COOKIE_PATH};
use crate::state::AppState;

/// Clear both auth cookies
///
/// Tokens are self-contained, so logout is purely client side: once the
/// cookies are gone the browser has nothing left to present. Works for
/// anonymous callers too, making logout idempotent.
pub async fn logout<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError> {
    let cookie_config = &state.config.auth.cookies;

    Ok(HttpResponse::Ok()
        .cookie(clear_cookie(&cookie_config.access_name, "/"))
        .cookie(clear_cookie(&cookie_config.refresh_name, REFRESH_COOKIE_PATH))
        .json(MessageResponse::new("Logged out")))
}
