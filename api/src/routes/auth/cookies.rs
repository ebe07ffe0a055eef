//! Auth-cookie construction
//!
//! The refresh cookie is scoped to the auth endpoints so browsers don't
//! send the long-lived token with every API call.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use te_shared::config::CookieConfig;

/// Path the refresh cookie is scoped to
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

fn same_site(config: &CookieConfig) -> SameSite {
    match config.same_site.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

/// HttpOnly cookie carrying the access token
pub fn access_cookie(config: &CookieConfig, token: String) -> Cookie<'static> {
    Cookie::build(config.access_name.clone(), token)
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .max_age(Duration::seconds(config.access_max_age))
        .finish()
}

/// HttpOnly cookie carrying the refresh token
pub fn refresh_cookie(config: &CookieConfig, token: String) -> Cookie<'static> {
    Cookie::build(config.refresh_name.clone(), token)
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config))
        .max_age(Duration::seconds(config.refresh_max_age))
        .finish()
}

/// Expired replacement that removes a cookie from the browser
pub fn clear_cookie(name: &str, path: &str) -> Cookie<'static> {
    Cookie::build(name.to_string(), "")
        .path(path.to_string())
        .http_only(true)
        .max_age(Duration::ZERO)
        .finish()
}
