//! POST /api/auth/google

use actix_web::{web, HttpResponse};

use te_core::domain::entities::profile::ClientProfile;
use te_core::domain::entities::user::User;
use te_core::errors::DomainError;
use te_core::repositories::UserRepository;

use crate::dto::auth::{GoogleSignInRequest, UserResponse};
use crate::handlers::ApiError;
use crate::routes::auth::cookies::{access_cookie, refresh_cookie};
use crate::routes::validate;
use crate::state::AppState;

/// Google sign-in: verify the ID token, then find or create the account
///
/// First-time sign-ins become CLIENT accounts keyed by email, with an
/// empty client profile. Existing accounts keep their role.
pub async fn google_signin<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    body: web::Json<GoogleSignInRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&body.0)?;

    let verifier = state.google.as_ref().ok_or_else(|| {
        DomainError::ExternalService("Google sign-in is not configured".to_string())
    })?;

    let identity = verifier
        .verify(&body.token)
        .await
        .map_err(DomainError::from)?;

    let user = match state.users.find_by_email(&identity.email).await? {
        Some(user) => user,
        None => {
            let user = User::new_client(
                identity.email.clone(),
                identity.email.clone(),
                identity.given_name.clone(),
                identity.family_name.clone(),
            );
            let user = state.users.create(user).await?;
            state
                .users
                .create_client_profile(ClientProfile::new(user.id))
                .await?;
            log::info!("created account for Google user {}", user.username);
            user
        }
    };

    let pair = state
        .token_service
        .issue_pair(&user)
        .map_err(DomainError::Token)?;

    let cookie_config = &state.config.auth.cookies;
    Ok(HttpResponse::Ok()
        .cookie(access_cookie(cookie_config, pair.access_token))
        .cookie(refresh_cookie(cookie_config, pair.refresh_token))
        .json(UserResponse::from(&user)))
}
