//! Client profile endpoints

use actix_web::{web, HttpResponse};

use te_core::domain::entities::profile::ClientProfile;
use te_core::domain::entities::user::UserRole;
use te_core::errors::{AuthError, DomainError};
use te_core::repositories::UserRepository;
use te_shared::utils::phone::normalize_phone_number;

use crate::dto::profile::{ClientProfileResponse, UpdateClientProfileRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::validate;
use crate::state::AppState;

fn require_client(auth: &AuthContext) -> Result<(), ApiError> {
    if auth.0.user.role != UserRole::Client {
        return Err(AuthError::RoleRequired {
            role: "CLIENT".to_string(),
        }
        .into());
    }
    Ok(())
}

/// GET /api/client/profile
pub async fn get_profile<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    require_client(&auth)?;

    let profile = state
        .users
        .client_profile(auth.0.user.id)
        .await?
        .ok_or(DomainError::ProfileNotFound)?;

    Ok(HttpResponse::Ok().json(ClientProfileResponse::from(&profile)))
}

/// PATCH /api/client/profile
///
/// Partial update: only fields present in the body change. Setting
/// `is_phone_verified` to true also marks the client onboarded.
pub async fn update_profile<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
    body: web::Json<UpdateClientProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    require_client(&auth)?;
    validate(&body.0)?;

    let mut user = auth.0.user;
    let mut profile = match state.users.client_profile(user.id).await? {
        Some(profile) => profile,
        None => {
            state
                .users
                .create_client_profile(ClientProfile::new(user.id))
                .await?
        }
    };

    if let Some(first_name) = &body.first_name {
        user.first_name = first_name.clone();
    }
    if let Some(last_name) = &body.last_name {
        user.last_name = last_name.clone();
    }
    if let Some(phone) = &body.phone_number {
        user.phone_number = Some(normalize_phone_number(phone));
    }
    if let Some(verified) = body.is_phone_verified {
        user.is_phone_verified = verified;
        if verified {
            user.is_onboarded = true;
        }
    }

    if let Some(pan) = &body.pan_number {
        profile.pan_number = Some(pan.to_uppercase());
    }
    if let Some(gstin) = &body.gstin {
        profile.gstin = Some(gstin.to_uppercase());
    }
    if let Some(gst_username) = &body.gst_username {
        profile.gst_username = Some(gst_username.clone());
    }

    state.users.update(&user).await?;
    state.users.update_client_profile(&profile).await?;

    Ok(HttpResponse::Ok().json(ClientProfileResponse::from(&profile)))
}
