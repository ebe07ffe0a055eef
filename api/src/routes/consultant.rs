//! Consultant endpoints

use actix_web::{web, HttpResponse};

use te_core::domain::entities::user::UserRole;
use te_core::errors::AuthError;
use te_core::repositories::UserRepository;

use crate::dto::profile::ConsultantClientResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// GET /api/consultant/clients
///
/// Only clients assigned to the calling consultant are visible; there is
/// no way to enumerate other consultants' books.
pub async fn list_clients<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let user = &auth.0.user;
    if user.role != UserRole::Consultant {
        return Err(AuthError::RoleRequired {
            role: "CONSULTANT".to_string(),
        }
        .into());
    }

    let clients = state.users.clients_of_consultant(user.id).await?;
    let body: Vec<ConsultantClientResponse> = clients
        .iter()
        .map(|(client, profile)| ConsultantClientResponse::from_pair(client, profile))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}
