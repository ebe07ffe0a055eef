//! GET /api/auth/dashboard

use actix_web::{web, HttpResponse};
use serde::Serialize;

use te_core::domain::entities::user::UserRole;
use te_core::repositories::UserRepository;

use crate::dto::auth::UserResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Workload summary shown to consultants
#[derive(Debug, Serialize)]
pub struct ConsultantStats {
    pub current_load: i32,
    pub max_capacity: i32,
    pub services: Vec<String>,
}

/// Advisor summary shown to clients
#[derive(Debug, Serialize)]
pub struct AdvisorSummary {
    pub name: String,
    pub pan_linked: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: UserResponse,

    /// Present for CONSULTANT accounts with a profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ConsultantStats>,

    /// Present for CLIENT accounts with a profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor: Option<AdvisorSummary>,
}

/// Role-aware landing payload for the signed-in user
pub async fn dashboard<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    let user = &auth.0.user;

    let mut response = DashboardResponse {
        user: UserResponse::from(user),
        stats: None,
        advisor: None,
    };

    match user.role {
        UserRole::Client => {
            if let Some(profile) = state.users.client_profile(user.id).await? {
                let name = match profile.assigned_consultant {
                    Some(consultant_id) => state
                        .users
                        .find_by_id(consultant_id)
                        .await?
                        .map(|c| c.full_name()),
                    None => None,
                };
                response.advisor = Some(AdvisorSummary {
                    name: name.unwrap_or_else(|| "Assigning Soon...".to_string()),
                    pan_linked: profile.pan_linked(),
                });
            }
        }
        UserRole::Consultant => {
            response.stats = state.users.consultant_profile(user.id).await?.map(|profile| {
                ConsultantStats {
                    current_load: profile.current_load,
                    max_capacity: profile.max_capacity,
                    services: profile.services,
                }
            });
        }
        UserRole::Admin => {}
    }

    Ok(HttpResponse::Ok().json(response))
}
