//! Profile request/response DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use te_core::domain::entities::profile::ClientProfile;
use te_core::domain::entities::user::User;

use super::auth::UserResponse;

/// Client profile as returned to the owning client
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientProfileResponse {
    pub id: Uuid,
    pub assigned_consultant: Option<Uuid>,
    pub pan_number: Option<String>,
    pub gstin: Option<String>,
    pub gst_username: Option<String>,
    pub pan_linked: bool,
}

impl From<&ClientProfile> for ClientProfileResponse {
    fn from(profile: &ClientProfile) -> Self {
        Self {
            id: profile.id,
            assigned_consultant: profile.assigned_consultant,
            pan_number: profile.pan_number.clone(),
            gstin: profile.gstin.clone(),
            gst_username: profile.gst_username.clone(),
            pan_linked: profile.pan_linked(),
        }
    }
}

/// PATCH /api/client/profile request body; absent fields stay unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClientProfileRequest {
    #[validate(length(min = 1, max = 150))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 150))]
    pub last_name: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone_number: Option<String>,

    pub is_phone_verified: Option<bool>,

    #[validate(length(equal = 10, message = "PAN must be 10 characters"))]
    pub pan_number: Option<String>,

    #[validate(length(equal = 15, message = "GSTIN must be 15 characters"))]
    pub gstin: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub gst_username: Option<String>,
}

/// One row in a consultant's client list
#[derive(Debug, Serialize, Deserialize)]
pub struct ConsultantClientResponse {
    pub client: UserResponse,
    pub profile: ClientProfileResponse,
}

impl ConsultantClientResponse {
    pub fn from_pair(user: &User, profile: &ClientProfile) -> Self {
        Self {
            client: UserResponse::from(user),
            profile: ClientProfileResponse::from(profile),
        }
    }
}
