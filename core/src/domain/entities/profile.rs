//! Client and consultant profile entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile data for a client account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Unique identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Consultant assigned to this client, if any
    pub assigned_consultant: Option<Uuid>,

    /// PAN (permanent account number)
    pub pan_number: Option<String>,

    /// GST identification number
    pub gstin: Option<String>,

    /// GST portal username
    pub gst_username: Option<String>,
}

impl ClientProfile {
    /// Create an empty profile for a new client
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            assigned_consultant: None,
            pan_number: None,
            gstin: None,
            gst_username: None,
        }
    }

    /// Whether a PAN has been linked
    pub fn pan_linked(&self) -> bool {
        self.pan_number.is_some()
    }
}

/// Profile data for a consultant account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantProfile {
    /// Unique identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Maximum number of clients this consultant takes on
    pub max_capacity: i32,

    /// Number of clients currently assigned
    pub current_load: i32,

    /// Services offered, e.g. ["GST", "ITR"]
    pub services: Vec<String>,
}

impl ConsultantProfile {
    /// Create a profile with the default capacity
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            max_capacity: 10,
            current_load: 0,
            services: Vec::new(),
        }
    }

    /// Whether the consultant can take another client
    pub fn has_capacity(&self) -> bool {
        self.current_load < self.max_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_linked() {
        let mut profile = ClientProfile::new(Uuid::new_v4());
        assert!(!profile.pan_linked());
        profile.pan_number = Some("ABCDE1234F".to_string());
        assert!(profile.pan_linked());
    }

    #[test]
    fn test_consultant_capacity() {
        let mut profile = ConsultantProfile::new(Uuid::new_v4());
        assert!(profile.has_capacity());
        profile.current_load = profile.max_capacity;
        assert!(!profile.has_capacity());
    }
}
