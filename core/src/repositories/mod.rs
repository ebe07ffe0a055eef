//! Repository interfaces for persistence
//!
//! Concrete implementations live in the infrastructure crate.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile::{ClientProfile, ConsultantProfile};
use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Persistence interface for users and their profiles
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by login name
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Fetch the client profile for a user
    async fn client_profile(&self, user_id: Uuid) -> Result<Option<ClientProfile>, DomainError>;

    /// Fetch the consultant profile for a user
    async fn consultant_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ConsultantProfile>, DomainError>;

    /// Persist a new client profile
    async fn create_client_profile(
        &self,
        profile: ClientProfile,
    ) -> Result<ClientProfile, DomainError>;

    /// Update an existing client profile
    async fn update_client_profile(&self, profile: &ClientProfile) -> Result<(), DomainError>;

    /// List clients assigned to a consultant, with their profiles
    ///
    /// Data isolation: only clients whose profile names this consultant.
    async fn clients_of_consultant(
        &self,
        consultant_id: Uuid,
    ) -> Result<Vec<(User, ClientProfile)>, DomainError>;
}
