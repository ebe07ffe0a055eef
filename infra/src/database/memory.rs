//! In-memory user repository
//!
//! Backs local development and the API integration tests; no external
//! services required. Not suitable for anything multi-process.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use te_core::domain::entities::profile::{ClientProfile, ConsultantProfile};
use te_core::domain::entities::user::User;
use te_core::errors::DomainError;
use te_core::repositories::UserRepository;

#[derive(Default)]
struct Store {
    users: HashMap<Uuid, User>,
    client_profiles: HashMap<Uuid, ClientProfile>,
    consultant_profiles: HashMap<Uuid, ConsultantProfile>,
}

/// Map-backed repository guarded by a read-write lock
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user, returning the repository for chaining
    pub fn with_user(self, user: User) -> Self {
        {
            let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
            store.users.insert(user.id, user);
        }
        self
    }

    /// Seed a client profile
    pub fn with_client_profile(self, profile: ClientProfile) -> Self {
        {
            let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
            store.client_profiles.insert(profile.user_id, profile);
        }
        self
    }

    /// Seed a consultant profile
    pub fn with_consultant_profile(self, profile: ConsultantProfile) -> Self {
        {
            let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
            store.consultant_profiles.insert(profile.user_id, profile);
        }
        self
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut store = self.write();
        if store.users.values().any(|u| u.username == user.username) {
            return Err(te_core::errors::AuthError::UserAlreadyExists.into());
        }
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut store = self.write();
        if !store.users.contains_key(&user.id) {
            return Err(te_core::errors::AuthError::UserNotFound.into());
        }
        store.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn client_profile(&self, user_id: Uuid) -> Result<Option<ClientProfile>, DomainError> {
        Ok(self.read().client_profiles.get(&user_id).cloned())
    }

    async fn consultant_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ConsultantProfile>, DomainError> {
        Ok(self.read().consultant_profiles.get(&user_id).cloned())
    }

    async fn create_client_profile(
        &self,
        profile: ClientProfile,
    ) -> Result<ClientProfile, DomainError> {
        self.write()
            .client_profiles
            .insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn update_client_profile(&self, profile: &ClientProfile) -> Result<(), DomainError> {
        self.write()
            .client_profiles
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn clients_of_consultant(
        &self,
        consultant_id: Uuid,
    ) -> Result<Vec<(User, ClientProfile)>, DomainError> {
        let store = self.read();
        let mut clients: Vec<(User, ClientProfile)> = store
            .client_profiles
            .values()
            .filter(|p| p.assigned_consultant == Some(consultant_id))
            .filter_map(|p| store.users.get(&p.user_id).map(|u| (u.clone(), p.clone())))
            .collect();
        clients.sort_by(|a, b| a.0.username.cmp(&b.0.username));
        Ok(clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = User::new_client("asha", "asha@example.com", "Asha", "Verma");
        let id = user.id;

        repo.create(user).await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_some());
        assert!(repo.find_by_username("asha").await.unwrap().is_some());
        assert!(repo.find_by_email("asha@example.com").await.unwrap().is_some());
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new_client("asha", "a@example.com", "", ""))
            .await
            .unwrap();

        let err = repo
            .create(User::new_client("asha", "b@example.com", "", ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(te_core::errors::AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_clients_of_consultant_isolated() {
        let consultant = User::new_client("cons", "c@example.com", "Con", "Sultant");
        let client_a = User::new_client("amit", "amit@example.com", "Amit", "Shah");
        let client_b = User::new_client("bela", "bela@example.com", "Bela", "Rao");

        let mut profile_a = ClientProfile::new(client_a.id);
        profile_a.assigned_consultant = Some(consultant.id);
        // Unassigned client stays invisible to the consultant
        let profile_b = ClientProfile::new(client_b.id);

        let repo = InMemoryUserRepository::new()
            .with_user(consultant.clone())
            .with_user(client_a.clone())
            .with_user(client_b)
            .with_client_profile(profile_a)
            .with_client_profile(profile_b);

        let clients = repo.clients_of_consultant(consultant.id).await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].0.id, client_a.id);
    }
}
