//! MySQL implementation of the UserRepository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use te_core::domain::entities::profile::{ClientProfile, ConsultantProfile};
use te_core::domain::entities::user::{User, UserRole};
use te_core::errors::DomainError;
use te_core::repositories::UserRepository;

/// MySQL-backed user repository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, password_hash, \
     role, phone_number, is_phone_verified, is_onboarded, is_staff, created_at, updated_at";

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = Self::get(row, "id")?;
        let role: String = Self::get(row, "role")?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("invalid user id: {}", e)))?,
            username: Self::get(row, "username")?,
            email: Self::get(row, "email")?,
            first_name: Self::get(row, "first_name")?,
            last_name: Self::get(row, "last_name")?,
            password_hash: Self::get(row, "password_hash")?,
            role: UserRole::from_str_or_client(&role),
            phone_number: Self::get(row, "phone_number")?,
            is_phone_verified: Self::get(row, "is_phone_verified")?,
            is_onboarded: Self::get(row, "is_onboarded")?,
            is_staff: Self::get(row, "is_staff")?,
            created_at: Self::get::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::get::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    fn row_to_client_profile(row: &sqlx::mysql::MySqlRow) -> Result<ClientProfile, DomainError> {
        let id: String = Self::get(row, "profile_id")?;
        let user_id: String = Self::get(row, "profile_user_id")?;
        let assigned: Option<String> = Self::get(row, "assigned_consultant")?;

        Ok(ClientProfile {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("invalid profile id: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::Database(format!("invalid profile user id: {}", e)))?,
            assigned_consultant: assigned
                .map(|s| Uuid::parse_str(&s))
                .transpose()
                .map_err(|e| DomainError::Database(format!("invalid consultant id: {}", e)))?,
            pan_number: Self::get(row, "pan_number")?,
            gstin: Self::get(row, "gstin")?,
            gst_username: Self::get(row, "gst_username")?,
        })
    }

    fn get<'r, T>(row: &'r sqlx::mysql::MySqlRow, column: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(column)
            .map_err(|e| DomainError::Database(format!("failed to read {}: {}", column, e)))
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE username = ? LIMIT 1",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, username, email, first_name, last_name, password_hash,
                               role, phone_number, is_phone_verified, is_onboarded, is_staff,
                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.phone_number)
            .bind(user.is_phone_verified)
            .bind(user.is_onboarded)
            .bind(user.is_staff)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("insert failed: {}", e)))?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, first_name = ?, last_name = ?, password_hash = ?,
                role = ?, phone_number = ?, is_phone_verified = ?, is_onboarded = ?,
                is_staff = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.phone_number)
            .bind(user.is_phone_verified)
            .bind(user.is_onboarded)
            .bind(user.is_staff)
            .bind(Utc::now())
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("update failed: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::Database(format!(
                "user {} not found for update",
                user.id
            )));
        }
        Ok(())
    }

    async fn client_profile(&self, user_id: Uuid) -> Result<Option<ClientProfile>, DomainError> {
        let query = r#"
            SELECT id AS profile_id, user_id AS profile_user_id, assigned_consultant,
                   pan_number, gstin, gst_username
            FROM client_profiles
            WHERE user_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.map(|r| Self::row_to_client_profile(&r)).transpose()
    }

    async fn consultant_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ConsultantProfile>, DomainError> {
        let query = r#"
            SELECT id, user_id, max_capacity, current_load, services
            FROM consultant_profiles
            WHERE user_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.map(|r| {
            let id: String = Self::get(&r, "id")?;
            let owner: String = Self::get(&r, "user_id")?;
            // Services stored as a JSON array column
            let services: sqlx::types::Json<Vec<String>> = Self::get(&r, "services")?;

            Ok(ConsultantProfile {
                id: Uuid::parse_str(&id)
                    .map_err(|e| DomainError::Database(format!("invalid profile id: {}", e)))?,
                user_id: Uuid::parse_str(&owner)
                    .map_err(|e| DomainError::Database(format!("invalid user id: {}", e)))?,
                max_capacity: Self::get(&r, "max_capacity")?,
                current_load: Self::get(&r, "current_load")?,
                services: services.0,
            })
        })
        .transpose()
    }

    async fn create_client_profile(
        &self,
        profile: ClientProfile,
    ) -> Result<ClientProfile, DomainError> {
        let query = r#"
            INSERT INTO client_profiles (id, user_id, assigned_consultant,
                                         pan_number, gstin, gst_username)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(profile.id.to_string())
            .bind(profile.user_id.to_string())
            .bind(profile.assigned_consultant.map(|c| c.to_string()))
            .bind(&profile.pan_number)
            .bind(&profile.gstin)
            .bind(&profile.gst_username)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("insert failed: {}", e)))?;

        Ok(profile)
    }

    async fn update_client_profile(&self, profile: &ClientProfile) -> Result<(), DomainError> {
        let query = r#"
            UPDATE client_profiles
            SET assigned_consultant = ?, pan_number = ?, gstin = ?, gst_username = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(profile.assigned_consultant.map(|c| c.to_string()))
            .bind(&profile.pan_number)
            .bind(&profile.gstin)
            .bind(&profile.gst_username)
            .bind(profile.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("update failed: {}", e)))?;

        Ok(())
    }

    async fn clients_of_consultant(
        &self,
        consultant_id: Uuid,
    ) -> Result<Vec<(User, ClientProfile)>, DomainError> {
        let query = format!(
            r#"
            SELECT {}, p.id AS profile_id, p.user_id AS profile_user_id,
                   p.assigned_consultant, p.pan_number, p.gstin, p.gst_username
            FROM users u
            JOIN client_profiles p ON p.user_id = u.id
            WHERE p.assigned_consultant = ?
            ORDER BY u.username
        "#,
            USER_COLUMNS
                .split(", ")
                .map(|c| format!("u.{}", c))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let rows = sqlx::query(&query)
            .bind(consultant_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        rows.iter()
            .map(|row| Ok((Self::row_to_user(row)?, Self::row_to_client_profile(row)?)))
            .collect()
    }
}
