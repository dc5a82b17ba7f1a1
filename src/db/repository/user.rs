//! User Repository
//!
//! Accounts are keyed by email (`user:⟨email⟩`), so lookups by email are
//! plain record selects and the login upsert is naturally idempotent.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserRole, UserStatus, now_millis};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user by account email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select((TABLE, email)).await?;
        Ok(user)
    }

    /// Login-time upsert: return the stored record if the email is known,
    /// otherwise create a fresh customer account
    pub async fn upsert(
        &self,
        email: &str,
        name: String,
        image: Option<String>,
    ) -> RepoResult<User> {
        if let Some(existing) = self.find_by_email(email).await? {
            return Ok(existing);
        }

        let thing = RecordId::from_table_key(TABLE, email);
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE $user SET
                    name = $name,
                    email = $email,
                    image = $image,
                    role = $role,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("user", thing))
            .bind(("name", name))
            .bind(("email", email.to_string()))
            .bind(("image", image))
            .bind(("role", UserRole::Customer))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// All users except the given email (the admin calling the roster)
    pub async fn find_all_except(&self, email: &str) -> RepoResult<Vec<User>> {
        let email_owned = email.to_string();
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email != $email")
            .bind(("email", email_owned))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Mark a seller-upgrade request as pending
    pub async fn set_status(&self, email: &str, status: UserStatus) -> RepoResult<Option<User>> {
        let thing = RecordId::from_table_key(TABLE, email);
        let mut result = self
            .base
            .db()
            .query("UPDATE $user SET status = $status RETURN AFTER")
            .bind(("user", thing))
            .bind(("status", status))
            .await?;
        let updated: Option<User> = result.take(0)?;
        Ok(updated)
    }

    /// Admin role assignment; also marks the account Verified so a pending
    /// upgrade request is closed out
    pub async fn update_role(&self, email: &str, role: UserRole) -> RepoResult<Option<User>> {
        let thing = RecordId::from_table_key(TABLE, email);
        let mut result = self
            .base
            .db()
            .query("UPDATE $user SET role = $role, status = $status RETURN AFTER")
            .bind(("user", thing))
            .bind(("role", role))
            .bind(("status", UserStatus::Verified))
            .await?;
        let updated: Option<User> = result.take(0)?;
        Ok(updated)
    }
}
