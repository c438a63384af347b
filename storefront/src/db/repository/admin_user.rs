//! Admin User Repository

use super::{RepoError, RepoResult};
use sqlx::{FromRow, SqlitePool};

use shared::util::{now_millis, snowflake_id};

/// Admin account row. Never serialized to clients; login responses carry
/// only the username.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub hash_pass: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl AdminUser {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<AdminUser>> {
    let user = sqlx::query_as::<_, AdminUser>(
        "SELECT id, username, hash_pass, is_active, created_at FROM admin_user WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Create or update the account for `username` with a freshly hashed
/// password. Used by the bootstrap seed at startup.
pub async fn upsert(pool: &SqlitePool, username: &str, password: &str) -> RepoResult<()> {
    let hash = AdminUser::hash_password(password)
        .map_err(|e| RepoError::Validation(format!("Failed to hash password: {e}")))?;

    sqlx::query(
        "INSERT INTO admin_user (id, username, hash_pass, is_active, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)
         ON CONFLICT(username) DO UPDATE SET
           hash_pass = excluded.hash_pass,
           is_active = 1",
    )
    .bind(snowflake_id())
    .bind(username)
    .bind(hash)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}
