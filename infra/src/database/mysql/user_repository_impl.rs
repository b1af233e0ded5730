//! MySQL implementation of the UserRepository trait.
//!
//! Roles are stored as their lowercase names; the `users.email` column carries
//! a unique index so duplicate registrations surface as a constraint violation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ea_core::domain::entities::user::{Role, User};
use ea_core::errors::{AuthError, DomainError};
use ea_core::repositories::UserRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, username, password_hash, role, phone,
           verified, created_at, updated_at
    FROM users
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let role_str: String = column(row, "role")?;
        let role = parse_role(&role_str)?;

        Ok(User {
            id: column(row, "id")?,
            email: column(row, "email")?,
            username: column(row, "username")?,
            password_hash: column(row, "password_hash")?,
            role,
            phone: column(row, "phone")?,
            verified: column(row, "verified")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_COLUMNS, predicate);

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

fn query_failed(e: sqlx::Error) -> DomainError {
    DomainError::internal(format!("Database query failed: {}", e))
}

/// Maps the stored role name back to a usable role
pub(crate) fn parse_role(value: &str) -> Result<Role, DomainError> {
    value
        .parse::<Role>()
        .map_err(|e| DomainError::internal(format!("Corrupt role column: {}", e)))
}

/// True when the insert failed on the unique email index
pub(crate) fn is_duplicate_key(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map_or(false, |d| d.is_unique_violation())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("id", id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email", email).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, username, password_hash, role, phone,
                verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.phone)
            .bind(user.verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DomainError::Auth(AuthError::EmailAlreadyExists)
                } else {
                    query_failed(e)
                }
            })?;

        tracing::debug!(user_id = %user.id, "User row inserted");

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, username = ?, password_hash = ?, role = ?,
                phone = ?, verified = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.phone)
            .bind(user.verified)
            .bind(user.updated_at)
            .bind(&user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DomainError::Auth(AuthError::EmailAlreadyExists)
                } else {
                    query_failed(e)
                }
            })?;

        if result.rows_affected() == 0 {
            // MySQL reports zero affected rows for a no-op update too
            if self.find_by_id(&user.id).await?.is_none() {
                return Err(DomainError::Auth(AuthError::UserNotFound));
            }
        }

        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() > 0)
    }
}
