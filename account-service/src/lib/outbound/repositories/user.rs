use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AuthError;
use crate::account::models::EmailAddress;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> Result<User, AuthError> {
        Ok(User {
            id: UserId(
                row.try_get("id")
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            ),
            email: EmailAddress::new(
                row.try_get("email")
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            )?,
            name: row
                .try_get("name")
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            is_admin: row
                .try_get("is_admin")
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, is_active, is_admin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique index is the authoritative duplicate guard: a
            // registration racing past the service-level pre-check lands here.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return AuthError::DuplicateAccount;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, password_hash, is_active, is_admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.map(Self::map_row).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, password_hash, is_active, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.map(Self::map_row).transpose()
    }
}
