/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL,
///     password_hash TEXT,
///     google_id VARCHAR(255),
///     name VARCHAR(255),
///     picture TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```
///
/// Users are only ever inserted. Uniqueness of `email` is enforced by the
/// database, not by a lookup before the insert, so two concurrent
/// registrations for the same address cannot both succeed.
///
/// # Example
///
/// ```no_run
/// use userbase_shared::models::user::{CreateUser, User, UserError};
/// use userbase_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::from_url("postgresql://localhost/userbase")).await?;
///
/// let new_user = CreateUser {
///     email: "ada@example.com".to_string(),
///     password_hash: Some("$argon2id$...".to_string()),
///     name: Some("Ada".to_string()),
/// };
///
/// match User::create(&pool, new_user).await {
///     Ok(user) => println!("Created user: {}", user.id),
///     Err(UserError::EmailTaken(email)) => println!("{} is taken", email),
///     Err(e) => return Err(e.into()),
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Name of the unique constraint on `users.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str =
    "id, email, password_hash, google_id, name, picture, created_at, updated_at";

/// A user account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, generated by the database
    pub id: Uuid,

    /// Normalized email address, unique across all users
    pub email: String,

    /// Argon2id PHC string
    ///
    /// Nullable so accounts without a local password can exist later.
    /// Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Reserved for federated sign-in; never written by registration
    pub google_id: Option<String>,

    /// Optional display name
    pub name: Option<String>,

    /// Optional profile picture URL or path
    pub picture: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address, already normalized
    pub email: String,

    /// Argon2id hash (NOT the plaintext password)
    pub password_hash: Option<String>,

    /// Optional display name
    pub name: Option<String>,
}

/// Errors from user writes
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Another account already uses this email
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// True when a database error is the unique violation on `users.email`
///
/// `code` is the SQLSTATE and `constraint` the violated constraint name, as
/// reported by the server.
pub fn is_email_conflict(code: Option<&str>, constraint: Option<&str>) -> bool {
    code == Some(UNIQUE_VIOLATION) && constraint == Some(EMAIL_UNIQUE_CONSTRAINT)
}

/// Same check applied to a `sqlx::Error`
pub fn is_email_conflict_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            is_email_conflict(db_err.code().as_deref(), db_err.constraint())
        }
        _ => false,
    }
}

impl User {
    /// Inserts a new user
    ///
    /// The insert is a single statement that yields no row when the email is
    /// already present, so the duplicate check and the write cannot interleave
    /// with another registration.
    ///
    /// # Errors
    ///
    /// - `UserError::EmailTaken` if the email is already registered
    /// - `UserError::Database` for any other database failure
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, UserError> {
        let query = format!(
            "INSERT INTO users (email, password_hash, name)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT {} DO NOTHING
             RETURNING {}",
            EMAIL_UNIQUE_CONSTRAINT, USER_COLUMNS
        );

        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(&data.email)
            .bind(data.password_hash)
            .bind(data.name)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                if is_email_conflict_error(&e) {
                    UserError::EmailTaken(data.email.clone())
                } else {
                    UserError::Database(e)
                }
            })?;

        inserted.ok_or(UserError::EmailTaken(data.email))
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a user by email
    ///
    /// The comparison is exact; pass an address run through
    /// `auth::email::normalize_email`.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Counts all users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
