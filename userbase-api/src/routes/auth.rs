/// Account registration endpoint
///
/// # Endpoints
///
/// - `POST /api/register` - Create a user account

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ValidatedJson,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, instrument, warn};
use userbase_shared::{
    auth::{email::normalize_email, password},
    models::user::{CreateUser, User, UserError},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, trimmed on decode so the email rule sees the bare address
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Public view of a user
///
/// The only shape in which a user leaves the server; it has no field for the
/// password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserOut {
    pub id: Uuid,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "password": "correct horse battery staple",
///   "name": "Ada"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "email": "ada@example.com",
///   "name": "Ada"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `{"detail": "Email already registered"}`
/// - `422 Unprocessable Entity`: Malformed body or validation failed
/// - `500 Internal Server Error`: Server error
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<Json<UserOut>> {
    let email = normalize_email(&req.email);

    let password_hash = password::hash_password_blocking(&req.password).await?;

    let user = match User::create(
        &state.db,
        CreateUser {
            email,
            password_hash: Some(password_hash),
            name: req.name,
        },
    )
    .await
    {
        Ok(user) => user,
        Err(UserError::EmailTaken(email)) => {
            warn!(%email, "Registration rejected: email already registered");
            return Err(UserError::EmailTaken(email).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "User registered");

    Ok(Json(user.into()))
}
