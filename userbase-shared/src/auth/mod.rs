/// Credential utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`email`]: Email normalization applied before storage and lookup
///
/// # Example
///
/// ```
/// use userbase_shared::auth::{email::normalize_email, password::{hash_password, verify_password}};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
///
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod email;
pub mod password;
