//! Email normalization
//!
//! Addresses are compared case-insensitively: the whole address is lowercased
//! and surrounding whitespace removed before it is stored or looked up, so the
//! unique constraint on `users.email` sees one canonical spelling per mailbox.

/// Returns the canonical form of an email address
///
/// ```
/// use userbase_shared::auth::email::normalize_email;
///
/// assert_eq!(normalize_email(" Grace.Hopper@Navy.MIL\n"), "grace.hopper@navy.mil");
/// ```
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
