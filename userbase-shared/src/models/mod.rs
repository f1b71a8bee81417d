/// Database models for Userbase
///
/// Each model is a plain `sqlx::FromRow` struct plus associated query functions
/// with explicit column lists.
///
/// # Models
///
/// - `user`: User accounts created by registration

pub mod user;
