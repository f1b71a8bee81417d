/// API route handlers
///
/// - `health`: Root and health check endpoints
/// - `auth`: Account registration

pub mod auth;
pub mod health;
