//! Authentication module
//!
//! Prototype header-based identity (`X-User-Id`) with bcrypt password
//! hashing for account registration and login.

mod identity;
mod password;

pub use identity::AuthUser;
pub use password::PasswordService;
