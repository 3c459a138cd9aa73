//! BP Guardian Shared Library
//!
//! This crate contains the domain models, API types, and the pure
//! blood-pressure/mood analysis primitives used by the backend.

pub mod analysis;
pub mod models;
pub mod types;

// Re-export commonly used items
pub use analysis::*;
pub use models::*;
pub use types::*;
