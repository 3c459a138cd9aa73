//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the analysis engines.

pub mod auth;
pub mod badges;
pub mod dashboard;
pub mod readings;
pub mod recommendation;

pub use auth::AuthService;
pub use badges::BadgeService;
pub use dashboard::DashboardService;
pub use readings::ReadingsService;
pub use recommendation::RecommendationService;
