//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod badges;
pub mod readings;
pub mod user;

pub use badges::{
    BadgeDefinition, BadgeRecord, BadgeRepository, EarnedBadgeRecord, UserBadgeRepository,
};
pub use readings::{
    BpReadingRecord, BpReadingRepository, CreateBpReading, CreateMoodLog, MoodLogRecord,
    MoodLogRepository,
};
pub use user::{UserRecord, UserRepository};
