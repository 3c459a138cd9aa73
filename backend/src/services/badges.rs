//! Badge evaluation engine
//!
//! Evaluates four fixed achievement conditions against rolling activity
//! windows and awards newly-met badges exactly once. Awards are monotonic:
//! once earned, a badge never reverts, even if activity later drops below
//! the threshold.

use crate::error::ApiError;
use crate::repositories::{
    BadgeDefinition, BadgeRepository, BpReadingRepository, MoodLogRepository, UserBadgeRepository,
};
use bp_guardian_shared::types::{BadgeReport, BadgeStatus};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap, HashSet};
use uuid::Uuid;

pub const FIRST_BP_READING: &str = "FIRST_BP_READING";
pub const WEEKLY_BP_CONSISTENT_7: &str = "WEEKLY_BP_CONSISTENT_7";
pub const WEEKLY_MOOD_AWARE: &str = "WEEKLY_MOOD_AWARE";
pub const MONTHLY_BP_CONSISTENT_20: &str = "MONTHLY_BP_CONSISTENT_20";

/// The fixed badge catalog. Seeded once at startup; definitions are never
/// updated after creation.
pub const BADGE_DEFINITIONS: [BadgeDefinition; 4] = [
    BadgeDefinition {
        code: FIRST_BP_READING,
        name: "First Step",
        description: "Recorded your first blood pressure reading.",
    },
    BadgeDefinition {
        code: WEEKLY_BP_CONSISTENT_7,
        name: "Consistency Star",
        description: "Logged blood pressure on 7 different days in the last 7 days.",
    },
    BadgeDefinition {
        code: WEEKLY_MOOD_AWARE,
        name: "Mood Aware",
        description: "Logged your mood on at least 5 days in the last 7 days.",
    },
    BadgeDefinition {
        code: MONTHLY_BP_CONSISTENT_20,
        name: "Long-Run Logger",
        description: "Logged blood pressure on at least 20 days in the last 30 days.",
    },
];

/// Rolling-window activity snapshot for one user, queried fresh per
/// evaluation
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeActivity {
    /// Any BP reading exists, ever
    pub has_any_bp_reading: bool,
    /// Distinct calendar days with a BP reading in the last 7 days
    pub bp_days_last_7: usize,
    /// Distinct calendar days with a mood log in the last 7 days
    pub mood_days_last_7: usize,
    /// Distinct calendar days with a BP reading in the last 30 days
    pub bp_days_last_30: usize,
}

/// Decide which badges to award given the earned set at the start of the
/// call. Evaluation order is fixed; conditions are independent, and codes
/// already earned are never re-evaluated.
pub fn award_decisions(earned: &HashSet<String>, activity: &BadgeActivity) -> Vec<&'static str> {
    let mut newly = Vec::new();

    if !earned.contains(FIRST_BP_READING) && activity.has_any_bp_reading {
        newly.push(FIRST_BP_READING);
    }
    if !earned.contains(WEEKLY_BP_CONSISTENT_7) && activity.bp_days_last_7 >= 7 {
        newly.push(WEEKLY_BP_CONSISTENT_7);
    }
    if !earned.contains(WEEKLY_MOOD_AWARE) && activity.mood_days_last_7 >= 5 {
        newly.push(WEEKLY_MOOD_AWARE);
    }
    if !earned.contains(MONTHLY_BP_CONSISTENT_20) && activity.bp_days_last_30 >= 20 {
        newly.push(MONTHLY_BP_CONSISTENT_20);
    }

    newly
}

/// Sort badge statuses: earned first, then alphabetically by name within
/// each group.
pub(crate) fn sort_badge_statuses(badges: &mut [BadgeStatus]) {
    badges.sort_by(|a, b| (!a.earned, &a.name).cmp(&(!b.earned, &b.name)));
}

/// Badge evaluation service
pub struct BadgeService;

impl BadgeService {
    /// Evaluate all badge conditions for a user, award any newly met ones,
    /// and return the full badge status list.
    ///
    /// `today` bounds the rolling windows; `now` stamps any new awards.
    pub async fn evaluate_and_award(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<BadgeReport, ApiError> {
        let earned: HashSet<String> = UserBadgeRepository::get_earned(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|e| e.code)
            .collect();

        let activity = Self::collect_activity(pool, user_id, today).await?;

        let mut newly_awarded = Vec::new();
        for code in award_decisions(&earned, &activity) {
            // Conditional insert: a lost race against a concurrent
            // evaluation simply reports the badge as not newly awarded.
            let inserted = UserBadgeRepository::award_if_absent(pool, user_id, code, now)
                .await
                .map_err(ApiError::Internal)?;
            if inserted {
                newly_awarded.push(code.to_string());
            }
        }

        let badges = Self::badge_statuses(pool, user_id).await?;

        Ok(BadgeReport {
            badges,
            newly_awarded,
        })
    }

    /// Query the rolling-window activity counts for one user
    async fn collect_activity(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<BadgeActivity, ApiError> {
        // Calendar-day windows: today-6 through today and today-29 through
        // today, both bounded by today's end-of-day instant.
        let end = end_of_day(today);
        let week_start = start_of_day(today - Duration::days(6));
        let month_start = start_of_day(today - Duration::days(29));

        let has_any_bp_reading = BpReadingRepository::exists_any(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let month_readings = BpReadingRepository::get_in_range(pool, user_id, month_start, end)
            .await
            .map_err(ApiError::Internal)?;
        let week_moods = MoodLogRepository::get_in_range(pool, user_id, week_start, end)
            .await
            .map_err(ApiError::Internal)?;

        let bp_days_last_30: BTreeSet<NaiveDate> = month_readings
            .iter()
            .map(|r| r.timestamp.date_naive())
            .collect();
        let bp_days_last_7 = bp_days_last_30
            .iter()
            .filter(|d| **d >= week_start.date_naive())
            .count();
        let mood_days_last_7: BTreeSet<NaiveDate> =
            week_moods.iter().map(|m| m.timestamp.date_naive()).collect();

        Ok(BadgeActivity {
            has_any_bp_reading,
            bp_days_last_7,
            mood_days_last_7: mood_days_last_7.len(),
            bp_days_last_30: bp_days_last_30.len(),
        })
    }

    /// Full badge definition list annotated with this user's earned state
    async fn badge_statuses(pool: &PgPool, user_id: Uuid) -> Result<Vec<BadgeStatus>, ApiError> {
        let definitions = BadgeRepository::get_all(pool)
            .await
            .map_err(ApiError::Internal)?;
        let earned: HashMap<String, DateTime<Utc>> = UserBadgeRepository::get_earned(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|e| (e.code, e.earned_at))
            .collect();

        let mut badges: Vec<BadgeStatus> = definitions
            .into_iter()
            .map(|def| {
                let earned_at = earned.get(&def.code).copied();
                BadgeStatus {
                    code: def.code,
                    name: def.name,
                    description: def.description,
                    earned: earned_at.is_some(),
                    earned_at,
                }
            })
            .collect();

        sort_badge_statuses(&mut badges);
        Ok(badges)
    }
}

/// End-of-day instant used as the inclusive upper bound for badge windows
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
    NaiveDateTime::new(date, time).and_utc()
}

/// Start-of-day instant used as the lower bound for badge windows
fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    NaiveDateTime::new(date, NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earned(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_no_activity_awards_nothing() {
        let decisions = award_decisions(&earned(&[]), &BadgeActivity::default());
        assert!(decisions.is_empty());
    }

    #[test]
    fn test_first_reading_awards_on_any_lifetime_activity() {
        let activity = BadgeActivity {
            has_any_bp_reading: true,
            ..Default::default()
        };
        assert_eq!(award_decisions(&earned(&[]), &activity), vec![FIRST_BP_READING]);
    }

    #[test]
    fn test_weekly_bp_requires_seven_distinct_days() {
        let mut activity = BadgeActivity {
            has_any_bp_reading: true,
            bp_days_last_7: 6,
            ..Default::default()
        };
        let already = earned(&[FIRST_BP_READING]);
        assert!(award_decisions(&already, &activity).is_empty());

        activity.bp_days_last_7 = 7;
        assert_eq!(
            award_decisions(&already, &activity),
            vec![WEEKLY_BP_CONSISTENT_7]
        );
    }

    #[test]
    fn test_mood_aware_threshold() {
        let mut activity = BadgeActivity {
            mood_days_last_7: 4,
            ..Default::default()
        };
        assert!(award_decisions(&earned(&[]), &activity).is_empty());

        activity.mood_days_last_7 = 5;
        assert_eq!(award_decisions(&earned(&[]), &activity), vec![WEEKLY_MOOD_AWARE]);
    }

    #[test]
    fn test_monthly_threshold() {
        let activity = BadgeActivity {
            bp_days_last_30: 20,
            ..Default::default()
        };
        let already = earned(&[FIRST_BP_READING, WEEKLY_BP_CONSISTENT_7]);
        assert_eq!(
            award_decisions(&already, &activity),
            vec![MONTHLY_BP_CONSISTENT_20]
        );
    }

    #[test]
    fn test_already_earned_codes_never_retrigger() {
        // All conditions met, all badges already earned: nothing to award
        let activity = BadgeActivity {
            has_any_bp_reading: true,
            bp_days_last_7: 7,
            mood_days_last_7: 7,
            bp_days_last_30: 30,
        };
        let all = earned(&[
            FIRST_BP_READING,
            WEEKLY_BP_CONSISTENT_7,
            WEEKLY_MOOD_AWARE,
            MONTHLY_BP_CONSISTENT_20,
        ]);
        assert!(award_decisions(&all, &activity).is_empty());
    }

    #[test]
    fn test_decisions_follow_fixed_order() {
        let activity = BadgeActivity {
            has_any_bp_reading: true,
            bp_days_last_7: 7,
            mood_days_last_7: 5,
            bp_days_last_30: 20,
        };
        assert_eq!(
            award_decisions(&earned(&[]), &activity),
            vec![
                FIRST_BP_READING,
                WEEKLY_BP_CONSISTENT_7,
                WEEKLY_MOOD_AWARE,
                MONTHLY_BP_CONSISTENT_20,
            ]
        );
    }

    #[test]
    fn test_awards_are_monotonic_against_dropped_activity() {
        // Activity later drops below every threshold, but earned codes are
        // simply skipped, never revoked.
        let all = earned(&[
            FIRST_BP_READING,
            WEEKLY_BP_CONSISTENT_7,
            WEEKLY_MOOD_AWARE,
            MONTHLY_BP_CONSISTENT_20,
        ]);
        assert!(award_decisions(&all, &BadgeActivity::default()).is_empty());
    }

    #[test]
    fn test_status_sort_earned_first_then_name() {
        let status = |name: &str, earned: bool| BadgeStatus {
            code: name.to_uppercase(),
            name: name.to_string(),
            description: None,
            earned,
            earned_at: None,
        };

        let mut badges = vec![
            status("Mood Aware", false),
            status("Long-Run Logger", true),
            status("Consistency Star", false),
            status("First Step", true),
        ];
        sort_badge_statuses(&mut badges);

        let names: Vec<&str> = badges.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["First Step", "Long-Run Logger", "Consistency Star", "Mood Aware"]
        );
    }

    #[test]
    fn test_badge_window_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        // 7-day window reaches back to the start of today-6, 30-day to the
        // start of today-29; both end at today's end-of-day instant.
        let week_start = start_of_day(today - Duration::days(6));
        let month_start = start_of_day(today - Duration::days(29));
        let end = end_of_day(today);

        assert_eq!(week_start.to_rfc3339(), "2024-03-04T00:00:00+00:00");
        assert_eq!(month_start.date_naive().to_string(), "2024-02-10");
        assert_eq!(end.date_naive(), today);
        // The week window spans exactly 7 distinct calendar dates
        assert_eq!((end.date_naive() - week_start.date_naive()).num_days() + 1, 7);
    }

    #[test]
    fn test_catalog_has_four_immutable_definitions() {
        assert_eq!(BADGE_DEFINITIONS.len(), 4);
        let codes: HashSet<&str> = BADGE_DEFINITIONS.iter().map(|d| d.code).collect();
        assert_eq!(codes.len(), 4);
        assert!(codes.contains(FIRST_BP_READING));
        assert!(codes.contains(MONTHLY_BP_CONSISTENT_20));
    }
}
