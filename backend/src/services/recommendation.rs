//! Daily recommendation engine
//!
//! Combines BP risk level, the 7-day trend, weekly mood category, the
//! stress-impact heuristic, and logging consistency into one structured
//! recommendation with human-friendly advice.
//!
//! The engine itself is a pure function of the fetched window and the
//! caller-supplied reference date; only the route layer reads the clock.

use crate::error::ApiError;
use crate::repositories::{BpReadingRepository, MoodLogRepository};
use crate::services::readings::{bp_to_domain, mood_to_domain};
use bp_guardian_shared::analysis::{
    classify_bp_status, compute_bp_stats, compute_bp_trend, compute_mood_summary,
    compute_stress_impact, summarize_logging, BpStatus, BpTrend, LoggingStatus, MoodCategory,
    RiskLevel, StressImpact,
};
use bp_guardian_shared::models::{BpReading, MoodLog};
use bp_guardian_shared::types::{LatestBp, Recommendation};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, NaiveDateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Length of the analysis lookback from the end-of-day bound
const ANALYSIS_DAYS: i64 = 7;

/// The inclusive time window analyzed for `today`: from 7 days before
/// today's end-of-day instant up to that instant.
pub fn analysis_window(today: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
        .unwrap_or(NaiveTime::MIN);
    let end = NaiveDateTime::new(today, end_of_day).and_utc();
    let start = end - Duration::days(ANALYSIS_DAYS);
    (start, end)
}

/// Daily recommendation service
pub struct RecommendationService;

impl RecommendationService {
    /// Get the daily recommendation for a user.
    ///
    /// `today` is supplied by the caller so the whole evaluation stays
    /// deterministic and testable.
    pub async fn get_daily(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Recommendation, ApiError> {
        let (start, end) = analysis_window(today);

        let readings: Vec<BpReading> = BpReadingRepository::get_in_range(pool, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(bp_to_domain)
            .collect();

        let moods: Vec<MoodLog> = MoodLogRepository::get_in_range(pool, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(mood_to_domain)
            .collect();

        Ok(build_recommendation(&readings, &moods, today))
    }
}

/// Build the recommendation from a window of records. Pure; `readings` and
/// `moods` are the window `analysis_window(today)` for one user.
pub fn build_recommendation(
    readings: &[BpReading],
    moods: &[MoodLog],
    today: NaiveDate,
) -> Recommendation {
    // No BP data: no meaningful BP-based advice, return onboarding guidance
    let Some(stats) = compute_bp_stats(readings) else {
        return no_data_recommendation(today);
    };

    let latest = readings
        .iter()
        .max_by_key(|r| r.timestamp)
        .map(|r| LatestBp {
            systolic: r.systolic,
            diastolic: r.diastolic,
            timestamp: r.timestamp,
        });

    let bp_status = classify_bp_status(stats.avg_systolic, stats.avg_diastolic);
    let bp_risk = bp_status.risk_level();
    let bp_trend = compute_bp_trend(readings);

    let mood = compute_mood_summary(moods);
    let stress_impact = compute_stress_impact(readings, moods);

    let (start, end) = analysis_window(today);
    let logging_status = summarize_logging(readings, start.date_naive(), end.date_naive());

    let mut recommendations = Vec::new();
    recommendations.push(bp_advice(bp_status).to_string());
    if let Some(text) = trend_advice(bp_trend) {
        recommendations.push(text.to_string());
    }
    if let Some(text) = mood_advice(mood.category, stress_impact) {
        recommendations.push(text);
    }
    if let Some(text) = logging_advice(logging_status) {
        recommendations.push(text.to_string());
    }

    Recommendation {
        date: today,
        latest_bp: latest,
        bp_status,
        bp_risk_level: bp_risk,
        bp_trend,
        mood_status: mood.category,
        stress_impact,
        logging_status,
        summary: build_summary(bp_risk, bp_trend, mood.category, stress_impact),
        recommendations,
    }
}

/// Fixed result for a window with zero BP readings
fn no_data_recommendation(today: NaiveDate) -> Recommendation {
    Recommendation {
        date: today,
        latest_bp: None,
        bp_status: BpStatus::NoData,
        bp_risk_level: RiskLevel::Unknown,
        bp_trend: BpTrend::Unknown,
        mood_status: MoodCategory::NoData,
        stress_impact: StressImpact::Unknown,
        logging_status: LoggingStatus::NoData,
        summary: "No blood pressure data recorded in the last week. \
                  Please log your readings so BP Guardian can give you a personalized recommendation."
            .to_string(),
        recommendations: vec![
            "Start by measuring your blood pressure at least once a day for a few days.".to_string(),
            "After each measurement, take a moment to record how you feel (stressed, okay, or calm)."
                .to_string(),
        ],
    }
}

/// Core advice block selected by BP status
fn bp_advice(status: BpStatus) -> &'static str {
    match status {
        BpStatus::Normal => {
            "Your blood pressure has been in the normal range on average. \
             Keep your current habits: regular movement, moderate salt intake, and enough sleep."
        }
        BpStatus::Elevated => {
            "Your average blood pressure is slightly above the normal range. \
             Try to reduce very salty foods (like instant soups, chips, and processed meat) \
             and add at least 20-30 minutes of light activity, such as walking, on most days."
        }
        BpStatus::Stage1 => {
            "Your average blood pressure is in the moderately high range. \
             Focus on reducing salt, avoiding smoking and excessive alcohol, \
             and adding daily movement such as brisk walking."
        }
        BpStatus::Stage2 | BpStatus::NoData => {
            "Your average blood pressure is in the high range. \
             It is important to reduce salt, avoid smoking and alcohol, and keep active with light exercise if you can. \
             Consider contacting a healthcare professional, especially if you see repeated very high readings."
        }
    }
}

/// Trend advice block; nothing when the trend is unknown
fn trend_advice(trend: BpTrend) -> Option<&'static str> {
    match trend {
        BpTrend::Worsening => Some(
            "Over the last days, your blood pressure looks higher compared to earlier in the week. \
             Try to pay extra attention to salty meals, late-night eating, and missed medication (if prescribed). \
             Monitor your readings more regularly over the next few days.",
        ),
        BpTrend::Improving => Some(
            "Your blood pressure trend over the last days is improving. \
             Keep up the helpful habits you have started, such as moving more or reducing salt.",
        ),
        BpTrend::Stable => Some(
            "Your blood pressure has been relatively stable over the last week. \
             Maintain your current routine and continue tracking.",
        ),
        BpTrend::Unknown => None,
    }
}

/// Combined mood and stress advice block; nothing when there is no mood data
fn mood_advice(mood: MoodCategory, stress_impact: StressImpact) -> Option<String> {
    match mood {
        MoodCategory::HighStress => {
            let mut text = String::from(
                "Your mood data suggests frequent stress. \
                 Try short relaxation breaks during the day: slow deep breathing for 5 minutes, \
                 a brief walk, or stretching away from screens.",
            );
            match stress_impact {
                StressImpact::Likely => text.push_str(
                    " Your readings tend to be higher on stressful days, so stress management may help your blood pressure.",
                ),
                StressImpact::Possible => text.push_str(
                    " There are signs that your blood pressure may be higher on stressful days.",
                ),
                _ => {}
            }
            Some(text)
        }
        MoodCategory::Medium => {
            let mut text = String::from(
                "Your mood has been mixed or moderate. \
                 Notice which situations raise your stress level and try to balance them with short breaks or light activity.",
            );
            match stress_impact {
                StressImpact::Likely => text.push_str(
                    " BP Guardian sees a clear pattern of higher blood pressure on more stressful days.",
                ),
                StressImpact::Possible => {
                    text.push_str(" There may be some link between stress and higher readings.")
                }
                _ => {}
            }
            Some(text)
        }
        MoodCategory::Calm => {
            if matches!(stress_impact, StressImpact::Likely | StressImpact::Possible) {
                Some(String::from(
                    "Your mood has been mostly calm, which is positive. \
                     On the few more stressful days, your blood pressure appears slightly higher. \
                     Keep your calm routines and use them on stressful days as well.",
                ))
            } else {
                Some(String::from(
                    "Your mood has been mostly calm. This is good for your heart health. \
                     Try to protect this by getting enough sleep and taking short breaks during busy days.",
                ))
            }
        }
        MoodCategory::NoData => None,
    }
}

/// Logging consistency advice block
fn logging_advice(status: LoggingStatus) -> Option<&'static str> {
    match status {
        LoggingStatus::Irregular => Some(
            "Your blood pressure has not been logged very regularly this week. \
             Try to record it on at least 4-5 days per week so that trends and advice are more accurate.",
        ),
        LoggingStatus::SemiConsistent => Some(
            "You are logging your blood pressure on some days. \
             A little more consistency (most days of the week) will make the patterns clearer.",
        ),
        LoggingStatus::Consistent => Some(
            "You are logging your blood pressure consistently. \
             This regular tracking makes the insights from BP Guardian more reliable.",
        ),
        LoggingStatus::NoData => None,
    }
}

/// Short summary line: risk always, trend unless unknown, mood unless
/// missing, stress impact unless unclear.
fn build_summary(
    risk: RiskLevel,
    trend: BpTrend,
    mood: MoodCategory,
    stress_impact: StressImpact,
) -> String {
    let mut parts = vec![format!("Average blood pressure risk: {}.", risk.as_str())];

    if trend != BpTrend::Unknown {
        parts.push(format!("Trend over the last week: {}.", trend.as_str()));
    }
    if mood != MoodCategory::NoData {
        parts.push(format!("Mood/stress level: {}.", mood.human_label()));
    }
    if stress_impact != StressImpact::Unclear {
        parts.push(format!("Stress impact on BP: {}.", stress_impact.as_str()));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn days_ago(n: i64, hour: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &(today() - Duration::days(n))
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
        )
    }

    fn reading(systolic: i32, diastolic: i32, ts: DateTime<Utc>) -> BpReading {
        BpReading {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            systolic,
            diastolic,
            timestamp: ts,
        }
    }

    fn mood(level: i32, ts: DateTime<Utc>) -> MoodLog {
        MoodLog {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            mood_level: level,
            note: None,
            timestamp: ts,
        }
    }

    #[test]
    fn test_analysis_window_bounds() {
        let (start, end) = analysis_window(today());
        assert_eq!(end.date_naive(), today());
        assert_eq!(start.date_naive(), today() - Duration::days(7));
        assert_eq!(end - start, Duration::days(7));
    }

    #[test]
    fn test_no_data_fixed_result() {
        let rec = build_recommendation(&[], &[], today());
        assert_eq!(rec.bp_status, BpStatus::NoData);
        assert_eq!(rec.bp_risk_level, RiskLevel::Unknown);
        assert_eq!(rec.bp_trend, BpTrend::Unknown);
        assert_eq!(rec.mood_status, MoodCategory::NoData);
        assert_eq!(rec.stress_impact, StressImpact::Unknown);
        assert_eq!(rec.logging_status, LoggingStatus::NoData);
        assert!(rec.latest_bp.is_none());
        assert_eq!(rec.recommendations.len(), 2);
        assert!(rec.summary.starts_with("No blood pressure data"));
    }

    #[test]
    fn test_no_data_ignores_mood_entries() {
        // Mood entries without any BP reading still hit the early return
        let moods = vec![mood(1, days_ago(1, 9))];
        let rec = build_recommendation(&[], &moods, today());
        assert_eq!(rec.bp_status, BpStatus::NoData);
        assert_eq!(rec.mood_status, MoodCategory::NoData);
    }

    #[test]
    fn test_single_reading_classifies_without_trend() {
        let readings = vec![reading(118, 75, days_ago(1, 8))];
        let rec = build_recommendation(&readings, &[], today());
        assert_eq!(rec.bp_status, BpStatus::Normal);
        assert_eq!(rec.bp_risk_level, RiskLevel::Low);
        assert_eq!(rec.bp_trend, BpTrend::Unknown);
        assert_eq!(rec.logging_status, LoggingStatus::Irregular);
        assert_eq!(
            rec.latest_bp,
            Some(LatestBp {
                systolic: 118,
                diastolic: 75,
                timestamp: days_ago(1, 8),
            })
        );
    }

    #[test]
    fn test_latest_bp_is_newest_reading() {
        let readings = vec![
            reading(120, 80, days_ago(5, 8)),
            reading(135, 88, days_ago(0, 8)),
            reading(125, 82, days_ago(2, 8)),
        ];
        let rec = build_recommendation(&readings, &[], today());
        assert_eq!(rec.latest_bp.unwrap().systolic, 135);
    }

    #[test]
    fn test_or_branch_in_status_flows_through() {
        // Normal systolic average with a diastolic average of 85: stage1
        let readings = vec![reading(115, 85, days_ago(1, 8))];
        let rec = build_recommendation(&readings, &[], today());
        assert_eq!(rec.bp_status, BpStatus::Stage1);
        assert_eq!(rec.bp_risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_advice_block_ordering() {
        // BP on 5 distinct days, calm mood: expect BP, trend, mood, logging
        let readings: Vec<BpReading> =
            (1..=5).map(|n| reading(118, 75, days_ago(n, 8))).collect();
        let moods: Vec<MoodLog> = (1..=5).map(|n| mood(3, days_ago(n, 9))).collect();
        let rec = build_recommendation(&readings, &moods, today());

        assert_eq!(rec.recommendations.len(), 4);
        assert!(rec.recommendations[0].contains("normal range on average"));
        assert!(rec.recommendations[1].contains("relatively stable"));
        assert!(rec.recommendations[2].contains("mostly calm"));
        assert!(rec.recommendations[3].contains("logging your blood pressure consistently"));
    }

    #[test]
    fn test_trend_block_omitted_for_single_reading() {
        let readings = vec![reading(118, 75, days_ago(1, 8))];
        let rec = build_recommendation(&readings, &[], today());
        // BP advice and logging advice only
        assert_eq!(rec.recommendations.len(), 2);
        assert!(rec.recommendations[1].contains("not been logged very regularly"));
    }

    #[test]
    fn test_stress_qualifier_appended_when_likely() {
        // Stressed days systolic 150, calm day 130: stress impact likely,
        // and the mood average (1 + 1 + 3) / 3 = 1.67 is medium.
        let readings = vec![
            reading(150, 95, days_ago(3, 8)),
            reading(150, 95, days_ago(2, 8)),
            reading(130, 85, days_ago(1, 8)),
        ];
        let moods = vec![
            mood(1, days_ago(3, 9)),
            mood(1, days_ago(2, 9)),
            mood(3, days_ago(1, 9)),
        ];
        let rec = build_recommendation(&readings, &moods, today());
        assert_eq!(rec.stress_impact, StressImpact::Likely);
        assert_eq!(rec.mood_status, MoodCategory::Medium);
        let mood_block = &rec.recommendations[2];
        assert!(mood_block.contains("mixed or moderate"));
        assert!(mood_block.contains("clear pattern of higher blood pressure"));
    }

    #[test]
    fn test_summary_includes_only_known_parts() {
        let readings = vec![reading(118, 75, days_ago(1, 8))];
        let rec = build_recommendation(&readings, &[], today());
        // Trend unknown, no mood, stress unclear: risk sentence only
        assert_eq!(rec.summary, "Average blood pressure risk: low.");
    }

    #[test]
    fn test_summary_full_composition() {
        let readings = vec![
            reading(150, 95, days_ago(3, 8)),
            reading(150, 95, days_ago(2, 8)),
            reading(130, 85, days_ago(1, 8)),
        ];
        let moods = vec![
            mood(1, days_ago(3, 9)),
            mood(1, days_ago(2, 9)),
            mood(3, days_ago(1, 9)),
        ];
        let rec = build_recommendation(&readings, &moods, today());
        assert_eq!(
            rec.summary,
            "Average blood pressure risk: high. \
             Trend over the last week: improving. \
             Mood/stress level: medium. \
             Stress impact on BP: likely."
        );
    }

    #[test]
    fn test_logging_consistency_levels() {
        let five_days: Vec<BpReading> =
            (1..=5).map(|n| reading(118, 75, days_ago(n, 8))).collect();
        assert_eq!(
            build_recommendation(&five_days, &[], today()).logging_status,
            LoggingStatus::Consistent
        );

        let three_days: Vec<BpReading> =
            (1..=3).map(|n| reading(118, 75, days_ago(n, 8))).collect();
        assert_eq!(
            build_recommendation(&three_days, &[], today()).logging_status,
            LoggingStatus::SemiConsistent
        );

        let one_day = vec![reading(118, 75, days_ago(1, 8))];
        assert_eq!(
            build_recommendation(&one_day, &[], today()).logging_status,
            LoggingStatus::Irregular
        );
    }

    #[test]
    fn test_serialized_shape_matches_api_contract() {
        let rec = build_recommendation(&[], &[], today());
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["bp_status"], "no_data");
        assert_eq!(json["bp_risk_level"], "unknown");
        assert_eq!(json["stress_impact"], "unknown");
        // latest_bp is omitted entirely in the no-data shape
        assert!(json.get("latest_bp").is_none());
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 2);
    }
}
