//! Dashboard aggregation service
//!
//! Produces the charting payload for one time range: raw BP/mood series,
//! window extremes, per-day averages, and the correlation points for days
//! carrying both series.

use crate::error::ApiError;
use crate::repositories::{BpReadingRepository, MoodLogRepository};
use bp_guardian_shared::analysis::classify_mood_from_avg;
use bp_guardian_shared::types::{
    BpDaily, BpPoint, CorrelationPoint, DailySummary, DashboardResponse, LatestBp, MoodDaily,
    MoodPoint,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Resolve the `range` query parameter to a number of lookback days.
/// Unrecognized values fall back to a week.
pub fn range_days(range: &str) -> i64 {
    match range.to_ascii_lowercase().as_str() {
        "month" => 30,
        "year" => 365,
        _ => 7,
    }
}

/// Dashboard service
pub struct DashboardService;

impl DashboardService {
    /// Build the dashboard for the window ending at `now`.
    pub async fn summary(
        pool: &PgPool,
        user_id: Uuid,
        range: &str,
        now: DateTime<Utc>,
    ) -> Result<DashboardResponse, ApiError> {
        let days = range_days(range);
        let start = now - Duration::days(days);

        let readings = BpReadingRepository::get_in_range(pool, user_id, start, now)
            .await
            .map_err(ApiError::Internal)?;
        let moods = MoodLogRepository::get_in_range(pool, user_id, start, now)
            .await
            .map_err(ApiError::Internal)?;

        let start_date = start.date_naive();
        let end_date = now.date_naive();

        if readings.is_empty() {
            return Ok(DashboardResponse {
                range: range.to_string(),
                start_date,
                end_date,
                last_bp: None,
                highest_bp: None,
                lowest_bp: None,
                bp_series: Vec::new(),
                mood_series: Vec::new(),
                daily_summary: DailySummary {
                    bp_daily: Vec::new(),
                    mood_daily: Vec::new(),
                    correlation_points: Vec::new(),
                },
            });
        }

        // Rows are ascending by timestamp, so the last one is the latest
        let snapshot = |r: &crate::repositories::BpReadingRecord| LatestBp {
            systolic: r.systolic,
            diastolic: r.diastolic,
            timestamp: r.timestamp,
        };
        let last_bp = readings.last().map(snapshot);
        let highest_bp = readings
            .iter()
            .max_by_key(|r| (r.systolic, r.diastolic))
            .map(snapshot);
        let lowest_bp = readings
            .iter()
            .min_by_key(|r| (r.systolic, r.diastolic))
            .map(snapshot);

        let bp_series: Vec<BpPoint> = readings
            .iter()
            .map(|r| BpPoint {
                timestamp: r.timestamp,
                systolic: r.systolic,
                diastolic: r.diastolic,
            })
            .collect();
        let mood_series: Vec<MoodPoint> = moods
            .iter()
            .map(|m| MoodPoint {
                timestamp: m.timestamp,
                mood_level: m.mood_level,
                note: m.note.clone(),
            })
            .collect();

        // Group both series by calendar day, sorted by date
        let mut bp_by_date: BTreeMap<NaiveDate, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for r in &readings {
            let entry = bp_by_date.entry(r.timestamp.date_naive()).or_default();
            entry.0.push(r.systolic as f64);
            entry.1.push(r.diastolic as f64);
        }
        let mut mood_by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for m in &moods {
            mood_by_date
                .entry(m.timestamp.date_naive())
                .or_default()
                .push(m.mood_level as f64);
        }

        let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;

        let bp_daily: Vec<BpDaily> = bp_by_date
            .iter()
            .map(|(date, (sys, dia))| BpDaily {
                date: *date,
                avg_systolic: round1(mean(sys)),
                avg_diastolic: round1(mean(dia)),
            })
            .collect();

        let mood_daily: Vec<MoodDaily> = mood_by_date
            .iter()
            .map(|(date, levels)| {
                let avg = mean(levels);
                MoodDaily {
                    date: *date,
                    avg_mood: round2(avg),
                    mood_category: classify_mood_from_avg(avg),
                }
            })
            .collect();

        let correlation_points: Vec<CorrelationPoint> = bp_by_date
            .iter()
            .filter_map(|(date, (sys, dia))| {
                let levels = mood_by_date.get(date)?;
                let avg_mood = mean(levels);
                Some(CorrelationPoint {
                    date: *date,
                    avg_systolic: round1(mean(sys)),
                    avg_diastolic: round1(mean(dia)),
                    avg_mood: round2(avg_mood),
                    mood_category: classify_mood_from_avg(avg_mood),
                })
            })
            .collect();

        Ok(DashboardResponse {
            range: range.to_string(),
            start_date,
            end_date,
            last_bp,
            highest_bp,
            lowest_bp,
            bp_series,
            mood_series,
            daily_summary: DailySummary {
                bp_daily,
                mood_daily,
                correlation_points,
            },
        })
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
