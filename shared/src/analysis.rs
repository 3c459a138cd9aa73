//! Blood-pressure and mood analysis primitives
//!
//! Pure classification functions shared by the recommendation engine and the
//! dashboard: BP status and risk labels, week-over-week trend, mood category,
//! the stress-impact heuristic, and logging consistency.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no clock, no I/O; callers supply the window bounds
//! 2. **Graceful Degradation**: sparse data yields sentinel labels
//!    (`no_data`, `unknown`, `unclear`) instead of errors
//! 3. **Deterministic Thresholds**: fixed mmHg cut-offs, no statistics

use crate::models::{BpReading, MoodLog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Classification Labels
// ============================================================================

/// Blood-pressure status over a window, classified on window averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BpStatus {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    NoData,
}

impl BpStatus {
    /// Map status to the simpler risk label shown in summaries
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            BpStatus::Normal => RiskLevel::Low,
            BpStatus::Elevated => RiskLevel::Borderline,
            BpStatus::Stage1 => RiskLevel::Moderate,
            BpStatus::Stage2 => RiskLevel::High,
            BpStatus::NoData => RiskLevel::Unknown,
        }
    }
}

/// Simplified risk label derived 1:1 from [`BpStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Borderline,
    Moderate,
    High,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Borderline => "borderline",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }
}

/// Direction of the systolic average between the older and newer half of a
/// window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BpTrend {
    Improving,
    Stable,
    Worsening,
    Unknown,
}

impl BpTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            BpTrend::Improving => "improving",
            BpTrend::Stable => "stable",
            BpTrend::Worsening => "worsening",
            BpTrend::Unknown => "unknown",
        }
    }
}

/// Mood category on the 1-3 scale (1 = high stress, 3 = calm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodCategory {
    HighStress,
    Medium,
    Calm,
    NoData,
}

impl MoodCategory {
    /// Human-readable form used in summary sentences ("high stress", not
    /// "high_stress")
    pub fn human_label(&self) -> &'static str {
        match self {
            MoodCategory::HighStress => "high stress",
            MoodCategory::Medium => "medium",
            MoodCategory::Calm => "calm",
            MoodCategory::NoData => "no data",
        }
    }
}

/// Whether stress appears to correlate with elevated readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressImpact {
    Likely,
    Possible,
    Unclear,
    Unknown,
}

impl StressImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressImpact::Likely => "likely",
            StressImpact::Possible => "possible",
            StressImpact::Unclear => "unclear",
            StressImpact::Unknown => "unknown",
        }
    }
}

/// How regularly BP was logged over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggingStatus {
    Consistent,
    SemiConsistent,
    Irregular,
    NoData,
}

// ============================================================================
// BP Statistics
// ============================================================================

/// Window average and extremes of systolic/diastolic pressure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpStats {
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
    pub min_systolic: i32,
    pub min_diastolic: i32,
    pub max_systolic: i32,
    pub max_diastolic: i32,
}

/// Compute window average and min/max of systolic and diastolic pressure.
///
/// Simple arithmetic mean, no outlier handling. Returns `None` for an empty
/// window.
pub fn compute_bp_stats(readings: &[BpReading]) -> Option<BpStats> {
    if readings.is_empty() {
        return None;
    }

    let n = readings.len() as f64;
    let sum_sys: i64 = readings.iter().map(|r| r.systolic as i64).sum();
    let sum_dia: i64 = readings.iter().map(|r| r.diastolic as i64).sum();

    Some(BpStats {
        avg_systolic: sum_sys as f64 / n,
        avg_diastolic: sum_dia as f64 / n,
        min_systolic: readings.iter().map(|r| r.systolic).min()?,
        min_diastolic: readings.iter().map(|r| r.diastolic).min()?,
        max_systolic: readings.iter().map(|r| r.systolic).max()?,
        max_diastolic: readings.iter().map(|r| r.diastolic).max()?,
    })
}

// ============================================================================
// BP Classification
// ============================================================================

/// Classify window-average blood pressure into categories.
///
/// Evaluated in priority order, first match wins. Note that the `stage1` arm
/// is an OR over its systolic and diastolic bands while `normal` and
/// `elevated` are ANDs, so a diastolic average of 85 lands in `stage1` even
/// with a normal systolic average.
pub fn classify_bp_status(avg_systolic: f64, avg_diastolic: f64) -> BpStatus {
    if avg_systolic < 120.0 && avg_diastolic < 80.0 {
        BpStatus::Normal
    } else if (120.0..=129.0).contains(&avg_systolic) && avg_diastolic < 80.0 {
        BpStatus::Elevated
    } else if (130.0..=139.0).contains(&avg_systolic) || (80.0..=89.0).contains(&avg_diastolic) {
        BpStatus::Stage1
    } else {
        BpStatus::Stage2
    }
}

/// Rough trend: mean systolic of the newer half of the window compared
/// against the older half.
///
/// The split point is the floor-division midpoint, so with an odd count the
/// extra reading falls into the newer half. Requires at least two readings.
pub fn compute_bp_trend(readings: &[BpReading]) -> BpTrend {
    if readings.len() < 2 {
        return BpTrend::Unknown;
    }

    let mut sorted: Vec<&BpReading> = readings.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let mid = sorted.len() / 2;
    let (older, newer) = sorted.split_at(mid);

    let avg_sys =
        |half: &[&BpReading]| half.iter().map(|r| r.systolic as f64).sum::<f64>() / half.len() as f64;

    // Thresholds in mmHg, positive diff means pressure is rising
    let diff = avg_sys(newer) - avg_sys(older);
    if diff >= 5.0 {
        BpTrend::Worsening
    } else if diff <= -5.0 {
        BpTrend::Improving
    } else {
        BpTrend::Stable
    }
}

/// Days with any BP reading inside the inclusive `start..=end` date window.
pub fn summarize_logging(readings: &[BpReading], start: NaiveDate, end: NaiveDate) -> LoggingStatus {
    if readings.is_empty() {
        return LoggingStatus::NoData;
    }

    let days_with_bp: BTreeSet<NaiveDate> =
        readings.iter().map(|r| r.timestamp.date_naive()).collect();
    let num_days = (end - start).num_days() + 1;

    let count = days_with_bp.len() as i64;

    if count >= 5.min(num_days) {
        LoggingStatus::Consistent
    } else if count >= 3.min(num_days) {
        LoggingStatus::SemiConsistent
    } else {
        LoggingStatus::Irregular
    }
}

// ============================================================================
// Mood & Stress Impact
// ============================================================================

/// Weekly mood average with its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub avg_mood: Option<f64>,
    pub category: MoodCategory,
}

/// Map a numeric mood average on the 1-3 scale to a category.
pub fn classify_mood_from_avg(avg_mood: f64) -> MoodCategory {
    if avg_mood < 1.5 {
        MoodCategory::HighStress
    } else if avg_mood < 2.5 {
        MoodCategory::Medium
    } else {
        MoodCategory::Calm
    }
}

/// Average mood level over a window and its category.
pub fn compute_mood_summary(moods: &[MoodLog]) -> MoodSummary {
    if moods.is_empty() {
        return MoodSummary {
            avg_mood: None,
            category: MoodCategory::NoData,
        };
    }

    let avg = moods.iter().map(|m| m.mood_level as f64).sum::<f64>() / moods.len() as f64;
    MoodSummary {
        avg_mood: Some(avg),
        category: classify_mood_from_avg(avg),
    }
}

/// Heuristic stress impact based on per-day averages.
///
/// Calendar days carrying both a BP reading and a mood log are split into
/// stressed days (day-mean mood < 2.0) and calm days (day-mean mood >= 2.5);
/// days in between belong to neither bucket. Needs at least 3 shared days and
/// one day in each bucket, otherwise the pattern is `unclear`. A stressed-day
/// systolic mean at least 5 mmHg above the calm-day mean is `likely`, at
/// least 2 mmHg is `possible`.
pub fn compute_stress_impact(readings: &[BpReading], moods: &[MoodLog]) -> StressImpact {
    if readings.is_empty() || moods.is_empty() {
        return StressImpact::Unclear;
    }

    let mut bp_by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for r in readings {
        bp_by_date
            .entry(r.timestamp.date_naive())
            .or_default()
            .push(r.systolic as f64);
    }

    let mut mood_by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for m in moods {
        mood_by_date
            .entry(m.timestamp.date_naive())
            .or_default()
            .push(m.mood_level as f64);
    }

    let common_days: Vec<NaiveDate> = bp_by_date
        .keys()
        .filter(|d| mood_by_date.contains_key(*d))
        .copied()
        .collect();
    if common_days.len() < 3 {
        return StressImpact::Unclear;
    }

    let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;

    let mut stressed_sys = Vec::new();
    let mut calm_sys = Vec::new();
    for d in &common_days {
        let day_sys = mean(&bp_by_date[d]);
        let day_mood = mean(&mood_by_date[d]);

        if day_mood < 2.0 {
            stressed_sys.push(day_sys);
        } else if day_mood >= 2.5 {
            calm_sys.push(day_sys);
        }
    }

    if stressed_sys.is_empty() || calm_sys.is_empty() {
        return StressImpact::Unclear;
    }

    // Positive diff means pressure runs higher on stressed days
    let diff = mean(&stressed_sys) - mean(&calm_sys);
    if diff >= 5.0 {
        StressImpact::Likely
    } else if diff >= 2.0 {
        StressImpact::Possible
    } else {
        StressImpact::Unclear
    }
}
