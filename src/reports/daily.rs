use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Position, VitalReading};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTargets {
    pub sodium_mg: u32,
    pub fluid_ml: u32,
}

impl Default for DailyTargets {
    fn default() -> Self {
        Self {
            sodium_mg: 8000,
            fluid_ml: 2500,
        }
    }
}

/// The last reading of the day as shown on the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentReading {
    /// `None` when the latest entry carried no heart rate (e.g. a water entry).
    pub heart_rate: Option<u32>,
    pub systolic: u32,
    pub diastolic: u32,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub reading_count: usize,
    pub current: Option<CurrentReading>,
    pub sodium_total: u64,
    pub fluid_total: u64,
    pub sodium_progress: f64,
    pub fluid_progress: f64,
}

pub fn daily_summary(
    vitals: &[VitalReading],
    date: NaiveDate,
    targets: DailyTargets,
) -> DailySummary {
    let todays: Vec<&VitalReading> = vitals.iter().filter(|v| v.date == date).collect();

    let sodium_total: u64 = todays.iter().map(|v| u64::from(v.sodium)).sum();
    let fluid_total: u64 = todays.iter().map(|v| u64::from(v.fluid)).sum();

    let current = todays.last().map(|latest| CurrentReading {
        heart_rate: (latest.heart_rate > 0).then_some(latest.heart_rate),
        systolic: latest.systolic,
        diastolic: latest.diastolic,
        position: latest.position,
    });

    DailySummary {
        date,
        reading_count: todays.len(),
        current,
        sodium_total,
        fluid_total,
        sodium_progress: progress(sodium_total, targets.sodium_mg),
        fluid_progress: progress(fluid_total, targets.fluid_ml),
    }
}

/// Fraction of `target` reached, clamped to 1.0. A zero target counts as met.
fn progress(total: u64, target: u32) -> f64 {
    if target == 0 {
        return 1.0;
    }
    (total as f64 / f64::from(target)).min(1.0)
}
