use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{rounded_ratio, Dated, VitalAverages};
use crate::models::{Medication, MedicationLogEntry, SymptomEntry, VitalReading};

const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub vitals_count: usize,
    pub averages: Option<VitalAverages>,
    pub symptom_days: usize,
    pub doses_taken: usize,
    pub expected_doses: usize,
    /// `None` when no medications are configured.
    pub adherence_percent: Option<u32>,
}

/// Summary over `[now - 7 days, now]`, compared on full timestamps rather
/// than calendar days.
pub fn weekly_summary(
    vitals: &[VitalReading],
    symptoms: &[SymptomEntry],
    medications: &[Medication],
    med_log: &[MedicationLogEntry],
    now: DateTime<Utc>,
) -> WeeklySummary {
    let window_start = now - Duration::days(WINDOW_DAYS);

    let week_vitals: Vec<&VitalReading> = within(vitals, window_start, now).collect();

    let symptom_days = within(symptoms, window_start, now)
        .map(Dated::date)
        .collect::<BTreeSet<_>>()
        .len();

    let doses_taken = within(med_log, window_start, now).count();

    WeeklySummary {
        window_start,
        window_end: now,
        vitals_count: week_vitals.len(),
        averages: VitalAverages::of(week_vitals.iter().copied()),
        symptom_days,
        doses_taken,
        expected_doses: medications.len() * WINDOW_DAYS as usize,
        adherence_percent: adherence_percent(doses_taken, medications.len()),
    }
}

fn within<'a, R: Dated>(
    records: &'a [R],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> impl Iterator<Item = &'a R> {
    records
        .iter()
        .filter(move |r| r.timestamp() >= start && r.timestamp() <= end)
}

/// Logged doses as a rounded percentage of one dose per medication per day
/// over the week. Not clamped; extra doses push it past 100.
pub fn adherence_percent(doses_taken: usize, medication_count: usize) -> Option<u32> {
    if medication_count == 0 {
        return None;
    }
    let expected = medication_count as u64 * WINDOW_DAYS as u64;
    Some(rounded_ratio(100 * doses_taken as u64, expected) as u32)
}
