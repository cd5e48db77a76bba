use chrono::NaiveDate;
use serde::Serialize;

use super::Dated;
use crate::models::{MedicationLogEntry, SymptomEntry, VitalReading};

/// One day's entries, newest first.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayHistory {
    pub date: NaiveDate,
    pub vitals: Vec<VitalReading>,
    pub symptoms: Vec<SymptomEntry>,
    pub doses: Vec<MedicationLogEntry>,
}

fn newest_first<R: Dated + Clone>(records: &[R], date: NaiveDate) -> Vec<R> {
    records
        .iter()
        .rev()
        .filter(|r| r.date() == date)
        .cloned()
        .collect()
}

pub fn day_history(
    vitals: &[VitalReading],
    symptoms: &[SymptomEntry],
    med_log: &[MedicationLogEntry],
    date: NaiveDate,
) -> DayHistory {
    DayHistory {
        date,
        vitals: newest_first(vitals, date),
        symptoms: newest_first(symptoms, date),
        doses: newest_first(med_log, date),
    }
}
