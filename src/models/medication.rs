use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{input::required_text, local_date};
use crate::error::TrackerError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// Epoch milliseconds at creation, bumped if needed to stay unique.
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    /// Free-text schedule, e.g. "8am, 8pm".
    #[serde(default)]
    pub times: String,
}

/// A dose marked as taken. `name` is copied at logging time so the entry still
/// reads correctly after the medication is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicationLogEntry {
    pub id: i64,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
}

impl MedicationLogEntry {
    pub fn taken(medication: &Medication, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: medication.id,
            name: medication.name.clone(),
            timestamp,
            date: local_date(timestamp),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: String,
}

impl MedicationInput {
    pub fn into_medication(self, id: i64) -> Result<Medication, TrackerError> {
        Ok(Medication {
            id,
            name: required_text(&self.name, "medication name")?,
            dosage: self.dosage.trim().to_string(),
            frequency: self.frequency.trim().to_string(),
            times: self.times.trim().to_string(),
        })
    }
}

/// Creation-time id: `now` in epoch milliseconds, or one past the largest
/// existing id when several medications are added within the same millisecond.
/// Fails when a restored id already sits at `i64::MAX`.
pub fn next_medication_id(
    existing: &[Medication],
    now: DateTime<Utc>,
) -> Result<i64, TrackerError> {
    let candidate = now.timestamp_millis();
    match existing.iter().map(|m| m.id).max() {
        Some(max) if max >= candidate => max
            .checked_add(1)
            .ok_or(TrackerError::MedicationIdExhausted { max }),
        _ => Ok(candidate),
    }
}
