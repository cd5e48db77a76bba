use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{MedicationLogEntry, SymptomEntry, VitalReading};

/// Entries shown in the feed, and the tail taken from each collection.
pub const FEED_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Vitals,
    Symptoms,
    Medication,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

fn tail<T>(records: &[T]) -> &[T] {
    &records[records.len().saturating_sub(FEED_LIMIT)..]
}

/// Newest-first merge of the last few vitals, symptom logs and doses.
/// Equal timestamps keep vitals, then symptoms, then doses.
pub fn recent_activity(
    vitals: &[VitalReading],
    symptoms: &[SymptomEntry],
    med_log: &[MedicationLogEntry],
) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = Vec::with_capacity(FEED_LIMIT * 3);

    items.extend(tail(vitals).iter().map(|v| ActivityItem {
        kind: ActivityKind::Vitals,
        timestamp: v.timestamp,
        text: format!(
            "Vitals logged: HR {}, BP {}/{}",
            v.heart_rate, v.systolic, v.diastolic
        ),
    }));

    items.extend(tail(symptoms).iter().map(|s| ActivityItem {
        kind: ActivityKind::Symptoms,
        timestamp: s.timestamp,
        text: "Symptoms logged".to_string(),
    }));

    items.extend(tail(med_log).iter().map(|m| ActivityItem {
        kind: ActivityKind::Medication,
        timestamp: m.timestamp,
        text: format!("Took {}", m.name),
    }));

    // sort_by is stable, so ties keep the insertion order above.
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(FEED_LIMIT);
    items
}
