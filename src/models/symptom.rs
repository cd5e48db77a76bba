use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::local_date;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    /// Symptom name to severity on a 0-5 scale.
    pub symptoms: BTreeMap<String, u8>,
    #[serde(default)]
    pub notes: String,
}

impl SymptomEntry {
    /// `dizziness: 3/5, fatigue: 2/5`, skipping zero severities, or `None`.
    pub fn describe(&self) -> String {
        let listed: Vec<String> = self
            .symptoms
            .iter()
            .filter(|(_, severity)| **severity > 0)
            .map(|(name, severity)| format!("{name}: {severity}/5"))
            .collect();

        if listed.is_empty() {
            "None".to_string()
        } else {
            listed.join(", ")
        }
    }
}

/// Severity selections collected before the user hits save.
///
/// Owned by the caller and handed to the save command, which clears it once
/// the entry is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomForm {
    selections: BTreeMap<String, u8>,
    notes: String,
}

impl SymptomForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting a symptom again replaces its earlier severity.
    pub fn select(&mut self, symptom: impl Into<String>, severity: u8) {
        self.selections.insert(symptom.into(), severity);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn selections(&self) -> &BTreeMap<String, u8> {
        &self.selections
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn to_entry(&self, timestamp: DateTime<Utc>) -> SymptomEntry {
        SymptomEntry {
            timestamp,
            date: local_date(timestamp),
            symptoms: self.selections.clone(),
            notes: self.notes.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.selections.clear();
        self.notes.clear();
    }
}
