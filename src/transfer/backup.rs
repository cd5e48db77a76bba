use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{error::TrackerError, store::Collections};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupFile<'a> {
    #[serde(flatten)]
    collections: &'a Collections,
    export_date: DateTime<Utc>,
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("pots_backup_{date}.json")
}

/// Pretty-printed snapshot of every collection plus the export instant.
pub fn backup_json(collections: &Collections, exported_at: DateTime<Utc>) -> Result<String> {
    serde_json::to_string_pretty(&BackupFile {
        collections,
        export_date: exported_at,
    })
    .context("failed to serialize backup")
}

/// Reads a snapshot. Missing or `null` collections come back empty;
/// `exportDate` and unknown fields are ignored.
pub fn parse_backup(text: &str) -> Result<Collections, TrackerError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|err| TrackerError::ImportParse {
            reason: err.to_string(),
        })?;

    if !value.is_object() {
        return Err(TrackerError::ImportParse {
            reason: "top level is not a JSON object".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|err| TrackerError::ImportParse {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::EmergencyContacts,
        reports::fixtures::{at, dose_at, medication, symptoms_at, vitals_at},
    };

    fn sample() -> Collections {
        Collections {
            vitals: vec![vitals_at(at(0), 72, 1000, 500), vitals_at(at(1), 101, 0, 0)],
            symptoms: vec![symptoms_at(at(2))],
            medications: vec![medication(1715774400000, "Midodrine")],
            med_log: vec![dose_at(at(3), "Midodrine")],
            emergency: vec![EmergencyContacts {
                contact_name: "Alex".into(),
                contact_phone: "555-0101".into(),
                physician_name: "Dr. Rivera".into(),
                physician_phone: "555-0199".into(),
            }],
        }
    }

    #[test]
    fn backup_round_trips_every_collection() {
        let original = sample();
        let text = backup_json(&original, at(4)).unwrap();
        let restored = parse_backup(&text).unwrap();
        assert_eq!(restored, original);
        assert_eq!(
            serde_json::to_string(&restored).unwrap(),
            serde_json::to_string(&original).unwrap()
        );
    }

    #[test]
    fn backup_has_the_expected_top_level_fields() {
        let text = backup_json(&sample(), at(4)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in ["vitals", "symptoms", "medications", "medLog", "emergency", "exportDate"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert!(text.contains("\n  \"vitals\""));
    }

    #[test]
    fn missing_and_null_fields_become_empty() {
        let restored = parse_backup(r#"{"medications": null, "vitals": [], "extra": 1}"#).unwrap();
        assert_eq!(restored, Collections::default());

        let mut without_symptoms: serde_json::Value =
            serde_json::from_str(&backup_json(&sample(), at(4)).unwrap()).unwrap();
        without_symptoms.as_object_mut().unwrap().remove("symptoms");
        let restored = parse_backup(&without_symptoms.to_string()).unwrap();
        assert!(restored.symptoms.is_empty());
        assert_eq!(restored.vitals, sample().vitals);
        assert_eq!(restored.emergency, sample().emergency);
    }

    #[test]
    fn malformed_input_is_an_import_error() {
        for text in ["", "not json", "[]", r#"{"vitals": {"a": 1}}"#, r#"{"vitals": [{"heartRate": 1}]}"#] {
            assert!(
                matches!(parse_backup(text), Err(TrackerError::ImportParse { .. })),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn reads_snapshots_from_the_browser_version() {
        let text = r#"{
          "vitals": [{"timestamp": "2024-05-01T08:30:00.000Z", "date": "2024-05-01",
                      "position": "standing", "heartRate": 112, "systolic": 98,
                      "diastolic": 64, "sodium": 0, "fluid": 500}],
          "symptoms": [{"timestamp": "2024-05-01T09:00:00.000Z", "date": "2024-05-01",
                        "symptoms": {"dizziness": 3, "fatigue": 0}, "notes": ""}],
          "medications": [{"id": 1714550000000, "name": "Midodrine", "dosage": "5mg",
                           "frequency": "3x daily", "times": "8am, 12pm, 4pm"}],
          "medLog": [{"id": 1714550000000, "name": "Midodrine",
                      "timestamp": "2024-05-01T08:00:00.000Z", "date": "2024-05-01"}],
          "emergency": [{"contactName": "Jo", "contactPhone": "555",
                         "physicianName": "Dr. K", "physicianPhone": "556"}],
          "exportDate": "2024-05-02T10:00:00.000Z"
        }"#;

        let restored = parse_backup(text).unwrap();
        assert_eq!(restored.vitals[0].heart_rate, 112);
        assert_eq!(restored.symptoms[0].describe(), "dizziness: 3/5");
        assert_eq!(restored.medications[0].id, 1714550000000);
        assert_eq!(restored.med_log[0].name, "Midodrine");
        assert_eq!(restored.emergency[0].contact_name, "Jo");
    }

    #[test]
    fn file_name_uses_the_export_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(backup_file_name(date), "pots_backup_2024-05-02.json");
    }
}
