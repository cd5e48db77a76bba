use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use log::{error, info};
use serde::Serialize;

use super::reports::require_range;
use crate::{
    error::TrackerError,
    models::{local_date, VitalReading},
    store::Collections,
    transfer::{backup_file_name, backup_json, csv_file_name, parse_backup, vitals_csv},
    AppState,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub path: PathBuf,
    /// Data rows for CSV, records across all collections for a backup.
    pub records: usize,
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn record_count(collections: &Collections) -> usize {
    collections.vitals.len()
        + collections.symptoms.len()
        + collections.medications.len()
        + collections.med_log.len()
        + collections.emergency.len()
}

pub async fn export_csv(
    state: &AppState,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    out_dir: &Path,
) -> Result<ExportedFile, String> {
    let range = require_range(start, end).map_err(|e| e.to_string())?;
    let vitals = state
        .store
        .read::<VitalReading>()
        .await
        .map_err(|e| e.to_string())?;

    let rows = range.filter(&vitals).len();
    if rows == 0 {
        return Err(TrackerError::NoDataInRange.to_string());
    }

    let path = out_dir.join(csv_file_name(range));
    write_file(&path, &vitals_csv(&vitals, range)).map_err(|e| e.to_string())?;

    info!("Exported {rows} vitals row(s) to {}", path.display());
    Ok(ExportedFile {
        path,
        records: rows,
    })
}

pub async fn backup_data(state: &AppState, out_dir: &Path) -> Result<ExportedFile, String> {
    let snapshot = state.store.snapshot().await.map_err(|e| e.to_string())?;
    let now = Utc::now();
    let json = backup_json(&snapshot, now).map_err(|e| e.to_string())?;

    let path = out_dir.join(backup_file_name(local_date(now)));
    write_file(&path, &json).map_err(|e| e.to_string())?;

    info!("Backed up all data to {}", path.display());
    Ok(ExportedFile {
        path,
        records: record_count(&snapshot),
    })
}

/// Replaces every collection with the backup's contents. A file that does
/// not parse leaves the current data untouched.
pub async fn restore_data(state: &AppState, path: &Path) -> Result<Collections, String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(|e| e.to_string())?;

    let collections = parse_backup(&text).map_err(|err| {
        error!("Rejected backup {}: {err}", path.display());
        err.to_string()
    })?;

    state
        .store
        .replace_all(&collections)
        .await
        .map_err(|e| e.to_string())?;

    info!(
        "Restored {} record(s) from {}",
        record_count(&collections),
        path.display()
    );
    Ok(collections)
}

pub async fn clear_all_data(state: &AppState) -> Result<(), String> {
    state.store.clear_all().await.map_err(|e| e.to_string())?;
    info!("All tracker data cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{emergency, medications, symptoms, vitals},
        models::{
            today, EmergencyContacts, MedicationInput, Position, SymptomForm, VitalsInput,
        },
        test_support::open_state,
        transfer::CSV_HEADER,
    };
    use tempfile::tempdir;

    async fn seed(state: &AppState) {
        vitals::log_vitals(
            state,
            VitalsInput {
                position: Position::Standing,
                heart_rate: "101".into(),
                systolic: "98".into(),
                diastolic: "64".into(),
                sodium: "500".into(),
                fluid: "300".into(),
            },
        )
        .await
        .unwrap();
        vitals::add_water(state).await.unwrap();

        let mut form = SymptomForm::new();
        form.select("brain fog", 2);
        symptoms::save_symptoms(state, &mut form).await.unwrap();

        let med = medications::add_medication(
            state,
            MedicationInput {
                name: "Ivabradine".into(),
                dosage: "5mg".into(),
                ..MedicationInput::default()
            },
        )
        .await
        .unwrap();
        medications::take_medication(state, med.id).await.unwrap();

        emergency::save_emergency_contacts(
            state,
            EmergencyContacts {
                contact_name: "Riley".into(),
                contact_phone: "555-0123".into(),
                ..EmergencyContacts::default()
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn backup_then_restore_reproduces_every_collection() {
        let (_dir, state) = open_state();
        let out = tempdir().unwrap();
        seed(&state).await;
        let before = state.store.snapshot().await.unwrap();

        let backup = backup_data(&state, out.path()).await.unwrap();
        assert_eq!(backup.records, 6);
        assert!(backup
            .path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("pots_backup_"));

        clear_all_data(&state).await.unwrap();
        assert_eq!(state.store.snapshot().await.unwrap(), Collections::default());

        let restored = restore_data(&state, &backup.path).await.unwrap();
        assert_eq!(restored, before);
        assert_eq!(state.store.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn restoring_a_partial_snapshot_empties_missing_collections() {
        let (_dir, state) = open_state();
        let out = tempdir().unwrap();
        seed(&state).await;

        let path = out.path().join("partial.json");
        fs::write(
            &path,
            r#"{"vitals": [], "medications": [{"id": 7, "name": "Salt tabs"}], "exportDate": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let restored = restore_data(&state, &path).await.unwrap();
        assert!(restored.symptoms.is_empty());
        assert_eq!(restored.medications.len(), 1);
        assert_eq!(restored.medications[0].name, "Salt tabs");
        assert!(state.store.snapshot().await.unwrap().symptoms.is_empty());
    }

    #[tokio::test]
    async fn malformed_backup_leaves_data_untouched() {
        let (_dir, state) = open_state();
        let out = tempdir().unwrap();
        seed(&state).await;
        let before = state.store.snapshot().await.unwrap();

        let path = out.path().join("broken.json");
        fs::write(&path, r#"{"vitals": "#).unwrap();

        let err = restore_data(&state, &path).await.unwrap_err();
        assert!(err.starts_with("Error restoring data. Please check the file."));
        assert_eq!(state.store.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn csv_export_writes_todays_rows() {
        let (_dir, state) = open_state();
        let out = tempdir().unwrap();
        seed(&state).await;

        let exported = export_csv(&state, Some(today()), Some(today()), out.path())
            .await
            .unwrap();
        assert_eq!(exported.records, 2);

        let text = fs::read_to_string(&exported.path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",standing,101,98,64,500,300"));
    }

    #[tokio::test]
    async fn csv_export_refuses_an_empty_range() {
        let (_dir, state) = open_state();
        let out = tempdir().unwrap();
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        let err = export_csv(&state, Some(day), Some(day), out.path())
            .await
            .unwrap_err();
        assert_eq!(err, "No data to export for selected period");

        let err = export_csv(&state, None, Some(day), out.path())
            .await
            .unwrap_err();
        assert_eq!(err, "Please enter start date");
    }
}
