use chrono::Utc;
use log::{info, warn};

use crate::{
    error::TrackerError,
    models::{medication::next_medication_id, today, Medication, MedicationInput, MedicationLogEntry},
    AppState,
};

pub async fn add_medication(
    state: &AppState,
    input: MedicationInput,
) -> Result<Medication, String> {
    let mut medications = state
        .store
        .read::<Medication>()
        .await
        .map_err(|e| e.to_string())?;

    let id = next_medication_id(&medications, Utc::now()).map_err(|e| e.to_string())?;
    let medication = input.into_medication(id).map_err(|e| e.to_string())?;
    medications.push(medication.clone());

    state
        .store
        .write(&medications)
        .await
        .map_err(|e| e.to_string())?;

    info!("Added medication {} ({})", medication.name, medication.id);
    Ok(medication)
}

pub async fn list_medications(state: &AppState) -> Result<Vec<Medication>, String> {
    state
        .store
        .read::<Medication>()
        .await
        .map_err(|e| e.to_string())
}

/// Logs a dose of `id`, copying the medication's current name into the entry.
pub async fn take_medication(state: &AppState, id: i64) -> Result<MedicationLogEntry, String> {
    let medications = state
        .store
        .read::<Medication>()
        .await
        .map_err(|e| e.to_string())?;

    let Some(medication) = medications.iter().find(|m| m.id == id) else {
        warn!("Tried to log a dose for unknown medication {id}");
        return Err(TrackerError::MedicationNotFound { id }.to_string());
    };

    let entry = MedicationLogEntry::taken(medication, Utc::now());
    state
        .store
        .append(vec![entry.clone()])
        .await
        .map_err(|e| e.to_string())?;

    info!("Logged dose of {}", entry.name);
    Ok(entry)
}

/// Removes the medication. Doses already logged for it stay in the log.
pub async fn delete_medication(state: &AppState, id: i64) -> Result<(), String> {
    let removed = state
        .store
        .retain::<Medication, _>(|m| m.id != id)
        .await
        .map_err(|e| e.to_string())?;

    if removed == 0 {
        return Err(TrackerError::MedicationNotFound { id }.to_string());
    }
    info!("Deleted medication {id}");
    Ok(())
}

/// Today's doses, newest first.
pub async fn get_today_med_log(state: &AppState) -> Result<Vec<MedicationLogEntry>, String> {
    let log = state
        .store
        .read::<MedicationLogEntry>()
        .await
        .map_err(|e| e.to_string())?;
    let today = today();
    Ok(log.into_iter().rev().filter(|m| m.date == today).collect())
}
