use log::{info, warn};

use crate::{
    models::{EmergencyAlert, EmergencyContacts},
    AppState,
};

pub async fn save_emergency_contacts(
    state: &AppState,
    contacts: EmergencyContacts,
) -> Result<EmergencyContacts, String> {
    let contacts = contacts.trimmed();
    state
        .store
        .write(&[contacts.clone()])
        .await
        .map_err(|e| e.to_string())?;

    info!("Saved emergency contacts");
    Ok(contacts)
}

pub async fn get_emergency_contacts(
    state: &AppState,
) -> Result<Option<EmergencyContacts>, String> {
    let contacts = state
        .store
        .read::<EmergencyContacts>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(contacts.into_iter().next())
}

/// Builds the alert for the saved contacts. Placing the call is up to the caller.
pub async fn trigger_emergency(state: &AppState) -> Result<EmergencyAlert, String> {
    let contacts = get_emergency_contacts(state).await?;
    if contacts.is_none() {
        warn!("Emergency triggered with no contacts configured");
    }
    Ok(EmergencyAlert::for_contacts(contacts.as_ref()))
}
