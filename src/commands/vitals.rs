use chrono::Utc;
use log::info;

use crate::{
    models::{today, VitalReading, VitalsInput},
    AppState,
};

pub async fn log_vitals(state: &AppState, input: VitalsInput) -> Result<VitalReading, String> {
    let vitals = input.validate().map_err(|e| e.to_string())?;
    let reading = VitalReading::from_new(Utc::now(), vitals);

    state
        .store
        .append(vec![reading.clone()])
        .await
        .map_err(|e| e.to_string())?;

    info!(
        "Logged vitals: {} HR {} BP {}/{}",
        reading.position, reading.heart_rate, reading.systolic, reading.diastolic
    );
    Ok(reading)
}

/// Quick "add a glass of water" entry using the configured amount.
pub async fn add_water(state: &AppState) -> Result<VitalReading, String> {
    let amount = state.settings.current().quick_water_ml;
    let reading = VitalReading::water(Utc::now(), amount);

    state
        .store
        .append(vec![reading.clone()])
        .await
        .map_err(|e| e.to_string())?;

    info!("Added {amount}ml of water");
    Ok(reading)
}

/// Today's readings, newest first.
pub async fn get_today_vitals(state: &AppState) -> Result<Vec<VitalReading>, String> {
    let vitals = state
        .store
        .read::<VitalReading>()
        .await
        .map_err(|e| e.to_string())?;
    let today = today();
    Ok(vitals.into_iter().rev().filter(|v| v.date == today).collect())
}
