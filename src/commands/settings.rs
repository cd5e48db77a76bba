use log::info;

use crate::{
    settings::{SettingsUpdate, TrackerSettings},
    AppState,
};

pub fn get_settings(state: &AppState) -> Result<TrackerSettings, String> {
    Ok(state.settings.current())
}

pub fn update_settings(
    state: &AppState,
    update: SettingsUpdate,
) -> Result<TrackerSettings, String> {
    let settings = state.settings.update(update).map_err(|e| e.to_string())?;
    info!("Updated settings: {settings:?}");
    Ok(settings)
}
