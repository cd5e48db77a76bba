use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::reports::DailyTargets;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerSettings {
    pub sodium_target_mg: u32,
    pub fluid_target_ml: u32,
    /// Amount recorded by the quick "add water" action.
    pub quick_water_ml: u32,
    /// Standing minus lying heart rate at or above this is POTS-consistent.
    pub pots_threshold_bpm: i64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            sodium_target_mg: 8000,
            fluid_target_ml: 2500,
            quick_water_ml: 250,
            pots_threshold_bpm: 30,
        }
    }
}

impl TrackerSettings {
    pub fn daily_targets(&self) -> DailyTargets {
        DailyTargets {
            sodium_mg: self.sodium_target_mg,
            fluid_ml: self.fluid_target_ml,
        }
    }
}

/// Partial update; `None` leaves the current value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub sodium_target_mg: Option<u32>,
    pub fluid_target_ml: Option<u32>,
    pub quick_water_ml: Option<u32>,
    pub pots_threshold_bpm: Option<i64>,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<TrackerSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(
                    "Ignoring unreadable settings at {}: {err}",
                    path.display()
                );
                TrackerSettings::default()
            })
        } else {
            TrackerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn current(&self) -> TrackerSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update(&self, update: SettingsUpdate) -> Result<TrackerSettings> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;

        let mut next = guard.clone();
        if let Some(value) = update.sodium_target_mg {
            next.sodium_target_mg = value;
        }
        if let Some(value) = update.fluid_target_ml {
            next.fluid_target_ml = value;
        }
        if let Some(value) = update.quick_water_ml {
            next.quick_water_ml = value;
        }
        if let Some(value) = update.pots_threshold_bpm {
            next.pots_threshold_bpm = value;
        }

        self.persist(&next)?;
        *guard = next.clone();
        Ok(next)
    }

    fn persist(&self, data: &TrackerSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.current(), TrackerSettings::default());
        assert_eq!(store.current().daily_targets(), DailyTargets::default());
    }

    #[test]
    fn updates_persist_across_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let updated = store
            .update(SettingsUpdate {
                fluid_target_ml: Some(3000),
                ..SettingsUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.fluid_target_ml, 3000);
        assert_eq!(updated.sodium_target_mg, 8000);

        let reloaded = SettingsStore::new(path).unwrap();
        assert_eq!(reloaded.current().fluid_target_ml, 3000);
    }

    #[test]
    fn partial_and_broken_files_fall_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        fs::write(&path, r#"{"quickWaterMl": 500}"#).unwrap();
        let partial = SettingsStore::new(path.clone()).unwrap().current();
        assert_eq!(partial.quick_water_ml, 500);
        assert_eq!(partial.pots_threshold_bpm, 30);

        fs::write(&path, "not json").unwrap();
        let broken = SettingsStore::new(path).unwrap().current();
        assert_eq!(broken, TrackerSettings::default());
    }
}
