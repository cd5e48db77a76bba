use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use tokio::sync::Mutex;

use super::{OrthostaticResult, OrthostaticState};
use crate::{
    models::{input::positive_heart_rate, Position, VitalReading},
    store::RecordStore,
};

/// What the caller shows after the standing reading is accepted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrthostaticOutcome {
    pub result: OrthostaticResult,
    pub verdict: String,
    pub saved: Vec<VitalReading>,
}

/// Lying then standing reading, both stamped with the same instant so they
/// always share a calendar day.
fn test_readings(result: &OrthostaticResult, now: DateTime<Utc>) -> Vec<VitalReading> {
    vec![
        VitalReading::orthostatic(now, Position::Lying, result.lying_hr),
        VitalReading::orthostatic(now, Position::Standing, result.standing_hr),
    ]
}

#[derive(Clone)]
pub struct OrthostaticController {
    state: Arc<Mutex<OrthostaticState>>,
    store: RecordStore,
}

impl OrthostaticController {
    pub fn new(store: RecordStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(OrthostaticState::new())),
            store,
        }
    }

    pub async fn get_state(&self) -> OrthostaticState {
        self.state.lock().await.clone()
    }

    pub async fn start_test(&self) -> OrthostaticState {
        let mut guard = self.state.lock().await;
        guard.restart();
        guard.clone()
    }

    pub async fn submit_lying(&self, raw_heart_rate: &str) -> Result<OrthostaticState> {
        let heart_rate = positive_heart_rate(raw_heart_rate)?;
        let mut guard = self.state.lock().await;
        guard.record_lying(heart_rate)?;
        Ok(guard.clone())
    }

    /// Finishes the test: appends the lying and standing readings, then moves
    /// to `Complete`. If the write fails the wizard stays on the standing step.
    pub async fn submit_standing(
        &self,
        raw_heart_rate: &str,
        threshold: i64,
    ) -> Result<OrthostaticOutcome> {
        let heart_rate = positive_heart_rate(raw_heart_rate)?;
        let mut guard = self.state.lock().await;
        let result = guard.evaluate_standing(heart_rate, threshold)?;

        let saved = test_readings(&result, Utc::now());
        self.store.append(saved.clone()).await?;

        guard.complete(result);
        info!(
            "Orthostatic test complete: lying {} standing {} (delta {})",
            result.lying_hr, result.standing_hr, result.delta
        );

        Ok(OrthostaticOutcome {
            verdict: result.verdict(),
            result,
            saved,
        })
    }
}
