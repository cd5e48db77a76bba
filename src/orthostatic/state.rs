use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TestStep {
    #[default]
    AwaitingLying,
    AwaitingStanding,
    Complete,
}

impl TestStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStep::AwaitingLying => "awaiting lying heart rate",
            TestStep::AwaitingStanding => "awaiting standing heart rate",
            TestStep::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    PotsConsistent,
    Normal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrthostaticResult {
    pub lying_hr: u32,
    pub standing_hr: u32,
    /// Standing minus lying; negative when the heart rate dropped.
    pub delta: i64,
    pub threshold: i64,
    pub classification: Classification,
}

impl OrthostaticResult {
    pub fn classify(lying_hr: u32, standing_hr: u32, threshold: i64) -> Self {
        let delta = i64::from(standing_hr) - i64::from(lying_hr);
        let classification = if delta >= threshold {
            Classification::PotsConsistent
        } else {
            Classification::Normal
        };
        Self {
            lying_hr,
            standing_hr,
            delta,
            threshold,
            classification,
        }
    }

    pub fn verdict(&self) -> String {
        match self.classification {
            Classification::PotsConsistent => {
                format!("Meets POTS criteria (≥{} BPM increase)", self.threshold)
            }
            Classification::Normal => "Normal response".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrthostaticState {
    pub step: TestStep,
    pub lying_hr: Option<u32>,
    pub result: Option<OrthostaticResult>,
}

impl OrthostaticState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first step. Readings already saved are not touched.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn record_lying(&mut self, heart_rate: u32) -> Result<(), TrackerError> {
        if self.step != TestStep::AwaitingLying {
            return Err(TrackerError::WizardState {
                state: self.step.as_str(),
            });
        }
        self.lying_hr = Some(heart_rate);
        self.step = TestStep::AwaitingStanding;
        Ok(())
    }

    /// Computes the result without changing state; `complete` commits it.
    pub fn evaluate_standing(
        &self,
        heart_rate: u32,
        threshold: i64,
    ) -> Result<OrthostaticResult, TrackerError> {
        match (self.step, self.lying_hr) {
            (TestStep::AwaitingStanding, Some(lying)) => {
                Ok(OrthostaticResult::classify(lying, heart_rate, threshold))
            }
            _ => Err(TrackerError::WizardState {
                state: self.step.as_str(),
            }),
        }
    }

    pub fn complete(&mut self, result: OrthostaticResult) {
        self.step = TestStep::Complete;
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_uses_inclusive_threshold() {
        let pots = OrthostaticResult::classify(60, 95, 30);
        assert_eq!(pots.delta, 35);
        assert_eq!(pots.classification, Classification::PotsConsistent);
        assert_eq!(pots.verdict(), "Meets POTS criteria (≥30 BPM increase)");

        let normal = OrthostaticResult::classify(60, 80, 30);
        assert_eq!(normal.delta, 20);
        assert_eq!(normal.classification, Classification::Normal);

        let edge = OrthostaticResult::classify(60, 90, 30);
        assert_eq!(edge.classification, Classification::PotsConsistent);

        let drop = OrthostaticResult::classify(80, 70, 30);
        assert_eq!(drop.delta, -10);
        assert_eq!(drop.classification, Classification::Normal);
    }

    #[test]
    fn steps_advance_linearly() {
        let mut state = OrthostaticState::new();
        assert!(state.evaluate_standing(90, 30).is_err());

        state.record_lying(62).unwrap();
        assert_eq!(state.step, TestStep::AwaitingStanding);
        assert!(state.record_lying(64).is_err());

        let result = state.evaluate_standing(100, 30).unwrap();
        assert_eq!(state.step, TestStep::AwaitingStanding);
        state.complete(result);
        assert_eq!(state.step, TestStep::Complete);
        assert_eq!(state.result.unwrap().delta, 38);

        state.restart();
        assert_eq!(state, OrthostaticState::default());
    }
}
