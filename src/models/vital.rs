use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{
    input::{optional_u32, required_u32},
    local_date,
};
use crate::error::TrackerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Sitting,
    Standing,
    Lying,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Sitting => "sitting",
            Position::Standing => "standing",
            Position::Lying => "lying",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sitting" => Ok(Position::Sitting),
            "standing" => Ok(Position::Standing),
            "lying" => Ok(Position::Lying),
            _ => Err(TrackerError::MissingInput { field: "position" }),
        }
    }
}

/// One vitals entry. Water shortcuts and orthostatic tests also land here with
/// zeros in the fields they do not measure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VitalReading {
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    pub position: Position,
    #[serde(deserialize_with = "null_as_zero")]
    pub heart_rate: u32,
    #[serde(deserialize_with = "null_as_zero")]
    pub systolic: u32,
    #[serde(deserialize_with = "null_as_zero")]
    pub diastolic: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub sodium: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub fluid: u32,
}

/// Browser-era backups store a blank numeric field as `null`; read it as 0.
fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

impl VitalReading {
    pub fn from_new(timestamp: DateTime<Utc>, vitals: NewVitals) -> Self {
        Self {
            timestamp,
            date: local_date(timestamp),
            position: vitals.position,
            heart_rate: vitals.heart_rate,
            systolic: vitals.systolic,
            diastolic: vitals.diastolic,
            sodium: vitals.sodium,
            fluid: vitals.fluid,
        }
    }

    pub fn water(timestamp: DateTime<Utc>, fluid_ml: u32) -> Self {
        Self::from_new(
            timestamp,
            NewVitals {
                position: Position::Sitting,
                fluid: fluid_ml,
                ..NewVitals::default()
            },
        )
    }

    pub fn orthostatic(timestamp: DateTime<Utc>, position: Position, heart_rate: u32) -> Self {
        Self::from_new(
            timestamp,
            NewVitals {
                position,
                heart_rate,
                ..NewVitals::default()
            },
        )
    }
}

/// Validated values for a manual vitals entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewVitals {
    pub position: Position,
    pub heart_rate: u32,
    pub systolic: u32,
    pub diastolic: u32,
    pub sodium: u32,
    pub fluid: u32,
}

/// Raw vitals form as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsInput {
    pub position: Position,
    pub heart_rate: String,
    pub systolic: String,
    pub diastolic: String,
    pub sodium: String,
    pub fluid: String,
}

impl VitalsInput {
    pub fn validate(&self) -> Result<NewVitals, TrackerError> {
        Ok(NewVitals {
            position: self.position,
            heart_rate: required_u32(&self.heart_rate, "heart rate")?,
            systolic: required_u32(&self.systolic, "systolic pressure")?,
            diastolic: required_u32(&self.diastolic, "diastolic pressure")?,
            sodium: optional_u32(&self.sodium, "sodium")?,
            fluid: optional_u32(&self.fluid, "fluid")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(hr: &str, sodium: &str) -> VitalsInput {
        VitalsInput {
            position: Position::Standing,
            heart_rate: hr.into(),
            systolic: "110".into(),
            diastolic: "70".into(),
            sodium: sodium.into(),
            fluid: String::new(),
        }
    }

    #[test]
    fn blank_optional_fields_become_zero() {
        let vitals = input("88", "").validate().unwrap();
        assert_eq!(vitals.heart_rate, 88);
        assert_eq!(vitals.sodium, 0);
        assert_eq!(vitals.fluid, 0);
        assert_eq!(vitals.position, Position::Standing);
    }

    #[test]
    fn null_numbers_from_old_backups_read_as_zero() {
        let reading: VitalReading = serde_json::from_str(
            r#"{"timestamp": "2024-05-01T08:30:00.000Z", "date": "2024-05-01",
                "position": "sitting", "heartRate": null, "systolic": null,
                "diastolic": 70, "sodium": null, "fluid": 250}"#,
        )
        .unwrap();
        assert_eq!(reading.heart_rate, 0);
        assert_eq!(reading.systolic, 0);
        assert_eq!(reading.diastolic, 70);
        assert_eq!(reading.sodium, 0);
        assert_eq!(reading.fluid, 250);

        let bad = serde_json::from_str::<VitalReading>(
            r#"{"timestamp": "2024-05-01T08:30:00.000Z", "date": "2024-05-01",
                "position": "sitting", "heartRate": "fast", "systolic": 1,
                "diastolic": 1, "sodium": 0, "fluid": 0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn missing_heart_rate_is_rejected() {
        let err = input("", "100").validate().unwrap_err();
        assert!(matches!(
            err,
            TrackerError::MissingInput { field: "heart rate" }
        ));
    }

    #[test]
    fn serializes_with_original_field_names() {
        let ts = DateTime::parse_from_rfc3339("2024-02-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut reading = VitalReading::water(ts, 250);
        reading.date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["position"], "sitting");
        assert_eq!(json["heartRate"], 0);
        assert_eq!(json["fluid"], 250);
        assert_eq!(json["date"], "2024-02-01");
    }

    #[test]
    fn position_parses_case_insensitively() {
        assert_eq!("Lying".parse::<Position>().unwrap(), Position::Lying);
        assert!("upside-down".parse::<Position>().is_err());
    }
}
