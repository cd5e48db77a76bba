//! Derived views over the stored collections. Everything here is pure: the
//! caller loads the collections and passes slices in.

pub mod activity;
pub mod daily;
pub mod history;
pub mod range;
pub mod weekly;

pub use activity::{recent_activity, ActivityItem, ActivityKind, FEED_LIMIT};
pub use daily::{daily_summary, CurrentReading, DailySummary, DailyTargets};
pub use history::{day_history, DayHistory};
pub use range::{range_report, DateRange, RangeReport};
pub use weekly::{adherence_percent, weekly_summary, WeeklySummary};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{MedicationLogEntry, SymptomEntry, VitalReading};

/// Records carrying both an instant and the calendar day it fell on.
pub trait Dated {
    fn timestamp(&self) -> DateTime<Utc>;
    fn date(&self) -> NaiveDate;
}

impl Dated for VitalReading {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for SymptomEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for MedicationLogEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VitalAverages {
    pub heart_rate: u32,
    pub systolic: u32,
    pub diastolic: u32,
}

impl VitalAverages {
    /// Rounded means over `readings`, or `None` when there are none.
    pub fn of<'a, I>(readings: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a VitalReading>,
    {
        let (mut count, mut hr, mut sys, mut dia) = (0u64, 0u64, 0u64, 0u64);
        for reading in readings {
            count += 1;
            hr += u64::from(reading.heart_rate);
            sys += u64::from(reading.systolic);
            dia += u64::from(reading.diastolic);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            heart_rate: rounded_ratio(hr, count) as u32,
            systolic: rounded_ratio(sys, count) as u32,
            diastolic: rounded_ratio(dia, count) as u32,
        })
    }
}

/// `numerator / denominator` rounded half-up. `denominator` must be non-zero.
pub(crate) fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, NaiveDate, Utc};

    use crate::models::{
        local_date, Medication, MedicationLogEntry, NewVitals, Position, SymptomEntry,
        SymptomForm, VitalReading,
    };

    pub fn base() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    pub fn at(hours: i64) -> DateTime<Utc> {
        base() + Duration::hours(hours)
    }

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn vitals_at(ts: DateTime<Utc>, hr: u32, sodium: u32, fluid: u32) -> VitalReading {
        VitalReading::from_new(
            ts,
            NewVitals {
                position: Position::Sitting,
                heart_rate: hr,
                systolic: 100 + hr / 10,
                diastolic: 60 + hr / 20,
                sodium,
                fluid,
            },
        )
    }

    pub fn on_date(mut reading: VitalReading, date: NaiveDate) -> VitalReading {
        reading.date = date;
        reading
    }

    pub fn symptoms_at(ts: DateTime<Utc>) -> SymptomEntry {
        let mut form = SymptomForm::new();
        form.select("dizziness", 2);
        form.to_entry(ts)
    }

    pub fn dose_at(ts: DateTime<Utc>, name: &str) -> MedicationLogEntry {
        MedicationLogEntry {
            id: 1,
            name: name.into(),
            timestamp: ts,
            date: local_date(ts),
        }
    }

    pub fn medication(id: i64, name: &str) -> Medication {
        Medication {
            id,
            name: name.into(),
            dosage: "5mg".into(),
            frequency: "daily".into(),
            times: "morning".into(),
        }
    }
}
