//! Typed records for the five stored collections, plus the input forms that
//! turn raw user entries into records.

pub mod contact;
pub mod input;
pub mod medication;
pub mod symptom;
pub mod vital;

pub use contact::{EmergencyAlert, EmergencyContacts};
pub use medication::{Medication, MedicationInput, MedicationLogEntry};
pub use symptom::{SymptomEntry, SymptomForm};
pub use vital::{NewVitals, Position, VitalReading, VitalsInput};

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Local calendar day of an instant. Every record's `date` comes from here.
pub fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

pub fn today() -> NaiveDate {
    local_date(Utc::now())
}

/// `09:05 AM` style wall-clock time in the local zone.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%I:%M %p").to_string()
}

/// `Jan 5, 2024` style date.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn local_date_follows_local_zone() {
        let local = Local.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        let utc = local.with_timezone(&Utc);
        assert_eq!(
            local_date(utc),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn dates_render_like_the_report_header() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");
    }

    #[test]
    fn times_use_twelve_hour_clock() {
        let local = Local.with_ymd_and_hms(2024, 1, 5, 14, 7, 0).unwrap();
        assert_eq!(format_time(local.with_timezone(&Utc)), "02:07 PM");
    }
}
