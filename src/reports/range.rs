use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Dated, VitalAverages};
use crate::{models::format_date, store::Collections};

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn filter<'a, R: Dated>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.contains(r.date())).collect()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RangeReport {
    pub range: DateRange,
    pub generated_on: NaiveDate,
    pub vitals_count: usize,
    pub averages: Option<VitalAverages>,
    pub symptom_logs: usize,
    pub doses_taken: usize,
}

pub fn range_report(
    collections: &Collections,
    range: DateRange,
    generated_on: NaiveDate,
) -> RangeReport {
    let vitals = range.filter(&collections.vitals);

    RangeReport {
        range,
        generated_on,
        vitals_count: vitals.len(),
        averages: VitalAverages::of(vitals.iter().copied()),
        symptom_logs: range.filter(&collections.symptoms).len(),
        doses_taken: range.filter(&collections.med_log).len(),
    }
}

impl RangeReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "POTS HEALTH REPORT");
        let _ = writeln!(
            out,
            "Period: {} to {}",
            format_date(self.range.start),
            format_date(self.range.end)
        );
        let _ = writeln!(out, "Generated: {}", format_date(self.generated_on));
        let _ = writeln!(out);

        let _ = writeln!(out, "VITAL SIGNS SUMMARY");
        let _ = writeln!(out, "Total Readings: {}", self.vitals_count);
        if let Some(avg) = self.averages {
            let _ = writeln!(out, "Average HR: {} BPM", avg.heart_rate);
            let _ = writeln!(out, "Average BP: {}/{} mmHg", avg.systolic, avg.diastolic);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "SYMPTOMS");
        let _ = writeln!(out, "Total Symptom Logs: {}", self.symptom_logs);

        let _ = writeln!(out);
        let _ = writeln!(out, "MEDICATIONS");
        let _ = writeln!(out, "Doses Taken: {}", self.doses_taken);
        out
    }
}
