use crate::{
    models::{format_time, VitalReading},
    reports::DateRange,
};

pub const CSV_HEADER: &str = "Date,Time,Position,Heart Rate,Systolic,Diastolic,Sodium,Fluid";

pub fn csv_file_name(range: DateRange) -> String {
    format!("pots_data_{}_to_{}.csv", range.start, range.end)
}

/// Vitals in `range`, one row per reading in store order. Fields are numeric
/// or fixed words, so nothing is quoted.
pub fn vitals_csv(vitals: &[VitalReading], range: DateRange) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + vitals.len() * 48);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for v in range.filter(vitals) {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            v.date,
            format_time(v.timestamp),
            v.position,
            v.heart_rate,
            v.systolic,
            v.diastolic,
            v.sodium,
            v.fluid
        ));
    }

    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{at, day, on_date, vitals_at};

    #[test]
    fn data_rows_match_readings_in_range() {
        let vitals = vec![
            on_date(vitals_at(at(0), 70, 0, 0), day(2024, 2, 28)),
            on_date(vitals_at(at(1), 72, 500, 0), day(2024, 3, 1)),
            on_date(vitals_at(at(2), 74, 0, 250), day(2024, 3, 5)),
            on_date(vitals_at(at(3), 76, 0, 0), day(2024, 3, 6)),
        ];
        let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 5));

        let csv = vitals_csv(&vitals, range);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len() - 1, range.filter(&vitals).len());
        assert_eq!(lines.len() - 1, 2);

        let first: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(first.len(), 8);
        assert_eq!(first[0], "2024-03-01");
        assert_eq!(first[1], format_time(at(1)));
        assert_eq!(&first[2..], ["sitting", "72", "107", "63", "500", "0"]);
    }

    #[test]
    fn empty_range_is_header_only() {
        let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 5));
        assert_eq!(vitals_csv(&[], range), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn file_name_carries_both_dates() {
        let range = DateRange::new(day(2024, 3, 1), day(2024, 3, 5));
        assert_eq!(csv_file_name(range), "pots_data_2024-03-01_to_2024-03-05.csv");
    }
}
