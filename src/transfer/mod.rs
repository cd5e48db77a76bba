//! File-shaped views of the store: CSV export of vitals and the JSON
//! backup/restore snapshot.

pub mod backup;
pub mod csv;

pub use backup::{backup_file_name, backup_json, parse_backup};
pub use csv::{csv_file_name, vitals_csv, CSV_HEADER};
