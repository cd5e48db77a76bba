use thiserror::Error;

/// Domain failures that callers are expected to handle or show to the user.
///
/// Plumbing failures (SQLite, file I/O) travel as plain `anyhow::Error`; these
/// variants are wrapped into `anyhow::Error` as well and can be recovered with
/// `downcast_ref::<TrackerError>()`.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Please enter {field}")]
    MissingInput { field: &'static str },

    #[error("Error restoring data. Please check the file. ({reason})")]
    ImportParse { reason: String },

    #[error("stored {collection} data is corrupt ({reason}); restore a backup or clear all data")]
    CorruptCollection {
        collection: &'static str,
        reason: String,
    },

    #[error("medication {id} not found")]
    MedicationNotFound { id: i64 },

    #[error("no medication id left after {max}; delete or restore medications with smaller ids")]
    MedicationIdExhausted { max: i64 },

    #[error("orthostatic test is not expecting that step (currently {state})")]
    WizardState { state: &'static str },

    #[error("No data to export for selected period")]
    NoDataInRange,
}

/// Returns the domain error carried by `err`, if any.
pub fn tracker_error(err: &anyhow::Error) -> Option<&TrackerError> {
    err.downcast_ref::<TrackerError>()
}
