//! User actions. Each command takes the shared `AppState`, runs to
//! completion, and reports failure as a message ready to show the user.

pub mod data;
pub mod emergency;
pub mod medications;
pub mod reports;
pub mod settings;
pub mod symptoms;
pub mod vitals;
