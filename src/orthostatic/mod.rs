pub mod commands;
pub mod controller;
pub mod state;

pub use controller::{OrthostaticController, OrthostaticOutcome};
pub use state::{Classification, OrthostaticResult, OrthostaticState, TestStep};
