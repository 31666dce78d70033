//! Patient domain module.
//!
//! - `model`: patient records, status enum, admission draft

mod model;

pub use model::{PatientDraft, PatientRecord, PatientStatus};
