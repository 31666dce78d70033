//! Staff domain module.
//!
//! - `model`: staff records, status enum, registration draft

mod model;

pub use model::{StaffDraft, StaffListPayload, StaffRecord, StaffStatus};
