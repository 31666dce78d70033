//! Patient census view-model.
//!
//! Loads the patient list, admits new patients, and discharges patients
//! behind a confirmation gate. Unlike staff deactivation, a discharge
//! keeps the record visible and flips its status in place; the dashboard
//! stats are derived from the same collection.

use std::sync::Arc;

use hms_core::collection::{LoadState, MutationEffect};
use hms_core::confirm::ConfirmationGate;
use hms_core::error::{ConsoleError, Result};
use hms_core::feedback::Feedback;
use hms_core::gateway::ApiGateway;
use hms_core::patient::{PatientDraft, PatientRecord, PatientStatus};
use serde_json::json;

use crate::feedback::FeedbackSlot;
use crate::view::ResourceView;

const PATIENTS_PATH: &str = "/patients";
const DISCHARGE_PROMPT: &str = "Are you sure you want to discharge this patient?";

/// Derived dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CensusStats {
    /// Total patients in the visible collection.
    pub total: usize,
    /// Patients currently admitted.
    pub admitted: usize,
}

/// View-model over the server-owned patient collection.
pub struct PatientCensus {
    gateway: Arc<dyn ApiGateway>,
    view: ResourceView<PatientRecord>,
    feedback: FeedbackSlot,
}

impl PatientCensus {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            view: ResourceView::new(),
            feedback: FeedbackSlot::new(),
        }
    }

    /// Refreshes the patient collection from the server.
    ///
    /// The endpoint returns a bare array. Failure preserves the last good
    /// collection; a response superseded by a newer load is discarded.
    pub async fn load(&self) -> Vec<PatientRecord> {
        let seq = self.view.begin_load();
        match self.gateway.get(PATIENTS_PATH).await {
            Ok(value) => match serde_json::from_value::<Vec<PatientRecord>>(value) {
                Ok(records) => {
                    if !self.view.finish_load_success(seq, records) {
                        tracing::debug!(target: "patient", "Discarded stale patient list response");
                    }
                }
                Err(err) => {
                    tracing::warn!(target: "patient", "Malformed patient list payload: {}", err);
                    self.view.finish_load_failure(seq);
                    self.feedback.error("Failed to fetch patient data.");
                }
            },
            Err(err) => {
                tracing::warn!(target: "patient", "Failed to fetch patient data: {}", err);
                self.view.finish_load_failure(seq);
                self.feedback.error("Failed to fetch patient data.");
            }
        }
        self.patients()
    }

    /// Admits a new patient.
    ///
    /// The draft is validated and its `age` coerced to a number before
    /// dispatch; it is cleared only on success. The created record is
    /// prepended so the newest admission shows first.
    pub async fn admit(&self, draft: &mut PatientDraft) -> Result<PatientRecord> {
        let payload = match draft.validate().and_then(|()| draft.payload()) {
            Ok(payload) => payload,
            Err(err) => {
                self.feedback.error(err.to_string());
                return Err(err);
            }
        };

        let outcome = self
            .gateway
            .post(PATIENTS_PATH, payload)
            .await
            .and_then(|value| {
                serde_json::from_value::<PatientRecord>(value).map_err(ConsoleError::from)
            });

        match outcome {
            Ok(record) => {
                self.view.prepend(record.clone());
                self.feedback.success("Patient added successfully.");
                draft.clear();
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(target: "patient", "Admission failed: {}", err);
                self.feedback.error(
                    err.api_message()
                        .unwrap_or("Failed to add patient. Please check the data and try again."),
                );
                Err(err)
            }
        }
    }

    /// Discharges a patient after an explicit confirmation.
    ///
    /// Returns `Ok(false)` when the gate declines: no request is made and
    /// nothing changes. On success the record stays in the collection with
    /// its status patched to discharged; on failure the collection is
    /// untouched and a status-specific guidance message is surfaced.
    pub async fn discharge(&self, id: &str, gate: &dyn ConfirmationGate) -> Result<bool> {
        if !gate.confirm(DISCHARGE_PROMPT) {
            return Ok(false);
        }

        let path = format!("{}/{}", PATIENTS_PATH, id);
        let body = json!({"status": PatientStatus::Discharged});
        match self.gateway.put(&path, body).await {
            Ok(_) => {
                self.view
                    .apply(id, MutationEffect::Patch(PatientStatus::Discharged));
                self.feedback.success("Patient discharged successfully.");
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(target: "patient", "Discharge failed for {}: {}", id, err);
                self.feedback.error(discharge_error_message(&err));
                Err(err)
            }
        }
    }

    /// Snapshot of the visible patient collection.
    pub fn patients(&self) -> Vec<PatientRecord> {
        self.view.records()
    }

    /// Counts rendered on the dashboard.
    pub fn stats(&self) -> CensusStats {
        let records = self.view.records();
        CensusStats {
            total: records.len(),
            admitted: records
                .iter()
                .filter(|patient| patient.status == PatientStatus::Admitted)
                .count(),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.view.load_state()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback.current()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.view.contains_id(id)
    }
}

fn discharge_error_message(err: &ConsoleError) -> String {
    match err.status() {
        Some(404) => {
            "Endpoint or patient record not found. The discharge route may differ on the server."
                .to_string()
        }
        Some(405) => "Method not allowed. The server might expect PATCH instead of PUT.".to_string(),
        _ => err
            .api_message()
            .unwrap_or("Failed to discharge patient. Please try again.")
            .to_string(),
    }
}
