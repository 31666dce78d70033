//! Staff directory view-model.
//!
//! Mediates between the admin panel's actions and the gateway: loads the
//! staff list, registers new staff, and deactivates accounts behind a
//! confirmation gate. A successful deactivation projects as disappearance
//! from the visible list, not as a status flip.

use std::sync::Arc;

use hms_core::collection::{LoadState, MutationEffect};
use hms_core::confirm::ConfirmationGate;
use hms_core::error::{ConsoleError, Result};
use hms_core::feedback::Feedback;
use hms_core::gateway::ApiGateway;
use hms_core::staff::{StaffDraft, StaffListPayload, StaffRecord};

use crate::feedback::FeedbackSlot;
use crate::view::ResourceView;

const LIST_PATH: &str = "/auth/staffs-list";
const REGISTER_PATH: &str = "/auth/register";
const DEACTIVATE_PROMPT: &str = "Are you sure you want to deactivate this user?";

/// View-model over the server-owned staff collection.
pub struct StaffDirectory {
    gateway: Arc<dyn ApiGateway>,
    view: ResourceView<StaffRecord>,
    feedback: FeedbackSlot,
}

impl StaffDirectory {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            view: ResourceView::new(),
            feedback: FeedbackSlot::new(),
        }
    }

    /// Refreshes the staff collection from the server.
    ///
    /// On failure the last good collection is preserved and an error
    /// feedback is emitted; a response superseded by a newer load is
    /// discarded. Returns the collection visible after the call.
    pub async fn load(&self) -> Vec<StaffRecord> {
        let seq = self.view.begin_load();
        match self.gateway.get(LIST_PATH).await {
            Ok(value) => match serde_json::from_value::<StaffListPayload>(value) {
                Ok(payload) => {
                    if !self.view.finish_load_success(seq, payload.staffs) {
                        tracing::debug!(target: "staff", "Discarded stale staff list response");
                    }
                }
                Err(err) => {
                    tracing::warn!(target: "staff", "Malformed staff list payload: {}", err);
                    self.view.finish_load_failure(seq);
                    self.feedback.error("Failed to load staff list.");
                }
            },
            Err(err) => {
                tracing::warn!(target: "staff", "Failed to load staff list: {}", err);
                self.view.finish_load_failure(seq);
                self.feedback.error("Failed to load staff list.");
            }
        }
        self.staffs()
    }

    /// Registers a new staff member.
    ///
    /// The draft is validated before dispatch and cleared only on success;
    /// the created record is prepended so the newest entry shows first.
    pub async fn register(&self, draft: &mut StaffDraft) -> Result<StaffRecord> {
        if let Err(err) = draft.validate() {
            self.feedback.error(err.to_string());
            return Err(err);
        }

        let outcome = self
            .gateway
            .post(REGISTER_PATH, draft.payload())
            .await
            .and_then(|value| {
                serde_json::from_value::<StaffRecord>(value).map_err(ConsoleError::from)
            });

        match outcome {
            Ok(record) => {
                self.view.prepend(record.clone());
                self.feedback.success("Staff member successfully registered!");
                draft.clear();
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(target: "staff", "Registration failed: {}", err);
                self.feedback
                    .error(err.api_message().unwrap_or("Registration failed."));
                Err(err)
            }
        }
    }

    /// Deactivates a staff account after an explicit confirmation.
    ///
    /// Returns `Ok(false)` when the gate declines: no request is made and
    /// nothing changes. On success the record is removed from the visible
    /// collection; on failure the collection is untouched and a
    /// status-specific guidance message is surfaced.
    pub async fn deactivate(&self, id: &str, gate: &dyn ConfirmationGate) -> Result<bool> {
        if !gate.confirm(DEACTIVATE_PROMPT) {
            return Ok(false);
        }

        let path = format!("/auth/staffs/{}/deactivate", id);
        match self.gateway.patch(&path).await {
            Ok(_) => {
                self.view.apply(id, MutationEffect::Remove);
                self.feedback
                    .success("Staff member deactivated successfully.");
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(target: "staff", "Deactivation failed for {}: {}", id, err);
                self.feedback.error(deactivation_error_message(&err));
                Err(err)
            }
        }
    }

    /// Snapshot of the visible staff collection.
    pub fn staffs(&self) -> Vec<StaffRecord> {
        self.view.records()
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

fn deactivation_error_message(err: &ConsoleError) -> String {
    match err.status() {
        Some(404) => {
            "Endpoint not found. Try changing '/staffs' to '/staffs-list' in the URL.".to_string()
        }
        Some(405) => {
            "Method not allowed. The server might expect POST instead of PATCH.".to_string()
        }
        _ => err
            .api_message()
            .unwrap_or("Failed to deactivate staff member.")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockGateway, RecordingGate};
    use hms_core::gateway::Method;
    use hms_core::staff::StaffStatus;
    use serde_json::json;

    fn directory() -> (Arc<MockGateway>, StaffDirectory) {
        let gateway = Arc::new(MockGateway::new());
        let directory = StaffDirectory::new(gateway.clone());
        (gateway, directory)
    }

    fn draft() -> StaffDraft {
        StaffDraft {
            name: "Ada".to_string(),
            role: "doctor".to_string(),
            email: "ada@hospital.test".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_maps_wire_records_in_server_order() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({
            "staffs": [
                {"_id": "s1", "name": "Ada", "email": "a@h.test", "role": "doctor"},
                {"_id": "s2", "name": "Bea", "email": "b@h.test", "role": "nurse",
                 "status": "inactive"},
                {"_id": "s1", "name": "Duplicate", "email": "", "role": ""}
            ]
        }));

        let staffs = directory.load().await;
        let ids: Vec<&str> = staffs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        assert_eq!(staffs[0].status, StaffStatus::Active);
        assert_eq!(staffs[1].status, StaffStatus::Inactive);
        assert_eq!(directory.load_state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_failed_reload_preserves_last_good_collection() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1"}, {"_id": "s2"}]}));
        directory.load().await;
        assert_eq!(directory.staffs().len(), 2);

        gateway.push_err(ConsoleError::network("connection refused"));
        let staffs = directory.load().await;
        assert_eq!(staffs.len(), 2);
        assert_eq!(directory.load_state(), LoadState::Ready);
        assert!(directory.feedback().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_first_load_failure_shows_empty_collection() {
        let (gateway, directory) = directory();
        gateway.push_err(ConsoleError::api(500, "boom"));

        let staffs = directory.load().await;
        assert!(staffs.is_empty());
        assert_eq!(directory.load_state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_register_prepends_and_clears_draft() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1"}]}));
        directory.load().await;

        gateway.push_ok(json!({"_id": "s9", "name": "Ada", "role": "doctor"}));
        let mut form = draft();
        let record = directory.register(&mut form).await.unwrap();

        assert_eq!(record.id, "s9");
        assert_eq!(directory.staffs()[0].id, "s9");
        assert_eq!(form, StaffDraft::default());
        assert!(!directory.feedback().unwrap().is_error());

        let requests = gateway.requests();
        let register = &requests[1];
        assert_eq!(register.method, Method::POST);
        assert_eq!(register.path, "/auth/register");
        assert_eq!(register.body.as_ref().unwrap()["name"], "Ada");
    }

    #[tokio::test]
    async fn test_register_failure_keeps_collection_and_draft() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1"}]}));
        directory.load().await;

        gateway.push_err(ConsoleError::api(409, "Email already registered"));
        let mut form = draft();
        let err = directory.register(&mut form).await.unwrap_err();

        assert_eq!(err.status(), Some(409));
        assert_eq!(directory.staffs().len(), 1);
        assert_eq!(form, draft());
        assert_eq!(
            directory.feedback().unwrap().message,
            "Email already registered"
        );
    }

    #[tokio::test]
    async fn test_register_validation_blocks_dispatch() {
        let (gateway, directory) = directory();
        let mut form = draft();
        form.email = String::new();

        let err = directory.register(&mut form).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_declined_confirmation_makes_no_request() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1"}]}));
        directory.load().await;
        let before = gateway.request_count();

        let gate = RecordingGate::declining();
        let performed = directory.deactivate("s1", &gate).await.unwrap();

        assert!(!performed);
        assert_eq!(gateway.request_count(), before);
        assert!(directory.contains("s1"));
        assert_eq!(gate.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_deactivation_removes_record_from_visible_list() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1"}, {"_id": "s2"}]}));
        directory.load().await;

        gateway.push_ok(json!(null));
        let gate = RecordingGate::confirming();
        assert!(directory.deactivate("s1", &gate).await.unwrap());

        assert!(!directory.contains("s1"));
        assert!(directory.contains("s2"));
        assert!(!directory.feedback().unwrap().is_error());

        let requests = gateway.requests();
        let deactivate = requests.last().unwrap();
        assert_eq!(deactivate.method, Method::PATCH);
        assert_eq!(deactivate.path, "/auth/staffs/s1/deactivate");
    }

    #[tokio::test]
    async fn test_failed_deactivation_leaves_collection_unchanged() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1", "status": "active"}]}));
        directory.load().await;

        gateway.push_err(ConsoleError::api(500, "database on fire"));
        let gate = RecordingGate::confirming();
        let err = directory.deactivate("s1", &gate).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(directory.contains("s1"));
        assert_eq!(directory.staffs()[0].status, StaffStatus::Active);
        assert_eq!(directory.feedback().unwrap().message, "database on fire");
    }

    #[tokio::test]
    async fn test_deactivation_404_surfaces_endpoint_guidance() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1"}]}));
        directory.load().await;

        gateway.push_err(ConsoleError::api_from_status(404, None));
        let gate = RecordingGate::confirming();
        directory.deactivate("s1", &gate).await.unwrap_err();

        let message = directory.feedback().unwrap().message;
        assert!(message.contains("Endpoint not found"));
        assert!(message.contains("staffs-list"));
    }

    #[tokio::test]
    async fn test_deactivation_405_surfaces_method_guidance() {
        let (gateway, directory) = directory();
        gateway.push_ok(json!({"staffs": [{"_id": "s1"}]}));
        directory.load().await;

        gateway.push_err(ConsoleError::api_from_status(405, None));
        let gate = RecordingGate::confirming();
        directory.deactivate("s1", &gate).await.unwrap_err();

        let message = directory.feedback().unwrap().message;
        assert!(message.contains("Method not allowed"));
        assert!(message.contains("POST"));
    }
}
