//! Staff domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumString};

use crate::collection::ResourceRecord;
use crate::error::{ConsoleError, Result};

/// Lifecycle status of a staff account.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StaffStatus {
    /// Missing `status` on the wire defaults to active.
    #[default]
    Active,
    Inactive,
}

/// A staff member as held in the client-side collection.
///
/// Wire mapping: the server sends Mongo-style `_id`; `status` may be absent
/// and defaults to [`StaffStatus::Active`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: StaffStatus,
}

impl ResourceRecord for StaffRecord {
    type Status = StaffStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_status(&mut self, status: StaffStatus) {
        self.status = status;
    }
}

/// Envelope of the staff list endpoint: `{ "staffs": [ .. ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffListPayload {
    #[serde(default)]
    pub staffs: Vec<StaffRecord>,
}

/// Ephemeral registration form state.
///
/// Component-local and not part of the resource model; cleared on submit
/// success, discarded on cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffDraft {
    pub name: String,
    pub role: String,
    pub email: String,
    pub password: String,
}

impl StaffDraft {
    /// Required-field check, run before any request is dispatched.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("role", &self.role),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ConsoleError::validation(field, "required"));
            }
        }
        Ok(())
    }

    /// Request body for the registration endpoint.
    pub fn payload(&self) -> Value {
        json!({
            "name": self.name,
            "role": self.role,
            "email": self.email,
            "password": self.password,
        })
    }

    /// Resets every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_mapping() {
        let record: StaffRecord = serde_json::from_str(
            r#"{"_id": "s1", "name": "Ada", "email": "ada@hospital.test", "role": "doctor"}"#,
        )
        .unwrap();
        assert_eq!(record.id, "s1");
        // Missing status defaults to active
        assert_eq!(record.status, StaffStatus::Active);
    }

    #[test]
    fn test_record_explicit_status() {
        let record: StaffRecord =
            serde_json::from_str(r#"{"_id": "s2", "status": "inactive"}"#).unwrap();
        assert_eq!(record.status, StaffStatus::Inactive);
        assert_eq!(record.status.to_string(), "inactive");
    }

    #[test]
    fn test_list_payload_envelope() {
        let payload: StaffListPayload =
            serde_json::from_str(r#"{"staffs": [{"_id": "a"}, {"_id": "b"}]}"#).unwrap();
        assert_eq!(payload.staffs.len(), 2);
    }

    #[test]
    fn test_draft_validate_rejects_missing_field() {
        let mut draft = StaffDraft {
            name: "Ada".to_string(),
            role: "doctor".to_string(),
            email: "ada@hospital.test".to_string(),
            password: String::new(),
        };
        let err = draft.validate().unwrap_err();
        assert!(err.is_validation());

        draft.password = "secret".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_clear_resets_to_empty_strings() {
        let mut draft = StaffDraft {
            name: "Ada".to_string(),
            role: "doctor".to_string(),
            email: "ada@hospital.test".to_string(),
            password: "secret".to_string(),
        };
        draft.clear();
        assert_eq!(draft, StaffDraft::default());
        assert_eq!(draft.name, "");
    }
}
