//! Patient domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::Display;

use crate::collection::ResourceRecord;
use crate::error::{ConsoleError, Result};

/// Admission status of a patient.
///
/// The backend owns the full status vocabulary; anything the client does
/// not recognize deserializes as `Unknown` instead of failing the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(serialize_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Admitted,
    Discharged,
    Unknown,
}

impl From<String> for PatientStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admitted" => Self::Admitted,
            "discharged" => Self::Discharged,
            _ => Self::Unknown,
        }
    }
}

/// A patient as held in the client-side collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub medical_ward: String,
    #[serde(default)]
    pub admission_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: PatientStatus,
}

impl ResourceRecord for PatientRecord {
    type Status = PatientStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_status(&mut self, status: PatientStatus) {
        self.status = status;
    }
}

/// Ephemeral admission form state.
///
/// `age` stays a string while the form is being edited and is coerced to a
/// number at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub contact: String,
    pub email: String,
    pub medical_ward: String,
    pub password: String,
}

impl PatientDraft {
    /// Required-field and age-coercion check, run before dispatch.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("age", &self.age),
            ("gender", &self.gender),
            ("contact", &self.contact),
            ("email", &self.email),
            ("medicalWard", &self.medical_ward),
        ] {
            if value.trim().is_empty() {
                return Err(ConsoleError::validation(field, "required"));
            }
        }
        self.parsed_age()?;
        Ok(())
    }

    /// Request body for the create endpoint, with `age` as a number.
    pub fn payload(&self) -> Result<Value> {
        Ok(json!({
            "name": self.name,
            "age": self.parsed_age()?,
            "gender": self.gender,
            "contact": self.contact,
            "email": self.email,
            "medicalWard": self.medical_ward,
            "password": self.password,
        }))
    }

    fn parsed_age(&self) -> Result<u32> {
        self.age
            .trim()
            .parse::<u32>()
            .map_err(|_| ConsoleError::validation("age", "must be a number"))
    }

    /// Resets every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
