//! Transient user feedback.
//!
//! Success and error messages surfaced after an operation. A feedback
//! message auto-expires after a fixed window regardless of user action;
//! the application layer owns the timer (see the feedback slot there).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed lifetime of a feedback message, in seconds.
pub const FEEDBACK_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

/// A short-lived message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Feedback {
    /// Creates a feedback message expiring after the given window.
    pub fn new(kind: FeedbackKind, message: impl Into<String>, ttl: std::time::Duration) -> Self {
        // Out-of-range windows clamp to something effectively permanent
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365));
        Self {
            kind,
            message: message.into(),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Success message with the standard window.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(
            FeedbackKind::Success,
            message,
            std::time::Duration::from_secs(FEEDBACK_TTL_SECS),
        )
    }

    /// Error message with the standard window.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            FeedbackKind::Error,
            message,
            std::time::Duration::from_secs(FEEDBACK_TTL_SECS),
        )
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_window() {
        let feedback = Feedback::success("saved");
        let now = Utc::now();
        assert!(!feedback.is_expired(now));
        assert!(feedback.is_expired(now + Duration::seconds(FEEDBACK_TTL_SECS as i64 + 1)));
    }

    #[test]
    fn test_kinds() {
        assert!(Feedback::error("boom").is_error());
        assert!(!Feedback::success("ok").is_error());
    }
}
