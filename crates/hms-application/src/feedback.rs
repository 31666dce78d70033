//! Transient feedback slot.
//!
//! Holds the single visible feedback message for a view. A new message
//! replaces the current one rather than queuing, and every publish
//! schedules a cancel-on-replace expiry timer so rapid successive
//! operations never leave an old timer racing to clear a newer message.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use hms_core::feedback::{FEEDBACK_TTL_SECS, Feedback, FeedbackKind};

/// Latest-wins holder for the view's transient message.
///
/// Must be used from within a tokio runtime; publishing spawns the expiry
/// timer.
#[derive(Clone)]
pub struct FeedbackSlot {
    current: Arc<RwLock<Option<Feedback>>>,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl FeedbackSlot {
    /// Creates a slot with the standard expiry window.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(FEEDBACK_TTL_SECS))
    }

    /// Creates a slot with an explicit expiry window (used by tests).
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            timer: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Publishes a success message.
    pub fn success(&self, message: impl Into<String>) {
        self.publish(Feedback::new(FeedbackKind::Success, message, self.ttl));
    }

    /// Publishes an error message.
    pub fn error(&self, message: impl Into<String>) {
        self.publish(Feedback::new(FeedbackKind::Error, message, self.ttl));
    }

    /// Replaces the current message and re-arms the expiry timer.
    pub fn publish(&self, feedback: Feedback) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.current.write().unwrap() = Some(feedback);

        let previous = self.timer.lock().unwrap().take();
        if let Some(handle) = previous {
            handle.abort();
        }

        let current = Arc::clone(&self.current);
        let latest = Arc::clone(&self.generation);
        let ttl = self.ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            // An aborted timer can already be past its sleep; the
            // generation check keeps it from clearing a newer message.
            if latest.load(Ordering::SeqCst) == generation {
                *current.write().unwrap() = None;
            }
        });
        *self.timer.lock().unwrap() = Some(handle);
    }

    /// Returns the visible, unexpired feedback, if any.
    pub fn current(&self) -> Option<Feedback> {
        self.current
            .read()
            .unwrap()
            .clone()
            .filter(|feedback| !feedback.is_expired(Utc::now()))
    }
}

impl Default for FeedbackSlot {
    fn default() -> Self {
        Self::new()
    }
}
