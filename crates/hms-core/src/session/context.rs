//! Injectable session context.
//!
//! The context is the single handle through which the gateway and the
//! resource view-models observe the authenticated state. It is constructed
//! once at application start and passed to every component that needs it;
//! there is no free-floating singleton.

use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::session::model::{Session, UserIdentity};
use crate::session::token::TokenStore;

/// Shared session state: the in-memory [`Session`] plus the bearer slot the
/// gateway reads on every request.
///
/// The bearer slot mirrors the durable store. It can outlive the identity:
/// after a process restart [`SessionContext::restore`] re-hydrates the token
/// alone, so requests authenticate immediately while the identity stays
/// unknown until the next sign-in.
#[derive(Clone)]
pub struct SessionContext {
    session: Arc<RwLock<Session>>,
    bearer: Arc<RwLock<Option<String>>>,
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    /// Creates a new context over the given durable store.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::Anonymous)),
            bearer: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Synchronous read of the current bearer token.
    ///
    /// Called by the gateway before every outbound request.
    pub fn current_token(&self) -> Option<String> {
        self.bearer.read().unwrap().clone()
    }

    /// Returns a snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.read().unwrap().clone()
    }

    /// Establishes an authenticated session and persists the token.
    ///
    /// A durable-store write failure is logged but does not tear the
    /// session down: the server accepted the credentials, so the session
    /// stays usable for the lifetime of the process.
    pub fn establish(&self, token: impl Into<String>, user: UserIdentity) {
        let token = token.into();
        if let Err(err) = self.store.save(&token) {
            tracing::warn!(target: "session", "Failed to persist token: {}", err);
        }
        *self.bearer.write().unwrap() = Some(token.clone());
        *self.session.write().unwrap() = Session::authenticated(token, user);
    }

    /// Resets to the anonymous state and clears durable storage.
    ///
    /// Always succeeds locally; a storage failure is logged and swallowed.
    pub fn reset(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(target: "session", "Failed to clear stored token: {}", err);
        }
        *self.bearer.write().unwrap() = None;
        *self.session.write().unwrap() = Session::Anonymous;
    }

    /// Re-hydrates the bearer slot from durable storage.
    ///
    /// Returns `true` when a stored token was found. The in-memory session
    /// is left anonymous; only the next sign-in recovers the identity.
    pub fn restore(&self) -> bool {
        match self.store.load() {
            Ok(Some(token)) => {
                *self.bearer.write().unwrap() = Some(token);
                true
            }
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(target: "session", "Failed to read stored token: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct SlotStore {
        slot: Mutex<Option<String>>,
    }

    impl SlotStore {
        fn new(initial: Option<&str>) -> Self {
            Self {
                slot: Mutex::new(initial.map(String::from)),
            }
        }
    }

    impl TokenStore for SlotStore {
        fn load(&self) -> Result<Option<String>> {
            Ok(self.slot.lock().unwrap().clone())
        }

        fn save(&self, token: &str) -> Result<()> {
            *self.slot.lock().unwrap() = Some(token.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn test_establish_and_reset() {
        let store = Arc::new(SlotStore::new(None));
        let context = SessionContext::new(store.clone());
        assert_eq!(context.current_token(), None);

        context.establish("tok-1", UserIdentity::default());
        assert_eq!(context.current_token(), Some("tok-1".to_string()));
        assert!(context.session().is_authenticated());
        assert_eq!(store.load().unwrap(), Some("tok-1".to_string()));

        context.reset();
        assert_eq!(context.current_token(), None);
        assert!(!context.session().is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_restore_rehydrates_bearer_only() {
        let store = Arc::new(SlotStore::new(Some("persisted")));
        let context = SessionContext::new(store);

        assert!(context.restore());
        assert_eq!(context.current_token(), Some("persisted".to_string()));
        // Identity is unknown after restart
        assert!(!context.session().is_authenticated());
    }

    #[test]
    fn test_restore_with_empty_store() {
        let context = SessionContext::new(Arc::new(SlotStore::new(None)));
        assert!(!context.restore());
        assert_eq!(context.current_token(), None);
    }
}
