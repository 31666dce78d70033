//! Session lifecycle management.
//!
//! `SessionManager` owns the anonymous -> authenticated -> anonymous
//! lifecycle: it exchanges credentials for a bearer token at the identity
//! endpoint, persists the token through the session context, and tears the
//! session down on sign-out.

use std::sync::Arc;

use serde::Deserialize;

use hms_core::error::{ConsoleError, Result};
use hms_core::gateway::ApiGateway;
use hms_core::session::{Credentials, Session, SessionContext, UserIdentity};

const SIGNIN_PATH: &str = "/auth/signin";

/// Wire shape of the sign-in response: the token plus identity fields at
/// the same level.
#[derive(Debug, Deserialize)]
struct SignInResponse {
    token: String,
    #[serde(flatten)]
    user: UserIdentity,
}

/// Manages the authenticated session.
pub struct SessionManager {
    gateway: Arc<dyn ApiGateway>,
    context: SessionContext,
}

impl SessionManager {
    /// Creates a new `SessionManager`.
    ///
    /// # Arguments
    ///
    /// * `gateway` - The API gateway used for the identity endpoint
    /// * `context` - The shared session context the gateway also reads
    pub fn new(gateway: Arc<dyn ApiGateway>, context: SessionContext) -> Self {
        Self { gateway, context }
    }

    /// Exchanges credentials for an authenticated session.
    ///
    /// On success the token is persisted to durable storage and the
    /// in-memory session is replaced. On rejection the session is left
    /// unchanged and the server's message (or a generic fallback) is
    /// surfaced as an [`ConsoleError::Auth`]. There is no retry; a failed
    /// sign-in must be resubmitted by the user.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let payload = serde_json::to_value(credentials)?;
        let response = match self.gateway.post(SIGNIN_PATH, payload).await {
            Ok(value) => value,
            Err(ConsoleError::Api { message, .. }) => {
                tracing::warn!(target: "session", "Sign-in rejected: {}", message);
                return Err(ConsoleError::Auth(message));
            }
            Err(err) => return Err(err),
        };

        let parsed: SignInResponse = serde_json::from_value(response)
            .map_err(|_| ConsoleError::auth("Sign-in response was malformed"))?;
        if parsed.token.is_empty() {
            return Err(ConsoleError::auth("Sign-in response carried no token"));
        }

        self.context.establish(parsed.token, parsed.user);
        let session = self.context.session();
        if let Some(user) = session.user() {
            tracing::info!(target: "session", "Signed in as {} ({})", user.name, user.role);
        }
        Ok(session)
    }

    /// Clears durable storage and resets the session to anonymous.
    ///
    /// Always succeeds locally; no network call is made.
    pub fn sign_out(&self) {
        self.context.reset();
        tracing::info!(target: "session", "Signed out");
    }

    /// Synchronous read of the current bearer token.
    pub fn current_token(&self) -> Option<String> {
        self.context.current_token()
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.context.session()
    }

    /// Re-hydrates the bearer token from durable storage.
    ///
    /// Returns `true` when a token from a previous run was found.
    pub fn restore(&self) -> bool {
        self.context.restore()
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}
