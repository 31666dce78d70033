//! Console composition root.
//!
//! Wires the configuration, the durable token store, the HTTP gateway,
//! and the three services into one handle. Constructed once at
//! application start; a token persisted by a previous run is picked up so
//! requests authenticate immediately.

use std::sync::Arc;

use hms_core::error::Result;
use hms_core::gateway::ApiGateway;
use hms_core::session::{SessionContext, TokenStore};
use hms_infrastructure::{ClientConfig, ConfigService, FileTokenStore, HttpGateway};

use crate::patient::PatientCensus;
use crate::session_manager::SessionManager;
use crate::staff::StaffDirectory;

/// The assembled client layer: one session manager and one view-model per
/// resource kind, all sharing a session context and gateway.
pub struct Console {
    context: SessionContext,
    session: SessionManager,
    staff: StaffDirectory,
    patients: PatientCensus,
}

impl Console {
    /// Assembles the console from the on-disk configuration and token slot.
    pub fn bootstrap() -> Result<Self> {
        let config = ConfigService::new().get_config();
        let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new()?);
        Ok(Self::with_parts(&config, store))
    }

    /// Assembles the console from explicit parts (used by tests and
    /// embeddings that manage their own storage).
    pub fn with_parts(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let context = SessionContext::new(store);
        if context.restore() {
            tracing::info!(target: "session", "Restored bearer token from a previous run");
        }

        let gateway: Arc<dyn ApiGateway> =
            Arc::new(HttpGateway::from_config(config, context.clone()));

        Self {
            session: SessionManager::new(gateway.clone(), context.clone()),
            staff: StaffDirectory::new(gateway.clone()),
            patients: PatientCensus::new(gateway),
            context,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn staff(&self) -> &StaffDirectory {
        &self.staff
    }

    pub fn patients(&self) -> &PatientCensus {
        &self.patients
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}
