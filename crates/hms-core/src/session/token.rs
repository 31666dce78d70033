//! Durable token store trait.
//!
//! Defines the interface for the single-slot bearer token storage.

use crate::error::Result;

/// An abstract single-slot store for the raw bearer token.
///
/// This trait defines the contract for persisting the token across process
/// restarts, decoupling the session layer from the specific storage
/// mechanism (a file under the config directory, an in-memory slot, etc.).
///
/// Reads are synchronous: the gateway consults the token at the start of
/// every outbound request and must not block on I/O scheduling.
pub trait TokenStore: Send + Sync {
    /// Loads the stored token.
    ///
    /// Returns `Ok(None)` when no token has been stored.
    fn load(&self) -> Result<Option<String>>;

    /// Stores the token, replacing any previous value.
    fn save(&self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<()>;
}
