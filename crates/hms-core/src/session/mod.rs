//! Session domain module.
//!
//! This module contains the authenticated-session model, the durable token
//! store interface, and the injectable session context read by the gateway.
//!
//! # Module Structure
//!
//! - `model`: Core session domain models (`Session`, `UserIdentity`, `Credentials`)
//! - `token`: Durable token store trait (`TokenStore`)
//! - `context`: Injectable session context (`SessionContext`)

mod context;
mod model;
mod token;

// Re-export public API
pub use context::SessionContext;
pub use model::{Credentials, Session, UserIdentity};
pub use token::TokenStore;
