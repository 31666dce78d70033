//! Infrastructure adapters for the HMS console client layer.
//!
//! Concrete implementations of the core trait seams: the file-backed token
//! slot, the TOML client configuration, and the reqwest-backed API
//! gateway.

pub mod config;
pub mod http_gateway;
pub mod paths;
pub mod token_store;

pub use config::{ClientConfig, ConfigService, DEFAULT_BASE_URL};
pub use http_gateway::HttpGateway;
pub use paths::ConsolePaths;
pub use token_store::{FileTokenStore, InMemoryTokenStore};
