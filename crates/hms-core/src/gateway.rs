//! API gateway trait.
//!
//! Defines the seam between the resource view-models and the HTTP
//! transport. The concrete reqwest-backed client lives in the
//! infrastructure crate; tests substitute in-memory implementations.

use async_trait::async_trait;
use serde_json::Value;

pub use reqwest::Method;

use crate::error::Result;

/// An abstract client for the hospital-management backend.
///
/// Implementations attach the current bearer token when one is present and
/// normalize every failure into [`crate::ConsoleError`]:
///
/// - transport failure (no response reached) -> `Network`
/// - non-2xx response -> `Api { status, message }`, where `message` comes
///   from the body's `message` field when present
///
/// There is no automatic retry and no token refresh; a 401 surfaces as an
/// `Api` error and it is the caller's responsibility to trigger sign-out.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Issues a request against the backend.
    ///
    /// `path` is relative to the configured base URL. A 2xx response with
    /// an empty or non-JSON body yields `Value::Null`.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value>;

    async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn patch(&self, path: &str) -> Result<Value> {
        self.request(Method::PATCH, path, None).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }
}
