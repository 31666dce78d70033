//! Session domain models.

use serde::{Deserialize, Serialize};

/// Identity fields returned by the sign-in endpoint alongside the token.
///
/// The server response shape is loose; every field is defaulted so that a
/// partial identity still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Server-assigned identifier. Accepts the Mongo-style `_id` wire name.
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Credentials submitted to the identity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The authenticated state of the console.
///
/// A bearer token is present exactly when an identity is present; the enum
/// makes that pairing impossible to break. Created on successful sign-in,
/// destroyed on sign-out or when the server rejects the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    /// No staff member is signed in.
    #[default]
    Anonymous,
    /// A staff member is signed in with a server-issued bearer token.
    Authenticated { token: String, user: UserIdentity },
}

impl Session {
    /// Creates an authenticated session.
    pub fn authenticated(token: impl Into<String>, user: UserIdentity) -> Self {
        Self::Authenticated {
            token: token.into(),
            user,
        }
    }

    /// Returns the bearer token, if a session is established.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { token, .. } => Some(token),
        }
    }

    /// Returns the signed-in identity, if a session is established.
    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user, .. } => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}
