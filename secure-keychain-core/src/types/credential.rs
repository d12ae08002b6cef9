//! Credential record types

use std::fmt;

use serde::{Deserialize, Serialize};

/// A username/password pair stored in the single record slot of a scope
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Account name, stored as the record's account attribute
    pub username: String,
    /// Secret, stored as the record's payload
    pub password: String,
}

impl Credential {
    /// Create a credential
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
