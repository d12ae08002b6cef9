//! Keychain configuration

use serde::{Deserialize, Serialize};

use crate::error::{KeychainError, KeychainResult};
use crate::types::Credential;

/// Service scope used when none is configured
pub const DEFAULT_SERVICE: &str = "com.kybeen.KeychainSample";

/// What `save()` does when its add branch loses a race to another writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictPolicy {
    /// Surface `AlreadyExists` to the caller
    #[default]
    Report,
    /// Retry once as an update
    RetryAsUpdate,
}

/// Keychain configuration
///
/// Supplied by the embedding application; the core never reads files or
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeychainConfig {
    /// Service scope every item is stored under
    pub service: String,
    /// Credential written by `CredentialRecordService::add_default`
    pub default_credential: Credential,
    /// Upsert conflict handling
    pub conflict_policy: ConflictPolicy,
}

impl Default for KeychainConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            default_credential: Credential::new("Default_Name", "Default_PW"),
            conflict_policy: ConflictPolicy::Report,
        }
    }
}

impl KeychainConfig {
    /// Reject configurations no store operation could address
    pub fn validate(&self) -> KeychainResult<()> {
        if self.service.trim().is_empty() {
            return Err(KeychainError::InvalidConfig(
                "service scope cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
