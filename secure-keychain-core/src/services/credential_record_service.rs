//! Credential record service
//!
//! Manages the single username/password record of a service scope. Writes are
//! strict: `add` never overwrites and `update` never creates.

use crate::adapter::SecureStoreAdapter;
use crate::error::{KeychainError, KeychainResult};
use crate::types::{Credential, Selector};

/// Credential record service
#[derive(Debug, Clone)]
pub struct CredentialRecordService {
    adapter: SecureStoreAdapter,
    scope: String,
    default_credential: Credential,
}

impl CredentialRecordService {
    /// Create a record service for `scope`
    ///
    /// # Errors
    /// Returns `KeychainError::InvalidConfig` if `scope` is empty.
    pub fn new(
        adapter: SecureStoreAdapter,
        scope: String,
        default_credential: Credential,
    ) -> KeychainResult<Self> {
        if scope.trim().is_empty() {
            return Err(KeychainError::InvalidConfig(
                "record scope cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            adapter,
            scope,
            default_credential,
        })
    }

    /// Service scope
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn selector(&self) -> Selector {
        Selector::record(self.scope.as_str())
    }

    /// Store the configured default credential
    ///
    /// Surfaces `AlreadyExists` unchanged when the slot is occupied; use
    /// [`update`](Self::update) in that case.
    pub fn add_default(&self) -> KeychainResult<()> {
        self.add(&self.default_credential)
    }

    /// Store `credential` in the empty record slot
    pub fn add(&self, credential: &Credential) -> KeychainResult<()> {
        self.adapter.add(
            &self.selector(),
            &credential.username,
            credential.password.as_bytes(),
        )?;
        log::info!("Credential record added for scope: {}", self.scope);
        Ok(())
    }

    /// Fresh lookup of the stored credential
    ///
    /// Every failure, including a store malfunction, reads as `None`. Use
    /// [`try_search`](Self::try_search) to tell the two apart.
    pub fn search(&self) -> Option<Credential> {
        self.try_search().unwrap_or_else(|e| {
            e.log_discarded("Credential record search failed");
            None
        })
    }

    /// Typed lookup: `Ok(None)` only when the slot is genuinely empty
    pub fn try_search(&self) -> KeychainResult<Option<Credential>> {
        let Some(item) = self.adapter.search(&self.selector(), true)? else {
            return Ok(None);
        };
        let password = item
            .payload
            .ok_or_else(|| KeychainError::MalformedRecord("payload".to_string()))?;
        Ok(Some(Credential {
            username: item.account,
            password,
        }))
    }

    /// Replace the stored credential
    ///
    /// Single-slot semantics: whatever record occupies the scope is replaced,
    /// including its username. Fails with `NotFound` on an empty slot and
    /// creates nothing.
    pub fn update(&self, credential: &Credential) -> KeychainResult<()> {
        self.adapter.update(
            &self.selector(),
            &credential.username,
            credential.password.as_bytes(),
        )?;
        log::info!("Credential record updated for scope: {}", self.scope);
        Ok(())
    }

    /// Remove the stored credential; an empty slot is success
    pub fn delete(&self) -> KeychainResult<()> {
        self.adapter.delete(&self.selector())?;
        log::info!("Credential record deleted for scope: {}", self.scope);
        Ok(())
    }
}
