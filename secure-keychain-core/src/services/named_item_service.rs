//! Named string item service
//!
//! One opaque string per `(scope, key)`. `save()` resolves to an update when
//! the item exists and to an add otherwise:
//!
//! ```text
//! Start -> search -> Found    -> update -> Done | UpdateError
//!                 -> NotFound -> add    -> Done | AddError
//!                 -> SearchError (failure, add is never attempted)
//! ```
//!
//! The check-then-act sequence is not atomic. Two concurrent `save()` calls
//! can both observe "not found"; the loser's add then fails with
//! `AlreadyExists`, which is reported unless the service runs with
//! [`ConflictPolicy::RetryAsUpdate`].

use crate::adapter::SecureStoreAdapter;
use crate::config::ConflictPolicy;
use crate::error::{KeychainError, KeychainResult};
use crate::types::Selector;

/// Named string item service
#[derive(Debug, Clone)]
pub struct NamedItemService {
    adapter: SecureStoreAdapter,
    scope: String,
    key: String,
    conflict_policy: ConflictPolicy,
}

impl NamedItemService {
    /// Create a service for `(scope, key)`
    ///
    /// # Errors
    /// Returns `KeychainError::InvalidConfig` if scope or key is empty.
    pub fn new(adapter: SecureStoreAdapter, scope: String, key: String) -> KeychainResult<Self> {
        if scope.trim().is_empty() {
            return Err(KeychainError::InvalidConfig(
                "item scope cannot be empty".to_string(),
            ));
        }
        if key.is_empty() {
            return Err(KeychainError::InvalidConfig(
                "item key cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            adapter,
            scope,
            key,
            conflict_policy: ConflictPolicy::default(),
        })
    }

    /// Set the upsert conflict policy
    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Item key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Service scope
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn selector(&self) -> Selector {
        Selector::generic(self.scope.as_str(), self.key.as_str())
    }

    /// Look up the stored value
    ///
    /// Fails with `NotFound` when absent and `MalformedRecord` when the stored
    /// bytes are not UTF-8 text.
    pub fn search(&self) -> KeychainResult<String> {
        let item = self
            .adapter
            .search(&self.selector(), true)?
            .ok_or(KeychainError::NotFound)?;
        item.payload
            .ok_or_else(|| KeychainError::MalformedRecord("payload".to_string()))
    }

    /// Collapsing lookup: `None` on absence and on any failure
    pub fn find(&self) -> Option<String> {
        self.search()
            .map_err(|e| e.log_discarded(&format!("Lookup of '{}' failed", self.key)))
            .ok()
    }

    /// Whether an item exists, without decoding its payload
    pub fn contains(&self) -> KeychainResult<bool> {
        Ok(self.adapter.search(&self.selector(), false)?.is_some())
    }

    /// Upsert `value`
    pub fn save(&self, value: &str) -> KeychainResult<()> {
        match self.search() {
            Ok(_) => {
                log::debug!("'{}' exists, updating in place", self.key);
                self.update_value(value)?;
            }
            Err(KeychainError::NotFound) => {
                log::debug!("'{}' missing, adding", self.key);
                self.add_value(value)?;
            }
            // A corrupt or unreadable item must not be shadowed by a new one
            Err(e) => return Err(e),
        }
        log::info!("Keychain item saved: {}/{}", self.scope, self.key);
        Ok(())
    }

    /// Remove the item; a missing item is success
    pub fn delete(&self) -> KeychainResult<()> {
        self.adapter.delete(&self.selector())?;
        log::info!("Keychain item deleted: {}/{}", self.scope, self.key);
        Ok(())
    }

    fn update_value(&self, value: &str) -> KeychainResult<()> {
        self.adapter
            .update(&self.selector(), &self.key, value.as_bytes())
    }

    fn add_value(&self, value: &str) -> KeychainResult<()> {
        match self.adapter.add(&self.selector(), &self.key, value.as_bytes()) {
            Err(KeychainError::AlreadyExists)
                if self.conflict_policy == ConflictPolicy::RetryAsUpdate =>
            {
                log::warn!(
                    "'{}' was added concurrently, retrying as update",
                    self.key
                );
                self.update_value(value)
            }
            other => other,
        }
    }
}
