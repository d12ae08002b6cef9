//! Service layer

mod accessors;
mod credential_record_service;
mod named_item_service;

pub use accessors::{current_device_token, current_user_id};
pub use credential_record_service::CredentialRecordService;
pub use named_item_service::NamedItemService;

use std::sync::Arc;

use crate::adapter::SecureStoreAdapter;
use crate::config::KeychainConfig;
use crate::error::KeychainResult;
use crate::traits::SecureStore;

/// Service context holding every dependency
///
/// The platform layer creates it and injects its secure store. Holds no
/// mutable state; every clone addresses the same store.
#[derive(Clone, Debug)]
pub struct ServiceContext {
    adapter: SecureStoreAdapter,
    config: Arc<KeychainConfig>,
}

impl ServiceContext {
    /// Create the service context
    ///
    /// # Errors
    /// Returns `KeychainError::InvalidConfig` if the configuration is rejected.
    pub fn new(store: Arc<dyn SecureStore>, config: KeychainConfig) -> KeychainResult<Self> {
        config.validate()?;
        Ok(Self {
            adapter: SecureStoreAdapter::new(store),
            config: Arc::new(config),
        })
    }

    /// Shared adapter
    #[must_use]
    pub fn adapter(&self) -> &SecureStoreAdapter {
        &self.adapter
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &KeychainConfig {
        &self.config
    }

    /// Credential record service for the configured scope
    ///
    /// # Errors
    /// Returns `KeychainError::InvalidConfig` if the scope is empty.
    pub fn credential_records(&self) -> KeychainResult<CredentialRecordService> {
        CredentialRecordService::new(
            self.adapter.clone(),
            self.config.service.clone(),
            self.config.default_credential.clone(),
        )
    }

    /// Named item service for `key` under the configured scope
    ///
    /// # Errors
    /// Returns `KeychainError::InvalidConfig` for an empty key.
    pub fn named_item(&self, key: &str) -> KeychainResult<NamedItemService> {
        NamedItemService::new(
            self.adapter.clone(),
            self.config.service.clone(),
            key.to_string(),
        )
        .map(|service| service.with_conflict_policy(self.config.conflict_policy))
    }
}
