//! Platform-agnostic application bootstrap for Secure Keychain.
//!
//! Provides `KeychainState` (service container) and `KeychainStateBuilder`
//! (secure store injection + configuration). With the `keyring-store`
//! feature, `adapters::KeyringSecureStore` binds the OS keystore.

pub mod adapters;

use std::sync::Arc;

use secure_keychain_core::error::{KeychainError, KeychainResult};
use secure_keychain_core::services::{
    current_device_token, current_user_id, CredentialRecordService, NamedItemService,
    ServiceContext,
};
use secure_keychain_core::traits::SecureStore;
use secure_keychain_core::KeychainConfig;

/// Platform-agnostic keychain state.
///
/// Every frontend constructs this once at startup via `KeychainStateBuilder`.
/// All service calls block on the secure store; UI code should go through
/// [`run_blocking`](Self::run_blocking).
#[derive(Debug, Clone)]
pub struct KeychainState {
    /// Service context (holds the adapter and configuration)
    pub ctx: ServiceContext,
    /// Credential record service for the configured scope
    pub credential_records: CredentialRecordService,
}

impl KeychainState {
    /// Named item service for `key` under the configured scope.
    pub fn named_item(&self, key: &str) -> KeychainResult<NamedItemService> {
        self.ctx.named_item(key)
    }

    /// Current device token, `None` when absent or unreadable.
    pub fn current_device_token(&self) -> Option<String> {
        current_device_token(&self.ctx)
    }

    /// Current user id, `None` when absent or unreadable.
    pub fn current_user_id(&self) -> Option<String> {
        current_user_id(&self.ctx)
    }

    /// Run `f` on tokio's blocking pool.
    ///
    /// # Errors
    /// Returns whatever `f` returns, or `KeychainError::TaskFailed` if the
    /// blocking task panicked or was cancelled.
    pub async fn run_blocking<F, T>(&self, f: F) -> KeychainResult<T>
    where
        F: FnOnce(&ServiceContext) -> KeychainResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let ctx = self.ctx.clone();
        tokio::task::spawn_blocking(move || f(&ctx))
            .await
            .map_err(|e| KeychainError::TaskFailed(format!("Task join error: {e}")))?
    }
}

/// Builder for constructing `KeychainState` with a platform-specific store.
///
/// # Required
/// - `secure_store` — where secrets live
///
/// # Optional
/// - `config` — defaults to `KeychainConfig::default()`
#[derive(Default)]
pub struct KeychainStateBuilder {
    secure_store: Option<Arc<dyn SecureStore>>,
    config: Option<KeychainConfig>,
}

impl KeychainStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn secure_store(mut self, store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(store);
        self
    }

    #[must_use]
    pub fn config(mut self, config: KeychainConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `KeychainState`.
    ///
    /// # Errors
    /// Returns `KeychainError::InvalidConfig` if the store is missing or the
    /// configuration is rejected.
    pub fn build(self) -> KeychainResult<KeychainState> {
        let secure_store = self.secure_store.ok_or_else(|| {
            KeychainError::InvalidConfig("secure_store is required".to_string())
        })?;
        let config = self.config.unwrap_or_default();

        let ctx = ServiceContext::new(secure_store, config)?;
        let credential_records = ctx.credential_records()?;
        log::info!("Keychain ready for service scope: {}", ctx.config().service);

        Ok(KeychainState {
            ctx,
            credential_records,
        })
    }
}

impl std::fmt::Debug for KeychainStateBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainStateBuilder")
            .field("has_secure_store", &self.secure_store.is_some())
            .field("config", &self.config)
            .finish()
    }
}
