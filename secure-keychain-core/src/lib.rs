//! Secure Keychain Core Library
//!
//! Credential-store service layer on top of a platform secure store:
//! - Credential Record Service (one username/password record per scope)
//! - Named String Item Service (upserted single-string items)
//! - Secure Store Adapter (status-code translation)
//!
//! This library is platform-independent, abstracting the secure store through
//! the `SecureStore` trait. Encryption and at-rest protection belong to the
//! store implementation.

pub mod adapter;
pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use adapter::SecureStoreAdapter;
pub use config::{ConflictPolicy, KeychainConfig};
pub use error::{KeychainError, KeychainResult};
pub use services::{
    current_device_token, current_user_id, CredentialRecordService, NamedItemService,
    ServiceContext,
};
pub use traits::{InMemorySecureStore, SecureStore, StoreOutcome, StoreStatus};
pub use types::{Credential, ItemKey, Selector};
