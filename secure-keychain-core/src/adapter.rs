//! Secure store adapter
//!
//! Stateless translation between selector-level intents and the four
//! `SecureStore` primitives. Every call performs exactly one primitive and
//! never retries.

use std::sync::Arc;

use crate::error::{KeychainError, KeychainResult};
use crate::traits::{SecureStore, StoreStatus};
use crate::types::{ItemAttributes, RawItem, Selector, StoredItem};

/// Secure store adapter
#[derive(Clone)]
pub struct SecureStoreAdapter {
    store: Arc<dyn SecureStore>,
}

impl SecureStoreAdapter {
    /// Wrap a secure store
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self { store }
    }

    /// Insert a new item
    ///
    /// Fails with `AlreadyExists` when the selector's slot is occupied.
    pub fn add(&self, selector: &Selector, account: &str, payload: &[u8]) -> KeychainResult<()> {
        log::debug!("[ADD] {selector}");
        let attributes = ItemAttributes {
            account: account.to_string(),
            data: payload.to_vec(),
        };
        self.store
            .insert(selector, &attributes)
            .map_err(|status| match status {
                StoreStatus::DuplicateItem => KeychainError::AlreadyExists,
                other => unhandled(other),
            })
    }

    /// Look up at most one item
    ///
    /// "Not found" is `Ok(None)`, not an error, so callers can branch on
    /// existence directly.
    pub fn search(
        &self,
        selector: &Selector,
        want_payload: bool,
    ) -> KeychainResult<Option<StoredItem>> {
        log::debug!("[SEARCH] {selector} (payload: {want_payload})");
        match self.store.query_one(selector, want_payload) {
            Ok(raw) => decode(raw, want_payload).map(Some),
            Err(StoreStatus::ItemNotFound) => Ok(None),
            Err(other) => Err(unhandled(other)),
        }
    }

    /// Replace account and payload of the matching item
    ///
    /// Fails with `NotFound` when no item matches; never creates one.
    pub fn update(&self, selector: &Selector, account: &str, payload: &[u8]) -> KeychainResult<()> {
        log::debug!("[UPDATE] {selector}");
        let attributes = ItemAttributes {
            account: account.to_string(),
            data: payload.to_vec(),
        };
        self.store
            .update_matching(selector, &attributes)
            .map_err(|status| match status {
                StoreStatus::ItemNotFound => KeychainError::NotFound,
                other => unhandled(other),
            })
    }

    /// Remove the matching item; a missing item is success
    pub fn delete(&self, selector: &Selector) -> KeychainResult<()> {
        log::debug!("[DELETE] {selector}");
        match self.store.delete_matching(selector) {
            Ok(()) | Err(StoreStatus::ItemNotFound) => Ok(()),
            Err(other) => Err(unhandled(other)),
        }
    }
}

impl std::fmt::Debug for SecureStoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureStoreAdapter").finish_non_exhaustive()
    }
}

fn unhandled(status: StoreStatus) -> KeychainError {
    match status {
        StoreStatus::Other(code) => KeychainError::Unhandled(code),
        // not expected from this primitive, but still typed
        StoreStatus::ItemNotFound => KeychainError::NotFound,
        StoreStatus::DuplicateItem => KeychainError::AlreadyExists,
    }
}

fn decode(raw: RawItem, want_payload: bool) -> KeychainResult<StoredItem> {
    let account = raw
        .account
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| KeychainError::MalformedRecord("account".to_string()))?;

    let payload = if want_payload {
        let text = raw
            .data
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| KeychainError::MalformedRecord("payload".to_string()))?;
        Some(text)
    } else {
        None
    };

    Ok(StoredItem { account, payload })
}
