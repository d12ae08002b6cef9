//! Secure storage capability Trait

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::types::{ItemAttributes, RawItem, Selector};

/// Status code reported when the in-memory store's lock is poisoned
pub const LOCK_POISONED: i32 = -1;

/// Non-success status returned by a secure store primitive
///
/// Closed set: anything that is not "not found" or "duplicate" travels as a
/// raw platform code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// No item matches the selector
    ItemNotFound,
    /// An item with the same identity already exists
    DuplicateItem,
    /// Any other platform status code
    Other(i32),
}

/// Result of one secure store primitive
pub type StoreOutcome<T> = std::result::Result<T, StoreStatus>;

/// Secure storage capability
///
/// The platform-provided encrypted store this crate delegates all persistence
/// to. Implementations must be safe to call concurrently; the layers above
/// take no locks of their own.
///
/// Platform implementations:
/// - `InMemorySecureStore` (this crate): tests, ephemeral vaults
/// - `KeyringSecureStore` (`secure-keychain-app`): OS keystore via the keyring crate
pub trait SecureStore: Send + Sync {
    /// Insert a new item if no item with the selector's identity exists
    ///
    /// # Returns
    /// * `Err(StoreStatus::DuplicateItem)` - slot already occupied
    fn insert(&self, selector: &Selector, attributes: &ItemAttributes) -> StoreOutcome<()>;

    /// Query at most one item matching the selector
    ///
    /// # Arguments
    /// * `return_data` - whether the payload should be returned
    fn query_one(&self, selector: &Selector, return_data: bool) -> StoreOutcome<RawItem>;

    /// Replace the attributes of the matching item
    ///
    /// # Returns
    /// * `Err(StoreStatus::ItemNotFound)` - nothing to update
    fn update_matching(&self, selector: &Selector, attributes: &ItemAttributes)
        -> StoreOutcome<()>;

    /// Delete the matching item
    ///
    /// # Returns
    /// * `Err(StoreStatus::ItemNotFound)` - nothing to delete
    fn delete_matching(&self, selector: &Selector) -> StoreOutcome<()>;
}

/// In-memory secure store
///
/// Default implementation, available on all platforms. Holds nothing beyond
/// process lifetime.
#[derive(Clone, Default)]
pub struct InMemorySecureStore {
    items: Arc<RwLock<HashMap<Selector, RawItem>>>,
}

impl InMemorySecureStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a raw item directly, bypassing the duplicate check
    ///
    /// Used to stage fixtures, including items whose bytes do not decode.
    pub fn seed_raw(&self, selector: Selector, item: RawItem) -> StoreOutcome<()> {
        self.items
            .write()
            .map_err(|_| StoreStatus::Other(LOCK_POISONED))?
            .insert(selector, item);
        Ok(())
    }

    /// Number of stored items
    pub fn len(&self) -> StoreOutcome<usize> {
        Ok(self
            .items
            .read()
            .map_err(|_| StoreStatus::Other(LOCK_POISONED))?
            .len())
    }

    /// Whether the store holds no items
    pub fn is_empty(&self) -> StoreOutcome<bool> {
        Ok(self.len()? == 0)
    }

    fn to_raw(attributes: &ItemAttributes) -> RawItem {
        RawItem {
            account: Some(attributes.account.as_bytes().to_vec()),
            data: Some(attributes.data.clone()),
        }
    }
}

impl std::fmt::Debug for InMemorySecureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySecureStore").finish_non_exhaustive()
    }
}

impl SecureStore for InMemorySecureStore {
    fn insert(&self, selector: &Selector, attributes: &ItemAttributes) -> StoreOutcome<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreStatus::Other(LOCK_POISONED))?;
        if items.contains_key(selector) {
            return Err(StoreStatus::DuplicateItem);
        }
        items.insert(selector.clone(), Self::to_raw(attributes));
        Ok(())
    }

    fn query_one(&self, selector: &Selector, return_data: bool) -> StoreOutcome<RawItem> {
        let items = self
            .items
            .read()
            .map_err(|_| StoreStatus::Other(LOCK_POISONED))?;
        let item = items.get(selector).ok_or(StoreStatus::ItemNotFound)?;
        Ok(RawItem {
            account: item.account.clone(),
            data: if return_data { item.data.clone() } else { None },
        })
    }

    fn update_matching(
        &self,
        selector: &Selector,
        attributes: &ItemAttributes,
    ) -> StoreOutcome<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StoreStatus::Other(LOCK_POISONED))?;
        let item = items.get_mut(selector).ok_or(StoreStatus::ItemNotFound)?;
        *item = Self::to_raw(attributes);
        Ok(())
    }

    fn delete_matching(&self, selector: &Selector) -> StoreOutcome<()> {
        self.items
            .write()
            .map_err(|_| StoreStatus::Other(LOCK_POISONED))?
            .remove(selector)
            .map(|_| ())
            .ok_or(StoreStatus::ItemNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(account: &str, data: &str) -> ItemAttributes {
        ItemAttributes {
            account: account.to_string(),
            data: data.as_bytes().to_vec(),
        }
    }

    #[test]
    fn insert_rejects_duplicate_identity() {
        let store = InMemorySecureStore::new();
        let selector = Selector::generic("svc", "uid");

        store.insert(&selector, &attrs("uid", "one")).unwrap();
        assert_eq!(
            store.insert(&selector, &attrs("uid", "two")),
            Err(StoreStatus::DuplicateItem)
        );

        let item = store.query_one(&selector, true).unwrap();
        assert_eq!(item.data.as_deref(), Some(b"one".as_slice()));
    }

    #[test]
    fn query_without_data_omits_payload() {
        let store = InMemorySecureStore::new();
        let selector = Selector::record("svc");
        store.insert(&selector, &attrs("alice", "pw")).unwrap();

        let item = store.query_one(&selector, false).unwrap();
        assert_eq!(item.account.as_deref(), Some(b"alice".as_slice()));
        assert!(item.data.is_none());
    }

    #[test]
    fn update_and_delete_require_a_match() {
        let store = InMemorySecureStore::new();
        let selector = Selector::generic("svc", "deviceToken");

        assert_eq!(
            store.update_matching(&selector, &attrs("deviceToken", "x")),
            Err(StoreStatus::ItemNotFound)
        );
        assert_eq!(
            store.delete_matching(&selector),
            Err(StoreStatus::ItemNotFound)
        );
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn clones_share_storage() {
        let store = InMemorySecureStore::new();
        let other = store.clone();
        store
            .insert(&Selector::record("svc"), &attrs("alice", "pw"))
            .unwrap();
        assert_eq!(other.len().unwrap(), 1);
    }
}
