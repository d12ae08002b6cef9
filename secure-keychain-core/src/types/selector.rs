//! Store addressing types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known keys for named string items
pub struct ItemKey;

impl ItemKey {
    /// Current user identifier
    pub const UID: &'static str = "uid";
    /// Current push/device token
    pub const DEVICE_TOKEN: &'static str = "deviceToken";
}

/// Class of a stored item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemClass {
    /// Username/password record, one per scope
    Record,
    /// Single opaque string addressed by a key
    GenericItem,
}

impl ItemClass {
    /// Stable name used in logs and backend entry targets
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::GenericItem => "generic",
        }
    }
}

/// Addresses one store item by class + scope + optional key
///
/// The selector is the item's identity inside the store: two selectors that
/// compare equal always address the same slot. A record selector carries no
/// key, which gives each scope exactly one record slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Item class
    pub class: ItemClass,
    /// Service scope
    pub scope: String,
    /// Item key (generic items only)
    pub key: Option<String>,
}

impl Selector {
    /// Selector for the record slot of `scope`
    pub fn record(scope: impl Into<String>) -> Self {
        Self {
            class: ItemClass::Record,
            scope: scope.into(),
            key: None,
        }
    }

    /// Selector for the generic item `(scope, key)`
    pub fn generic(scope: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            class: ItemClass::GenericItem,
            scope: scope.into(),
            key: Some(key.into()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}:{}/{}", self.class.as_str(), self.scope, key),
            None => write!(f, "{}:{}", self.class.as_str(), self.scope),
        }
    }
}

/// Attributes written by insert and update
#[derive(Clone, PartialEq, Eq)]
pub struct ItemAttributes {
    /// Account attribute (record username or item key)
    pub account: String,
    /// Payload bytes
    pub data: Vec<u8>,
}

impl fmt::Debug for ItemAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemAttributes")
            .field("account", &self.account)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Item as returned by the secure store, before decoding
///
/// Either field may be missing when the backend could not produce it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    /// Account attribute bytes
    pub account: Option<Vec<u8>>,
    /// Payload bytes (absent when not requested)
    pub data: Option<Vec<u8>>,
}

impl fmt::Debug for RawItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawItem")
            .field("account_len", &self.account.as_ref().map(Vec::len))
            .field("data_len", &self.data.as_ref().map(Vec::len))
            .finish()
    }
}

/// Decoded item returned by the adapter's search
#[derive(Clone, PartialEq, Eq)]
pub struct StoredItem {
    /// Account attribute
    pub account: String,
    /// Payload text, `None` when the search did not ask for it
    pub payload: Option<String>,
}

impl fmt::Debug for StoredItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredItem")
            .field("account", &self.account)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}
