//! Keyring-based secure store.
//!
//! Uses the system keychain (macOS Keychain, Windows Credential Manager,
//! Linux Secret Service) via the `keyring` crate. Every call blocks on the
//! platform; async callers go through `KeychainState::run_blocking`.
//!
//! Entry layout:
//! - generic item `(scope, key)` → entry `(scope, key)`, raw payload bytes
//! - record of `scope` → entry `(scope, RECORD_USER)`, JSON envelope holding
//!   account and payload
//!
//! `RECORD_USER` is reserved: a generic item with that key is rejected
//! rather than sharing the record's entry.

use keyring::Entry;
use serde::{Deserialize, Serialize};

use secure_keychain_core::traits::{SecureStore, StoreOutcome, StoreStatus};
use secure_keychain_core::types::{ItemAttributes, ItemClass, RawItem, Selector};

const RECORD_USER: &str = "__credential_record__";

// Status codes for keyring failures
const PLATFORM_FAILURE: i32 = -1;
const NO_STORAGE_ACCESS: i32 = -2;
const BAD_ENCODING: i32 = -3;
const TOO_LONG: i32 = -4;
const INVALID: i32 = -5;
const AMBIGUOUS: i32 = -6;
const ENVELOPE_ENCODING: i32 = -7;
const UNKNOWN: i32 = -99;

/// Stored form of a credential record.
#[derive(Serialize, Deserialize)]
struct RecordEnvelope {
    account: String,
    data: Vec<u8>,
}

/// Keyring-based secure store.
///
/// Stateless: every primitive opens a fresh `Entry`. Insert-if-absent and
/// update-matching are a read followed by a write, so they are only as
/// atomic as the platform keystore makes two sequential calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringSecureStore;

impl KeyringSecureStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(selector: &Selector) -> StoreOutcome<Entry> {
        let user = target_user(selector)?;
        Entry::new(&selector.scope, user).map_err(|e| status_from(&e))
    }

    fn exists(entry: &Entry) -> StoreOutcome<bool> {
        match entry.get_secret() {
            Ok(_) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(status_from(&e)),
        }
    }

    fn write(entry: &Entry, selector: &Selector, attributes: &ItemAttributes) -> StoreOutcome<()> {
        let secret = encode_secret(selector.class, attributes)?;
        entry.set_secret(&secret).map_err(|e| status_from(&e))
    }
}

impl SecureStore for KeyringSecureStore {
    fn insert(&self, selector: &Selector, attributes: &ItemAttributes) -> StoreOutcome<()> {
        let entry = Self::entry(selector)?;
        if Self::exists(&entry)? {
            return Err(StoreStatus::DuplicateItem);
        }
        Self::write(&entry, selector, attributes)
    }

    fn query_one(&self, selector: &Selector, return_data: bool) -> StoreOutcome<RawItem> {
        let entry = Self::entry(selector)?;
        let secret = entry.get_secret().map_err(|e| status_from(&e))?;
        let mut item = decode_secret(selector, secret);
        if !return_data {
            item.data = None;
        }
        Ok(item)
    }

    fn update_matching(
        &self,
        selector: &Selector,
        attributes: &ItemAttributes,
    ) -> StoreOutcome<()> {
        let entry = Self::entry(selector)?;
        if !Self::exists(&entry)? {
            return Err(StoreStatus::ItemNotFound);
        }
        Self::write(&entry, selector, attributes)
    }

    fn delete_matching(&self, selector: &Selector) -> StoreOutcome<()> {
        Self::entry(selector)?
            .delete_credential()
            .map_err(|e| status_from(&e))
    }
}

fn target_user(selector: &Selector) -> StoreOutcome<&str> {
    match (selector.class, selector.key.as_deref()) {
        (ItemClass::Record, _) => Ok(RECORD_USER),
        // the record entry's user name is reserved
        (ItemClass::GenericItem, Some(RECORD_USER)) => {
            log::error!("Generic keychain item uses the reserved record key: {selector}");
            Err(StoreStatus::Other(INVALID))
        }
        (ItemClass::GenericItem, Some(key)) => Ok(key),
        (ItemClass::GenericItem, None) => {
            log::error!("Generic keychain item without a key: {selector}");
            Err(StoreStatus::Other(INVALID))
        }
    }
}

fn encode_secret(class: ItemClass, attributes: &ItemAttributes) -> StoreOutcome<Vec<u8>> {
    match class {
        ItemClass::GenericItem => Ok(attributes.data.clone()),
        ItemClass::Record => serde_json::to_vec(&RecordEnvelope {
            account: attributes.account.clone(),
            data: attributes.data.clone(),
        })
        .map_err(|e| {
            log::error!("Failed to encode credential record: {e}");
            StoreStatus::Other(ENVELOPE_ENCODING)
        }),
    }
}

/// A record whose envelope does not parse comes back without fields, which
/// the adapter reports as a malformed record.
fn decode_secret(selector: &Selector, secret: Vec<u8>) -> RawItem {
    match selector.class {
        ItemClass::GenericItem => RawItem {
            account: selector.key.as_ref().map(|k| k.as_bytes().to_vec()),
            data: Some(secret),
        },
        ItemClass::Record => match serde_json::from_slice::<RecordEnvelope>(&secret) {
            Ok(envelope) => RawItem {
                account: Some(envelope.account.into_bytes()),
                data: Some(envelope.data),
            },
            Err(e) => {
                log::warn!("Unreadable credential record in {}: {e}", selector.scope);
                RawItem::default()
            }
        },
    }
}

fn status_from(err: &keyring::Error) -> StoreStatus {
    let code = match err {
        keyring::Error::NoEntry => return StoreStatus::ItemNotFound,
        keyring::Error::PlatformFailure(_) => PLATFORM_FAILURE,
        keyring::Error::NoStorageAccess(_) => NO_STORAGE_ACCESS,
        keyring::Error::BadEncoding(_) => BAD_ENCODING,
        keyring::Error::TooLong(_, _) => TOO_LONG,
        keyring::Error::Invalid(_, _) => INVALID,
        keyring::Error::Ambiguous(_) => AMBIGUOUS,
        _ => UNKNOWN,
    };
    log::warn!("Keyring operation failed ({code}): {err}");
    StoreStatus::Other(code)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn attrs(account: &str, data: &[u8]) -> ItemAttributes {
        ItemAttributes {
            account: account.to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn record_envelope_roundtrip() {
        let selector = Selector::record("svc");
        let secret = encode_secret(ItemClass::Record, &attrs("alice", "비밀".as_bytes())).unwrap();

        let item = decode_secret(&selector, secret);
        assert_eq!(item.account.as_deref(), Some(b"alice".as_slice()));
        assert_eq!(item.data.as_deref(), Some("비밀".as_bytes()));
    }

    #[test]
    fn generic_item_stores_raw_payload() {
        let secret =
            encode_secret(ItemClass::GenericItem, &attrs("deviceToken", b"token-1")).unwrap();
        assert_eq!(secret, b"token-1");

        let item = decode_secret(&Selector::generic("svc", "deviceToken"), secret);
        assert_eq!(item.account.as_deref(), Some(b"deviceToken".as_slice()));
        assert_eq!(item.data.as_deref(), Some(b"token-1".as_slice()));
    }

    #[test]
    fn unreadable_envelope_has_no_fields() {
        let item = decode_secret(&Selector::record("svc"), b"not json".to_vec());
        assert_eq!(item, RawItem::default());
    }

    #[test]
    fn entry_targets() {
        assert_eq!(target_user(&Selector::record("svc")).unwrap(), RECORD_USER);
        assert_eq!(
            target_user(&Selector::generic("svc", "uid")).unwrap(),
            "uid"
        );

        let keyless = Selector {
            key: None,
            ..Selector::generic("svc", "uid")
        };
        assert_eq!(target_user(&keyless), Err(StoreStatus::Other(INVALID)));
    }

    #[test]
    fn generic_item_cannot_alias_the_record_entry() {
        let aliased = Selector::generic("svc", RECORD_USER);
        assert_eq!(target_user(&aliased), Err(StoreStatus::Other(INVALID)));

        let store = KeyringSecureStore::new();
        assert_eq!(
            store.query_one(&aliased, true).unwrap_err(),
            StoreStatus::Other(INVALID)
        );
        assert_eq!(
            store.delete_matching(&aliased),
            Err(StoreStatus::Other(INVALID))
        );

        let record = target_user(&Selector::record("svc")).unwrap();
        for key in ["uid", "deviceToken", "credential-record", "__credential_record"] {
            assert_ne!(target_user(&Selector::generic("svc", key)).unwrap(), record);
        }
    }

    #[test]
    fn keyring_errors_map_to_status_codes() {
        assert_eq!(
            status_from(&keyring::Error::NoEntry),
            StoreStatus::ItemNotFound
        );
        assert_eq!(
            status_from(&keyring::Error::BadEncoding(vec![0xff])),
            StoreStatus::Other(BAD_ENCODING)
        );
        assert_eq!(
            status_from(&keyring::Error::TooLong("user".to_string(), 255)),
            StoreStatus::Other(TOO_LONG)
        );
        assert_eq!(
            status_from(&keyring::Error::Invalid(
                "service".to_string(),
                "empty".to_string()
            )),
            StoreStatus::Other(INVALID)
        );
    }
}
