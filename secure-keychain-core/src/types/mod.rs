//! Type definitions

mod credential;
mod selector;

pub use credential::Credential;
pub use selector::{ItemAttributes, ItemClass, ItemKey, RawItem, Selector, StoredItem};
