//! Storage layer abstraction trait definition

mod secure_store;

pub use secure_store::{
    InMemorySecureStore, SecureStore, StoreOutcome, StoreStatus, LOCK_POISONED,
};
