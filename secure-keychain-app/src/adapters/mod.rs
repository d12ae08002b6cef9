//! Platform secure store adapters.

#[cfg(feature = "keyring-store")]
mod keyring_secure_store;

#[cfg(feature = "keyring-store")]
pub use keyring_secure_store::KeyringSecureStore;
