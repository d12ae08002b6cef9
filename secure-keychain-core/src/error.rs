//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
///
/// Every non-success status coming back from the secure store ends up as one
/// of these variants. Nothing below the service layer swallows an error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum KeychainError {
    /// The targeted item does not exist
    #[error("Keychain item not found")]
    NotFound,

    /// A strict add targeted a slot that is already occupied
    #[error("Keychain item already exists")]
    AlreadyExists,

    /// An item was found but the named field could not be decoded
    #[error("Malformed keychain record: {0} is not valid UTF-8")]
    MalformedRecord(String),

    /// Any other status reported by the secure store
    #[error("Unhandled secure store status: {0}")]
    Unhandled(i32),

    /// Configuration rejected before any store access
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Blocking dispatch failed (app layer)
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl KeychainError {
    /// Whether it is expected behavior (item missing, slot occupied, rejected configuration), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotFound | Self::AlreadyExists | Self::InvalidConfig(_) => true,
            Self::MalformedRecord(_) | Self::Unhandled(_) | Self::TaskFailed(_) => false,
        }
    }

    /// Log a discarded error at the level `is_expected` picks.
    pub(crate) fn log_discarded(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Core layer Result type alias
pub type KeychainResult<T> = std::result::Result<T, KeychainError>;
