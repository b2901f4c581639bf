//! Application-specific cryptographic types and operations.
//!
//! Defines the signing key pair, the PIN and its derived wrapping key, and
//! the wrapped (PIN-encrypted) form of the private key. Public functions
//! here are wrappers around the low-level cryptographic steps; persistence
//! of the resulting artifacts lives in [`crate::storage`].

use thiserror::Error;

mod pin;
mod signing;
mod wrap;

pub use pin::{DerivedKey, Pin};
pub use signing::{public_key_from_pem, verify_detached, SigningKeyPair};
pub use wrap::WrappedSigningKey;

#[cfg(test)]
pub(crate) use signing::test_fixtures;

/// Errors that arise in the cryptography module.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("PIN must be exactly 4 ASCII digits")]
    InvalidPin,
    #[error("Key generation failed")]
    KeyGenerationFailed,
    #[error("Could not unwrap the private key")]
    UnwrapFailed,
    #[error("Signing failed")]
    SigningFailed,
    #[error("Conversion error")]
    ConversionError,
}
