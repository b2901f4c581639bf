use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

use crate::{
    constants::{DERIVED_KEY_LEN, PIN_LEN},
    crypto::CryptoError,
};

/// A user-supplied PIN: exactly four ASCII decimal digits.
///
/// The PIN is the knowledge factor paired with possession of the removable
/// medium. It is never persisted, lives only for the duration of a single
/// wrap or unwrap call, and is zeroized on drop.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct Pin([u8; PIN_LEN]);

impl Pin {
    /// Parse and validate a PIN.
    ///
    /// Anything that is not exactly four ASCII decimal digits is rejected
    /// with [`CryptoError::InvalidPin`] before any key material is touched.
    pub fn new(pin: &str) -> Result<Self, CryptoError> {
        let bytes = pin.as_bytes();
        if bytes.len() != PIN_LEN || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(CryptoError::InvalidPin);
        }

        let mut digits = [0; PIN_LEN];
        digits.copy_from_slice(bytes);
        Ok(Self(digits))
    }

    /// Derive the symmetric wrapping key from this PIN.
    ///
    /// A single unsalted SHA-256 pass over the PIN's byte encoding; the full
    /// 32-byte digest is used as the AES-256 key. The same PIN always
    /// derives the same key. The small PIN space is a property of the format
    /// carried by existing artifacts; possession of the medium is the
    /// primary barrier.
    pub fn derive_key(&self) -> DerivedKey {
        DerivedKey(Sha256::digest(self.0).into())
    }
}

impl std::str::FromStr for Pin {
    type Err = CryptoError;

    fn from_str(pin: &str) -> Result<Self, Self::Err> {
        Self::new(pin)
    }
}

impl std::fmt::Debug for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pin(****)")
    }
}

/// The AES-256 key derived from a [`Pin`].
///
/// Exists only for the duration of one wrap or unwrap call and is zeroized
/// on drop.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct DerivedKey([u8; DERIVED_KEY_LEN]);

impl DerivedKey {
    pub(super) fn as_bytes(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DerivedKey([REDACTED])")
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn four_digit_pins_are_accepted() {
        for pin in ["0000", "4321", "1234", "9999", "0090"] {
            assert!(Pin::new(pin).is_ok(), "rejected valid PIN {pin}");
        }
    }

    #[test]
    fn malformed_pins_are_rejected() {
        let bad = [
            "", "1", "123", "12345", "12a4", "1 34", "12.4", "-123", "12٣4", "١٢٣٤",
        ];
        for pin in bad {
            assert_eq!(Pin::new(pin), Err(CryptoError::InvalidPin), "accepted {pin:?}");
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = Pin::new("4321").unwrap().derive_key();
        let second = Pin::new("4321").unwrap().derive_key();
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_pins_derive_distinct_keys() {
        // The whole PIN space is only 10,000 values; the derived keys must
        // still all differ.
        let mut uniq = HashSet::new();
        assert!((0..100)
            .map(|n| Pin::new(&format!("{n:04}")).unwrap().derive_key())
            .all(|key| uniq.insert(key.as_bytes().to_vec())));
    }

    #[test]
    fn derived_key_matches_reference_digest() {
        // SHA-256("4321"), computed with a reference implementation.
        let expected = "fe2592b42a727e977f055947385b709cc82b16b9a87f88c6abf3900d65d0cdc3";
        let key = Pin::new("4321").unwrap().derive_key();
        assert_eq!(hex::encode(key.as_bytes()), expected);
    }

    #[test]
    fn pin_debug_output_is_redacted() {
        let pin = Pin::new("4321").unwrap();
        assert_eq!(format!("{pin:?}"), "Pin(****)");
    }
}
