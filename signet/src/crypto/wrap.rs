use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{CryptoRng, Rng, RngCore};
use zeroize::Zeroizing;

use crate::{
    constants::CIPHER_BLOCK_LEN,
    crypto::{CryptoError, Pin, SigningKeyPair},
};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// A private key wrapped under a PIN-derived key.
///
/// This is the exact artifact persisted to the removable medium: a fresh
/// 16-byte IV followed by the AES-256-CBC ciphertext of the PKCS#7-padded
/// PKCS#1 PEM serialization of the private key. The ciphertext is always a
/// non-zero multiple of the cipher block size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedSigningKey {
    iv: [u8; CIPHER_BLOCK_LEN],
    ciphertext: Vec<u8>,
}

impl WrappedSigningKey {
    /// Wrap the private half of `key_pair` under `pin`.
    ///
    /// A fresh random IV is drawn from `rng` on every call. Wrapping is pure
    /// with respect to storage; callers persist the result through
    /// [`crate::storage`] so the medium ambiguity check can gate the write.
    pub fn wrap(
        rng: &mut (impl CryptoRng + RngCore),
        key_pair: &SigningKeyPair,
        pin: &Pin,
    ) -> Result<Self, CryptoError> {
        let derived = pin.derive_key();

        let mut iv = [0; CIPHER_BLOCK_LEN];
        rng.fill(&mut iv);

        let plaintext = key_pair.private_key_pem()?;
        let ciphertext = Aes256CbcEnc::new(derived.as_bytes().into(), (&iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        Ok(Self { iv, ciphertext })
    }

    /// Unwrap the private key with `pin`.
    ///
    /// A wrong PIN, a corrupted blob and a truncated blob are deliberately
    /// indistinguishable: every failure between decryption and key parsing
    /// collapses to [`CryptoError::UnwrapFailed`], so error output cannot be
    /// used as a PIN-guessing oracle.
    pub fn unwrap_with(&self, pin: &Pin) -> Result<SigningKeyPair, CryptoError> {
        let derived = pin.derive_key();

        let plaintext = Zeroizing::new(
            Aes256CbcDec::new(derived.as_bytes().into(), (&self.iv).into())
                .decrypt_padded_vec_mut::<Pkcs7>(&self.ciphertext)
                .map_err(|_| CryptoError::UnwrapFailed)?,
        );

        let pem = std::str::from_utf8(&plaintext).map_err(|_| CryptoError::UnwrapFailed)?;
        SigningKeyPair::from_private_key_pem(pem)
    }

    /// The initialization vector prefix.
    pub fn iv(&self) -> &[u8; CIPHER_BLOCK_LEN] {
        &self.iv
    }

    /// The ciphertext following the IV.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

/// Serialize to the on-medium layout: `IV || CIPHERTEXT`.
impl From<WrappedSigningKey> for Vec<u8> {
    fn from(wrapped: WrappedSigningKey) -> Self {
        wrapped
            .iv
            .into_iter()
            .chain(wrapped.ciphertext)
            .collect()
    }
}

/// Parse the on-medium layout.
///
/// A blob too short to hold an IV and one ciphertext block, or whose
/// ciphertext is not block-aligned, cannot have been produced by
/// [`WrappedSigningKey::wrap`]; it reads as corrupted and therefore as
/// [`CryptoError::UnwrapFailed`], the same kind a wrong PIN produces.
impl TryFrom<Vec<u8>> for WrappedSigningKey {
    type Error = CryptoError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.len() < CIPHER_BLOCK_LEN * 2 {
            return Err(CryptoError::UnwrapFailed);
        }

        let (iv_bytes, ciphertext) = bytes.split_at(CIPHER_BLOCK_LEN);
        if ciphertext.len() % CIPHER_BLOCK_LEN != 0 {
            return Err(CryptoError::UnwrapFailed);
        }

        let mut iv = [0; CIPHER_BLOCK_LEN];
        iv.copy_from_slice(iv_bytes);
        Ok(Self {
            iv,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
