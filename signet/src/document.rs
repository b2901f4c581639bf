//! The signed-document format: original bytes with a fixed-length detached
//! signature appended.
//!
//! There is no framing and no length prefix. The signature length is a
//! static constant determined by the key modulus, known to both signer and
//! verifier, so a signed document is split by counting
//! [`SIGNATURE_LEN`] bytes from the end.

use rsa::RsaPublicKey;

use crate::{
    constants::SIGNATURE_LEN,
    crypto::{self, SigningKeyPair},
    error::SignetError,
};

/// Sign `document` and return the signed form: the original bytes with the
/// signature appended verbatim.
///
/// Append-only; the document content is never altered.
pub fn sign(document: &[u8], key_pair: &SigningKeyPair) -> Result<Vec<u8>, SignetError> {
    let signature = key_pair.sign(document)?;
    debug_assert_eq!(signature.len(), SIGNATURE_LEN);

    let mut signed = Vec::with_capacity(document.len() + signature.len());
    signed.extend_from_slice(document);
    signed.extend_from_slice(&signature);
    Ok(signed)
}

/// Split a signed document into its body and trailing signature.
///
/// Fails closed with [`SignetError::MalformedSignedDocument`] when the
/// input is too short to contain a signature block.
pub fn split_signed(signed: &[u8]) -> Result<(&[u8], &[u8]), SignetError> {
    if signed.len() < SIGNATURE_LEN {
        return Err(SignetError::MalformedSignedDocument);
    }
    Ok(signed.split_at(signed.len() - SIGNATURE_LEN))
}

/// Verify a signed document against `public_key`.
///
/// `Ok(false)` is the cryptographic-mismatch outcome and is distinct from
/// the [`SignetError::MalformedSignedDocument`] error for inputs that
/// cannot contain a signature at all. Pure; no side effects.
pub fn verify(signed: &[u8], public_key: &RsaPublicKey) -> Result<bool, SignetError> {
    let (body, signature) = split_signed(signed)?;
    Ok(crypto::verify_detached(public_key, body, signature))
}
