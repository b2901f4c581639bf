//! Constants shared between crates in this workspace.
//!
//! The file names and lengths here are load-bearing: they define the
//! on-medium and signed-document formats, so changing any of them breaks
//! compatibility with previously written artifacts.

/// Name of the wrapped private key file carried on the removable medium.
pub const WRAPPED_KEY_FILE: &str = "private_key_encrypted.pem";

/// Name of the exported plaintext public key file.
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";

/// Suffix inserted before the extension of a signed document's file name.
pub const SIGNED_NAME_SUFFIX: &str = "_signed";

/// Modulus size of generated RSA signing key pairs.
pub const RSA_MODULUS_BITS: usize = 4096;

/// Length of a detached signature: the modulus size in bytes.
pub const SIGNATURE_LEN: usize = RSA_MODULUS_BITS / 8;

/// AES block size. The wrap IV has this length and wrap ciphertexts are
/// always a non-zero multiple of it.
pub const CIPHER_BLOCK_LEN: usize = 16;

/// Length of the PIN-derived AES-256 key.
pub const DERIVED_KEY_LEN: usize = 32;

/// A PIN is exactly this many ASCII decimal digits.
pub const PIN_LEN: usize = 4;
