//! Reading and writing the persisted artifacts: the wrapped key on the
//! medium, the plaintext public key, and signed documents.
//!
//! Every write lands in a sibling temporary file first and is moved into
//! place with a rename, so an interrupted operation leaves either the old
//! artifact or the new one, never a partial file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{crypto::WrappedSigningKey, error::SignetError};

/// Write the wrapped key into `dir` under `file_name`, replacing any
/// previous enrollment's key.
pub fn store_wrapped_key(
    dir: &Path,
    wrapped: &WrappedSigningKey,
    file_name: &str,
) -> Result<PathBuf, SignetError> {
    let path = dir.join(file_name);
    let bytes: Vec<u8> = wrapped.clone().into();
    write_replacing(&path, &bytes)?;

    info!(path = %path.display(), "stored wrapped key");
    Ok(path)
}

/// Load a wrapped key from `path`.
pub fn load_wrapped_key(path: &Path) -> Result<WrappedSigningKey, SignetError> {
    let bytes = fs::read(path)?;
    Ok(WrappedSigningKey::try_from(bytes)?)
}

/// Export the plaintext public key PEM to `path`.
pub fn store_public_key(path: &Path, pem: &str) -> Result<(), SignetError> {
    write_replacing(path, pem.as_bytes())?;

    info!(path = %path.display(), "exported public key");
    Ok(())
}

/// Read a public key PEM from `path`.
pub fn load_public_key(path: &Path) -> Result<String, SignetError> {
    Ok(fs::read_to_string(path)?)
}

/// Write a signed document to `path`.
pub fn store_signed_document(path: &Path, signed: &[u8]) -> Result<(), SignetError> {
    write_replacing(path, signed)
}

fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), SignetError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes)?;
    if let Err(error) = fs::rename(&tmp, path) {
        // Don't leave the temp file behind next to the target.
        let _ = fs::remove_file(&tmp);
        return Err(error.into());
    }
    Ok(())
}
