//! The operations exposed to front-ends.
//!
//! Each operation is synchronous and runs to completion on the calling
//! thread. Operations that touch the removable medium re-locate it
//! immediately before use and refuse both the zero-media and the
//! multiple-media case rather than guessing a device; the `*_at` forms take
//! an already-located medium root so the check visibly gates every entry
//! path (and so tests can run against a simulated medium directory).

use std::path::{Path, PathBuf};

use rand::{CryptoRng, RngCore};
use tracing::info;

use crate::{
    config::Config,
    crypto::{self, Pin, SigningKeyPair, WrappedSigningKey},
    document,
    error::SignetError,
    medium::{self, RemovableMedium},
    storage,
};

/// Resolve a discovery result to the single usable mount path.
fn require_one(located: RemovableMedium) -> Result<PathBuf, SignetError> {
    match located {
        RemovableMedium::None => Err(SignetError::MediumNotFound),
        RemovableMedium::One(mount) => Ok(mount),
        RemovableMedium::Many => Err(SignetError::MediumAmbiguous),
    }
}

/// Enroll: generate a key pair, export the public key in the clear, wrap
/// the private key under `pin` and store it on the sole attached medium.
///
/// Returns the exported public-key PEM. The plaintext private key is
/// dropped as soon as wrapping completes.
pub fn generate_and_persist_keys(
    rng: &mut (impl CryptoRng + RngCore),
    pin: &Pin,
    config: &Config,
) -> Result<String, SignetError> {
    let medium_root = require_one(medium::locate())?;
    generate_and_persist_keys_at(rng, pin, &medium_root, config)
}

/// [`generate_and_persist_keys`] against an already-located medium root.
///
/// The medium is checked before the key pair exists, so a refused store
/// never leaves a generated-but-unpersisted key behind.
pub fn generate_and_persist_keys_at(
    rng: &mut (impl CryptoRng + RngCore),
    pin: &Pin,
    medium_root: &Path,
    config: &Config,
) -> Result<String, SignetError> {
    let key_pair = SigningKeyPair::generate(rng)?;

    let public_pem = key_pair.public_key_pem()?;
    storage::store_public_key(&config.public_key_path, &public_pem)?;

    let _ = wrap_and_store_at(rng, &key_pair, pin, medium_root, config)?;
    info!("enrollment complete");
    Ok(public_pem)
}

/// Wrap `key_pair`'s private half under `pin` and store it on the sole
/// attached medium. Returns the path written on the medium.
pub fn wrap_and_store(
    rng: &mut (impl CryptoRng + RngCore),
    key_pair: &SigningKeyPair,
    pin: &Pin,
    config: &Config,
) -> Result<PathBuf, SignetError> {
    let medium_root = require_one(medium::locate())?;
    wrap_and_store_at(rng, key_pair, pin, &medium_root, config)
}

/// [`wrap_and_store`] against an already-located medium root.
pub fn wrap_and_store_at(
    rng: &mut (impl CryptoRng + RngCore),
    key_pair: &SigningKeyPair,
    pin: &Pin,
    medium_root: &Path,
    config: &Config,
) -> Result<PathBuf, SignetError> {
    let wrapped = WrappedSigningKey::wrap(rng, key_pair, pin)?;
    storage::store_wrapped_key(medium_root, &wrapped, &config.wrapped_key_file)
}

/// Locate the medium, load the wrapped key from it and unwrap with `pin`.
pub fn locate_and_unwrap(pin: &Pin, config: &Config) -> Result<SigningKeyPair, SignetError> {
    let medium_root = require_one(medium::locate())?;
    locate_and_unwrap_at(pin, &medium_root, config)
}

/// [`locate_and_unwrap`] against an already-located medium root.
pub fn locate_and_unwrap_at(
    pin: &Pin,
    medium_root: &Path,
    config: &Config,
) -> Result<SigningKeyPair, SignetError> {
    let key_path = medium::resolve_key_path(medium_root, &config.wrapped_key_file)
        .ok_or(SignetError::KeyNotFoundOnMedium)?;

    let wrapped = storage::load_wrapped_key(&key_path)?;
    Ok(wrapped.unwrap_with(pin)?)
}

/// Sign the document at `path` with `key_pair`, writing the signed form to
/// `<stem><suffix><extension>` beside it.
///
/// The original file is never touched; on any failure the output file is
/// not created, leaving prior state unchanged.
pub fn sign_file(
    path: &Path,
    key_pair: &SigningKeyPair,
    config: &Config,
) -> Result<PathBuf, SignetError> {
    let document_bytes = std::fs::read(path)?;
    let signed = document::sign(&document_bytes, key_pair)?;

    let output = signed_output_path(path, &config.signed_name_suffix);
    storage::store_signed_document(&output, &signed)?;

    info!(output = %output.display(), "signed document written");
    Ok(output)
}

/// Verify the signed document at `path` against the public key stored at
/// `public_key_path`.
pub fn verify_file(path: &Path, public_key_path: &Path) -> Result<bool, SignetError> {
    let signed = std::fs::read(path)?;
    let pem = storage::load_public_key(public_key_path)?;
    let public_key = crypto::public_key_from_pem(&pem)?;
    document::verify(&signed, &public_key)
}

fn signed_output_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(extension) => format!("{stem}{suffix}.{}", extension.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(file_name)
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::crypto::test_fixtures;

    fn test_config(public_key_dir: &Path) -> Config {
        Config {
            public_key_path: public_key_dir.join(crate::constants::PUBLIC_KEY_FILE),
            ..Config::default()
        }
    }

    #[test]
    fn require_one_refuses_everything_but_a_single_medium() {
        assert!(matches!(
            require_one(RemovableMedium::None),
            Err(SignetError::MediumNotFound)
        ));
        assert!(matches!(
            require_one(RemovableMedium::Many),
            Err(SignetError::MediumAmbiguous)
        ));

        let mount = PathBuf::from("/media/usb0");
        assert_eq!(require_one(RemovableMedium::One(mount.clone())).unwrap(), mount);
    }

    #[test]
    fn wrap_store_unwrap_scenario() -> Result<(), SignetError> {
        let medium = tempfile::tempdir()?;
        let config = Config::default();
        let mut rng = StdRng::from_entropy();
        let key_pair = test_fixtures::key_pair();
        let pin = Pin::new("4321")?;

        let _ = wrap_and_store_at(&mut rng, key_pair, &pin, medium.path(), &config)?;

        // Correct PIN recovers the key.
        let unwrapped = locate_and_unwrap_at(&pin, medium.path(), &config)?;
        assert_eq!(
            unwrapped.public_key_pem()?,
            key_pair.public_key_pem()?
        );

        // Wrong PIN is an unwrap failure, not a wrong key.
        let wrong = locate_and_unwrap_at(&Pin::new("1234")?, medium.path(), &config);
        assert!(matches!(
            wrong,
            Err(SignetError::Crypto(crate::crypto::CryptoError::UnwrapFailed))
        ));
        Ok(())
    }

    #[test]
    fn unwrapping_from_an_empty_medium_reports_a_missing_key() -> Result<(), SignetError> {
        let medium = tempfile::tempdir()?;
        let result = locate_and_unwrap_at(&Pin::new("4321")?, medium.path(), &Config::default());

        assert!(matches!(result, Err(SignetError::KeyNotFoundOnMedium)));
        Ok(())
    }

    #[test]
    fn signing_a_file_leaves_the_original_untouched() -> Result<(), SignetError> {
        let dir = tempfile::tempdir()?;
        let config = Config::default();
        let document_path = dir.path().join("report.txt");
        std::fs::write(&document_path, b"ten bytes!")?;

        let output = sign_file(&document_path, test_fixtures::key_pair(), &config)?;

        assert_eq!(output, dir.path().join("report_signed.txt"));
        assert_eq!(std::fs::read(&document_path)?, b"ten bytes!");
        assert_eq!(
            std::fs::read(&output)?.len(),
            10 + crate::constants::SIGNATURE_LEN
        );
        Ok(())
    }

    #[test]
    fn signed_files_verify_with_the_right_key_only() -> Result<(), SignetError> {
        let dir = tempfile::tempdir()?;
        let config = test_config(dir.path());
        let key_pair = test_fixtures::key_pair();

        let document_path = dir.path().join("contract.pdf");
        std::fs::write(&document_path, b"ten bytes!")?;
        let signed_path = sign_file(&document_path, key_pair, &config)?;

        storage::store_public_key(&config.public_key_path, &key_pair.public_key_pem()?)?;
        assert!(verify_file(&signed_path, &config.public_key_path)?);

        // A different key pair's public key must not verify it.
        let other_key_path = dir.path().join("other_public_key.pem");
        storage::store_public_key(
            &other_key_path,
            &test_fixtures::other_key_pair().public_key_pem()?,
        )?;
        assert!(!verify_file(&signed_path, &other_key_path)?);
        Ok(())
    }

    #[test]
    fn suffix_lands_before_the_extension() {
        assert_eq!(
            signed_output_path(Path::new("/tmp/doc.pdf"), "_signed"),
            PathBuf::from("/tmp/doc_signed.pdf")
        );
        assert_eq!(
            signed_output_path(Path::new("notes"), "_signed"),
            PathBuf::from("notes_signed")
        );
    }
}
