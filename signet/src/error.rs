use thiserror::Error;

use crate::crypto::CryptoError;

pub type Result<T> = std::result::Result<T, SignetError>;

#[derive(Debug, Error)]
pub enum SignetError {
    // Medium discovery errors
    #[error("No removable medium is attached")]
    MediumNotFound,
    #[error("More than one removable medium is attached")]
    MediumAmbiguous,
    #[error("No wrapped key found on the medium")]
    KeyNotFoundOnMedium,

    // Document format errors
    #[error("Document is too short to contain a signature")]
    MalformedSignedDocument,

    // Wrapped errors
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
