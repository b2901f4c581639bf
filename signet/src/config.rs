use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{constants, error::SignetError};

/// Locations and names of the persisted artifacts.
///
/// The defaults reproduce the artifact names the format was defined with;
/// overriding `wrapped_key_file` makes previously written media unreadable,
/// so it is a deployment-time decision, not a per-operation one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case", default)]
pub struct Config {
    /// Where the plaintext public key is exported at enrollment, and read
    /// from at verification unless the caller names another key.
    pub public_key_path: PathBuf,
    /// Name of the wrapped-key file on the removable medium.
    pub wrapped_key_file: String,
    /// Suffix inserted before the extension of signed document names.
    pub signed_name_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_key_path: PathBuf::from(constants::PUBLIC_KEY_FILE),
            wrapped_key_file: constants::WRAPPED_KEY_FILE.to_string(),
            signed_name_suffix: constants::SIGNED_NAME_SUFFIX.to_string(),
        }
    }
}

impl Config {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Config, SignetError> {
        let config_string = std::fs::read_to_string(config_path)?;
        Self::from_str(&config_string)
    }
}

impl FromStr for Config {
    type Err = SignetError;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(config_string)?;
        Ok(config)
    }
}
