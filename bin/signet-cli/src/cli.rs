//! Command-line arguments

use clap::{Parser, Subcommand};
use signet::config::Config;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "signet",
    about = "Offline document signing with a removable-medium key"
)]
pub struct Cli {
    /// Location of the config file.
    /// Built-in artifact names and paths are used when not provided.
    #[clap(long)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a key pair, export the public key and store the wrapped
    /// private key on the attached removable medium.
    Generate,
    /// Sign a document with the key stored on the removable medium.
    Sign {
        /// Document to sign.
        document: PathBuf,
    },
    /// Check the signature appended to a signed document.
    Verify {
        /// Signed document to check.
        document: PathBuf,
        /// Public key to check against. Defaults to the configured export
        /// location.
        #[clap(long)]
        public_key: Option<PathBuf>,
    },
    /// Report the removable-medium discovery state.
    Locate,
}

impl Cli {
    pub fn config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Ok(Config::load(path)?),
            None => Ok(Config::default()),
        }
    }
}
