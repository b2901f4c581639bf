mod cli;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use signet::{
    api,
    config::Config,
    crypto::Pin,
    medium::{self, RemovableMedium},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .without_time()
        .init();

    let config = cli.config()?;
    match cli.command {
        cli::Command::Generate => generate(&config),
        cli::Command::Sign { document } => sign(&document, &config),
        cli::Command::Verify {
            document,
            public_key,
        } => verify(&document, public_key.as_deref(), &config),
        cli::Command::Locate => locate(),
    }
}

fn generate(config: &Config) -> anyhow::Result<()> {
    let pin = prompt_pin(true)?;

    let mut rng = StdRng::from_entropy();
    info!("generating a 4096-bit key pair, this can take a while");
    let _ = api::generate_and_persist_keys(&mut rng, &pin, config)
        .context("enrollment failed")?;

    println!(
        "Public key exported to {}; wrapped private key stored on the medium.",
        config.public_key_path.display()
    );
    Ok(())
}

fn sign(document: &Path, config: &Config) -> anyhow::Result<()> {
    let pin = prompt_pin(false)?;

    let key_pair =
        api::locate_and_unwrap(&pin, config).context("could not unwrap the signing key")?;
    let output = api::sign_file(document, &key_pair, config)?;

    println!("Signed document written to {}", output.display());
    Ok(())
}

fn verify(document: &Path, public_key: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    let public_key_path = public_key.unwrap_or(&config.public_key_path);

    if api::verify_file(document, public_key_path)? {
        println!("Signature OK");
        Ok(())
    } else {
        println!("Signature INVALID");
        std::process::exit(1);
    }
}

fn locate() -> anyhow::Result<()> {
    match medium::locate() {
        RemovableMedium::None => println!("No removable medium attached."),
        RemovableMedium::One(mount) => println!("Removable medium at {}", mount.display()),
        RemovableMedium::Many => {
            println!("More than one removable medium attached; refusing to pick one.")
        }
    }
    Ok(())
}

fn prompt_pin(confirm: bool) -> anyhow::Result<Pin> {
    let entered = rpassword::prompt_password("PIN (4 digits): ")?;
    if confirm {
        let repeated = rpassword::prompt_password("Repeat PIN: ")?;
        if entered != repeated {
            anyhow::bail!("PINs do not match");
        }
    }
    Ok(Pin::new(&entered)?)
}
