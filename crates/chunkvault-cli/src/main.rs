//! chunkvault: password-based chunked file encryption CLI
//!
//! Commands:
//!   encrypt <file>        - encrypt a file, upload the container blob, print the file id
//!   decrypt <file_id>     - fetch, verify, and reconstruct a stored file
//!   info <file_id>        - print the cleartext metadata record

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::path::PathBuf;

use chunkvault_core::VaultConfig;
use chunkvault_crypto::KdfParams;
use chunkvault_engine::{decrypt_file, encrypt_path, MetadataStore};
use chunkvault_storage::{build_operator, BlobStore};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "chunkvault",
    version,
    about = "Password-based chunked file encryption",
    long_about = "chunkvault: encrypt files into self-describing containers stored \
                  in an S3-compatible object store, recoverable with only the password"
)]
struct Cli {
    /// Path to chunkvault.toml configuration file
    #[arg(long, short = 'c', env = "CHUNKVAULT_CONFIG", default_value = "chunkvault.toml")]
    config: PathBuf,

    /// Read the password from this environment variable instead of prompting
    #[arg(long, env = "CHUNKVAULT_PASSWORD_ENV")]
    password_env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a file and upload its container blob
    ///
    /// Storage credentials are read from the config file or from
    /// AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY.
    Encrypt {
        /// File to encrypt
        file: PathBuf,
    },

    /// Download and decrypt a previously encrypted file
    Decrypt {
        /// Id printed by `encrypt`
        file_id: String,
        /// Output path (default: the original filename in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show the metadata record for a file id
    Info {
        file_id: String,
    },
}

// ── Entry point ────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = VaultConfig::load(&cli.config)?;
    init_logging(&config.log_level);

    match cli.command {
        Commands::Encrypt { file } => cmd_encrypt(&config, &file, cli.password_env.as_deref()).await,
        Commands::Decrypt { file_id, output } => {
            cmd_decrypt(&config, &file_id, output, cli.password_env.as_deref()).await
        }
        Commands::Info { file_id } => cmd_info(&config, &file_id),
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default = if level.is_empty() { "info" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

// ── Commands ───────────────────────────────────────────────────────────────────

async fn cmd_encrypt(config: &VaultConfig, file: &PathBuf, password_env: Option<&str>) -> Result<()> {
    let (blobs, store) = build_collaborators(config)?;
    let password = read_password(password_env)?;
    let kdf = KdfParams::from(&config.kdf);

    let outcome = encrypt_path(file, &password, &kdf, &blobs, &store).await?;

    println!("file id:  {}", outcome.file_id);
    println!("chunks:   {}", outcome.metadata.num_chunks);
    println!("handle:   {}", outcome.metadata.storage_handle);
    Ok(())
}

async fn cmd_decrypt(
    config: &VaultConfig,
    file_id: &str,
    output: Option<PathBuf>,
    password_env: Option<&str>,
) -> Result<()> {
    let (blobs, store) = build_collaborators(config)?;
    let password = read_password(password_env)?;
    let kdf = KdfParams::from(&config.kdf);

    let (metadata, plaintext) = decrypt_file(file_id, &password, &kdf, &blobs, &store).await?;

    let out = output.unwrap_or_else(|| PathBuf::from(&metadata.original_filename));
    std::fs::write(&out, &plaintext)
        .with_context(|| format!("writing decrypted file to {}", out.display()))?;

    println!("wrote {} ({} bytes)", out.display(), plaintext.len());
    Ok(())
}

fn cmd_info(config: &VaultConfig, file_id: &str) -> Result<()> {
    let store = MetadataStore::new(&config.metadata.dir);
    let metadata = store.load(file_id)?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn build_collaborators(config: &VaultConfig) -> Result<(BlobStore, MetadataStore)> {
    let (access, secret) = config.storage_credentials()?;
    let op = build_operator(&config.storage, &access, &secret)?;
    Ok((
        BlobStore::new(op),
        MetadataStore::new(&config.metadata.dir),
    ))
}

fn read_password(password_env: Option<&str>) -> Result<SecretString> {
    if let Some(var) = password_env {
        let value = std::env::var(var)
            .with_context(|| format!("password environment variable {var} not set"))?;
        return Ok(SecretString::from(value));
    }
    let value = rpassword::prompt_password("Password: ").context("reading password")?;
    Ok(SecretString::from(value))
}
