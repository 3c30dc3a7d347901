//! chunkvault-core: shared types for the chunkvault workspace
//!
//! Holds the error taxonomy, the TOML configuration model, and the protocol
//! constants that every other crate agrees on.

pub mod config;
pub mod error;

pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};

/// Maximum plaintext chunk size in bytes.
///
/// Part of the container compatibility contract: changing this value breaks
/// decryption of previously produced containers, because chunk boundaries
/// are reconstructed from file size and this constant alone.
pub const CHUNK_SIZE: usize = 45_307;

/// Size of a derived encryption key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of a KDF salt in bytes
pub const SALT_SIZE: usize = 16;

/// Size of an XChaCha20-Poly1305 nonce (192-bit)
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;
