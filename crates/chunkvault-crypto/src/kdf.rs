//! Key derivation: Argon2id (password, salt) → chunk encryption key

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroize;

use chunkvault_core::{VaultError, VaultResult, KEY_SIZE, SALT_SIZE};

/// A 256-bit symmetric key derived from a password and salt.
///
/// Zeroized on drop to prevent secrets lingering in memory. Owned by the
/// pipeline invocation that derived it; never persisted or shared.
#[derive(Clone)]
pub struct ChunkKey {
    bytes: [u8; KEY_SIZE],
}

impl ChunkKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for ChunkKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for ChunkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Argon2id cost parameters
#[derive(Debug, Clone)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 3)
    pub time_cost: u32,
    /// Parallelism (default: 4)
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            mem_cost_kib: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl From<&chunkvault_core::config::KdfConfig> for KdfParams {
    fn from(cfg: &chunkvault_core::config::KdfConfig) -> Self {
        Self {
            mem_cost_kib: cfg.mem_cost_kib,
            time_cost: cfg.time_cost,
            parallelism: cfg.parallelism,
        }
    }
}

/// Generate a fresh random salt.
///
/// Called once per encryption; the salt is stored in cleartext alongside the
/// other metadata (it needs uniqueness, not secrecy).
pub fn generate_salt() -> [u8; SALT_SIZE] {
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Derive a 256-bit chunk encryption key from a password and salt using
/// Argon2id.
///
/// Deterministic: the same (password, salt, params) triple always yields the
/// same key, across processes. An empty password is accepted and produces a
/// weak but valid key.
pub fn derive_key(
    password: &SecretString,
    salt: &[u8; SALT_SIZE],
    params: &KdfParams,
) -> VaultResult<ChunkKey> {
    let argon2_params = Params::new(
        params.mem_cost_kib,
        params.time_cost,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| VaultError::Config(format!("invalid Argon2id params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), salt, &mut key)
        .map_err(|e| VaultError::Other(anyhow::anyhow!("Argon2id KDF failed: {e}")))?;

    Ok(ChunkKey::from_bytes(key))
}
