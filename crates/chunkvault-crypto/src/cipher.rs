//! Per-chunk XChaCha20-Poly1305 encryption/decryption
//!
//! Each chunk is encrypted independently under the derived key with a fresh
//! random 24-byte nonce, producing a `(nonce, tag, ciphertext)` record.
//! Ciphertext length equals plaintext length (no padding); the 16-byte
//! Poly1305 tag is kept as a separate field because the container format
//! frames all three parts with explicit lengths.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;

use chunkvault_core::{VaultError, VaultResult, NONCE_SIZE, TAG_SIZE};

use crate::kdf::ChunkKey;

/// One encrypted chunk: the triple that gets framed into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedChunk {
    pub nonce: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Encrypt a single chunk with XChaCha20-Poly1305.
///
/// Draws a fresh random nonce from the thread-local CSPRNG on every call, so
/// no two chunks are ever encrypted under the same (key, nonce) pair.
pub fn encrypt_chunk(chunk: &[u8], key: &ChunkKey) -> VaultResult<EncryptedChunk> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);

    // The aead API returns ciphertext with the tag appended; split it off
    // into its own field for framing.
    let mut ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), chunk)
        .map_err(|e| VaultError::Other(anyhow::anyhow!("chunk encryption failed: {e}")))?;

    let tag_start = ciphertext.len() - TAG_SIZE;
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&ciphertext[tag_start..]);
    ciphertext.truncate(tag_start);

    Ok(EncryptedChunk {
        nonce,
        tag,
        ciphertext,
    })
}

/// Decrypt a single chunk, verifying its authentication tag.
///
/// All-or-nothing: on tag mismatch no plaintext is released and the error is
/// `VaultError::Authentication`. A wrong password (wrong derived key) and
/// tampered data are deliberately indistinguishable.
pub fn decrypt_chunk(record: &EncryptedChunk, key: &ChunkKey) -> VaultResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    let mut combined = Vec::with_capacity(record.ciphertext.len() + TAG_SIZE);
    combined.extend_from_slice(&record.ciphertext);
    combined.extend_from_slice(&record.tag);

    cipher
        .decrypt(XNonce::from_slice(&record.nonce), combined.as_slice())
        .map_err(|_| VaultError::Authentication)
}
