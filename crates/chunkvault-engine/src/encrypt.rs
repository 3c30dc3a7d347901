//! Encrypt pipeline: bytes + password → stored blob + metadata record

use rand::RngCore;
use secrecy::SecretString;
use std::path::Path;

use chunkvault_core::VaultResult;
use chunkvault_crypto::{
    derive_key, encrypt_chunk, generate_salt, serialize_container, split_chunks, KdfParams,
};
use chunkvault_storage::BlobStore;

use crate::metadata::{FileMetadata, MetadataStore};

/// Result of a successful encryption.
#[derive(Debug, Clone)]
pub struct EncryptOutcome {
    /// Id under which the metadata record was saved
    pub file_id: String,
    pub metadata: FileMetadata,
}

/// Encrypt a file read from disk. An unreadable source aborts the pipeline
/// with an input error before anything is derived or uploaded.
pub async fn encrypt_path(
    path: &Path,
    password: &SecretString,
    kdf: &KdfParams,
    blobs: &BlobStore,
    store: &MetadataStore,
) -> VaultResult<EncryptOutcome> {
    let data = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());
    encrypt_bytes(&data, &filename, password, kdf, blobs, store).await
}

/// Encrypt an in-memory byte buffer.
///
/// Steps: fresh salt → derive key → chunk → encrypt each chunk in index
/// order → frame into one container blob → upload → save the metadata
/// record. The record is written last: a failed upload leaves no metadata
/// pointing at a blob that was never stored.
pub async fn encrypt_bytes(
    data: &[u8],
    original_filename: &str,
    password: &SecretString,
    kdf: &KdfParams,
    blobs: &BlobStore,
    store: &MetadataStore,
) -> VaultResult<EncryptOutcome> {
    let salt = generate_salt();
    let key = derive_key(password, &salt, kdf)?;

    let chunks = split_chunks(data);
    let num_chunks = chunks.len() as u64;

    let mut records = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        records.push(encrypt_chunk(chunk, &key)?);
    }

    let blob = serialize_container(&records);
    let storage_handle = blobs.put(blob).await?;

    let file_id = new_file_id();
    let metadata = FileMetadata {
        original_filename: original_filename.to_string(),
        salt: hex::encode(salt),
        num_chunks,
        storage_handle,
    };
    store.save(&file_id, &metadata)?;

    tracing::info!(
        %file_id,
        filename = original_filename,
        bytes = data.len(),
        chunks = num_chunks,
        "encrypted and uploaded file"
    );

    Ok(EncryptOutcome { file_id, metadata })
}

/// Random 8-byte hex id for the metadata record.
fn new_file_id() -> String {
    let mut id = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut id);
    hex::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_ids_are_hex_and_unique() {
        let a = new_file_id();
        let b = new_file_id();
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
