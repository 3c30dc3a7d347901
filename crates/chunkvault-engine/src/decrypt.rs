//! Decrypt pipeline: metadata record + blob + password → original bytes

use secrecy::SecretString;

use chunkvault_core::{VaultError, VaultResult};
use chunkvault_crypto::{decrypt_chunk, derive_key, deserialize_container, KdfParams};
use chunkvault_storage::BlobStore;

use crate::metadata::{FileMetadata, MetadataStore};

/// Reconstruct the original file for `file_id`.
///
/// Steps: load metadata → fetch the blob by stored handle → derive the key
/// from the stored salt and supplied password → parse records → decrypt each
/// in the order it was encrypted → concatenate. Any chunk failing
/// authentication aborts the whole operation; no partial plaintext is
/// returned, and wrong-password vs corrupted-blob is not distinguished.
pub async fn decrypt_file(
    file_id: &str,
    password: &SecretString,
    kdf: &KdfParams,
    blobs: &BlobStore,
    store: &MetadataStore,
) -> VaultResult<(FileMetadata, Vec<u8>)> {
    let metadata = store.load(file_id)?;
    let salt = metadata.salt_bytes()?;

    let blob = blobs.get(&metadata.storage_handle).await?;
    let key = derive_key(password, &salt, kdf)?;

    let records = deserialize_container(&blob)?;
    if records.len() as u64 != metadata.num_chunks {
        return Err(VaultError::Framing(format!(
            "container holds {} records, metadata says {}",
            records.len(),
            metadata.num_chunks
        )));
    }

    let mut plaintext = Vec::new();
    for record in &records {
        plaintext.extend_from_slice(&decrypt_chunk(record, &key)?);
    }

    tracing::info!(
        file_id,
        filename = %metadata.original_filename,
        bytes = plaintext.len(),
        chunks = metadata.num_chunks,
        "decrypted file"
    );

    Ok((metadata, plaintext))
}
