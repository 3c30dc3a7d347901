//! Cleartext metadata records and their JSON-file store
//!
//! One record per encrypted file, written only after the blob upload
//! succeeds and never mutated afterwards. The record is not integrity
//! protected; only chunk payloads are authenticated.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use chunkvault_core::{VaultError, VaultResult, SALT_SIZE};

/// Everything needed (besides the password and the blob itself) to decrypt
/// a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Filename the bytes were encrypted under
    pub original_filename: String,
    /// KDF salt, hex-encoded (16 bytes; needs uniqueness, not secrecy)
    pub salt: String,
    /// Number of chunk records in the container blob
    pub num_chunks: u64,
    /// Opaque handle returned by the storage collaborator
    pub storage_handle: String,
}

impl FileMetadata {
    /// Decode the stored salt. A record with a malformed salt cannot decrypt
    /// anything, so it is rejected up front.
    pub fn salt_bytes(&self) -> VaultResult<[u8; SALT_SIZE]> {
        let bytes = hex::decode(&self.salt)
            .map_err(|e| VaultError::Collaborator(format!("invalid salt in metadata: {e}")))?;
        bytes.as_slice().try_into().map_err(|_| {
            VaultError::Collaborator(format!(
                "invalid salt in metadata: {} bytes, expected {SALT_SIZE}",
                bytes.len()
            ))
        })
    }
}

/// Key-value store for metadata records: one JSON file per id under a
/// configured directory.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    pub fn save(&self, id: &str, record: &FileMetadata) -> VaultResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| VaultError::Collaborator(format!("creating metadata dir: {e}")))?;

        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| VaultError::Collaborator(format!("encoding metadata: {e}")))?;
        let path = self.record_path(id);
        std::fs::write(&path, json)
            .map_err(|e| VaultError::Collaborator(format!("writing {}: {e}", path.display())))?;

        tracing::debug!(id, path = %path.display(), "saved metadata record");
        Ok(())
    }

    pub fn load(&self, id: &str) -> VaultResult<FileMetadata> {
        let path = self.record_path(id);
        let text = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VaultError::Collaborator(format!("no metadata record for id {id}"))
            } else {
                VaultError::Collaborator(format!("reading {}: {e}", path.display()))
            }
        })?;
        serde_json::from_str(&text)
            .map_err(|e| VaultError::Collaborator(format!("decoding {}: {e}", path.display())))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.record_path(id).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> FileMetadata {
        FileMetadata {
            original_filename: "report.pdf".to_string(),
            salt: hex::encode([7u8; SALT_SIZE]),
            num_chunks: 3,
            storage_handle: "blobs/abc123".to_string(),
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetadataStore::new(dir.path());
        let record = sample_record();

        store.save("f00dfeed", &record).unwrap();
        assert!(store.exists("f00dfeed"));
        assert_eq!(store.load("f00dfeed").unwrap(), record);
    }

    #[test]
    fn missing_record_is_collaborator_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetadataStore::new(dir.path());

        let err = store.load("cafebabe").unwrap_err();
        assert!(matches!(err, VaultError::Collaborator(_)));
        assert!(err.to_string().contains("cafebabe"));
    }

    #[test]
    fn salt_bytes_decodes_hex() {
        let record = sample_record();
        assert_eq!(record.salt_bytes().unwrap(), [7u8; SALT_SIZE]);
    }

    #[test]
    fn malformed_salt_is_rejected() {
        let mut record = sample_record();
        record.salt = "not-hex".to_string();
        assert!(record.salt_bytes().is_err());

        record.salt = hex::encode([1u8; 8]);
        assert!(record.salt_bytes().is_err(), "short salt must be rejected");
    }
}
