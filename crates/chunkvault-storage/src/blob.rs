//! Content-addressed blob put/get over an OpenDAL operator

use opendal::Operator;

use chunkvault_core::{VaultError, VaultResult};

/// The storage collaborator: uploads and fetches opaque container blobs.
///
/// Owns nothing but the operator; one instance can serve any number of
/// independent pipeline invocations.
#[derive(Debug, Clone)]
pub struct BlobStore {
    op: Operator,
}

impl BlobStore {
    pub fn new(op: Operator) -> Self {
        Self { op }
    }

    /// Upload a container blob, returning its opaque storage handle.
    ///
    /// The handle is `blobs/{blake3-hex}` of the blob content, so uploading
    /// identical content twice is harmless.
    pub async fn put(&self, blob: Vec<u8>) -> VaultResult<String> {
        let handle = format!("blobs/{}", blake3::hash(&blob).to_hex());
        let len = blob.len();

        self.op
            .write(&handle, blob)
            .await
            .map_err(|e| VaultError::Collaborator(format!("uploading {handle}: {e}")))?;

        tracing::debug!(%handle, bytes = len, "uploaded container blob");
        Ok(handle)
    }

    /// Fetch a container blob by handle. Not-found and transport errors are
    /// both collaborator failures that abort the decrypt pipeline.
    pub async fn get(&self, handle: &str) -> VaultResult<Vec<u8>> {
        let buf = self
            .op
            .read(handle)
            .await
            .map_err(|e| VaultError::Collaborator(format!("fetching {handle}: {e}")))?;

        let blob = buf.to_vec();
        tracing::debug!(handle, bytes = blob.len(), "fetched container blob");
        Ok(blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> BlobStore {
        let op = Operator::new(opendal::services::Memory::default())
            .expect("memory operator")
            .finish();
        BlobStore::new(op)
    }

    #[tokio::test]
    async fn put_then_get_roundtrips() {
        let store = memory_store();
        let blob = vec![0xEFu8; 4096];

        let handle = store.put(blob.clone()).await.unwrap();
        assert!(handle.starts_with("blobs/"));

        let fetched = store.get(&handle).await.unwrap();
        assert_eq!(fetched, blob);
    }

    #[tokio::test]
    async fn identical_content_gets_identical_handle() {
        let store = memory_store();
        let h1 = store.put(b"same bytes".to_vec()).await.unwrap();
        let h2 = store.put(b"same bytes".to_vec()).await.unwrap();
        assert_eq!(h1, h2);
    }

    #[tokio::test]
    async fn missing_handle_is_collaborator_error() {
        let store = memory_store();
        let err = store.get("blobs/does-not-exist").await.unwrap_err();
        assert!(matches!(err, VaultError::Collaborator(_)));
    }
}
