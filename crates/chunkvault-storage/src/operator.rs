//! OpenDAL Operator factory for the blob store backend

use opendal::Operator;

use chunkvault_core::config::StorageConfig;
use chunkvault_core::{VaultError, VaultResult};

/// Build an OpenDAL Operator for an S3-compatible endpoint.
///
/// Uses path-style addressing (the opendal default), which is what MinIO and
/// SeaweedFS expect. Transient transport failures are retried inside the
/// operator; the pipelines themselves never retry.
pub fn build_operator(
    cfg: &StorageConfig,
    access_key_id: &str,
    secret_access_key: &str,
) -> VaultResult<Operator> {
    let builder = opendal::services::S3::default()
        .endpoint(&cfg.endpoint)
        .region(&cfg.region)
        .bucket(&cfg.bucket)
        .access_key_id(access_key_id)
        .secret_access_key(secret_access_key);

    let op = Operator::new(builder)
        .map_err(|e| VaultError::Config(format!("creating S3 operator: {e}")))?
        .layer(opendal::layers::LoggingLayer::default())
        .layer(
            opendal::layers::RetryLayer::new()
                .with_max_times(5)
                .with_jitter(),
        )
        .finish();

    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_operator_valid() {
        let cfg = StorageConfig {
            endpoint: "http://localhost:9000".to_string(),
            region: "us-east-1".to_string(),
            bucket: "test-bucket".to_string(),
            ..Default::default()
        };
        assert!(build_operator(&cfg, "test-key", "test-secret").is_ok());
    }
}
