use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{VaultError, VaultResult};

/// Top-level configuration (loaded from chunkvault.toml).
///
/// Constructed once at process start and passed by reference into each
/// pipeline invocation; there is no process-wide singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub storage: StorageConfig,
    pub metadata: MetadataConfig,
    pub kdf: KdfConfig,
    /// Log level (default: info)
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// S3-compatible endpoint
    pub endpoint: String,
    /// S3 region (default: us-east-1)
    pub region: String,
    /// Bucket holding container blobs
    pub bucket: String,
    /// Access key id; falls back to AWS_ACCESS_KEY_ID if empty
    pub access_key_id: String,
    /// Secret access key; falls back to AWS_SECRET_ACCESS_KEY if empty
    pub secret_access_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            region: "us-east-1".to_string(),
            bucket: "chunkvault".to_string(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Directory holding per-file metadata records (default: ./metadata)
    pub dir: PathBuf,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("metadata"),
        }
    }
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfConfig {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 3)
    pub time_cost: u32,
    /// Parallelism (default: 4)
    pub parallelism: u32,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            mem_cost_kib: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl VaultConfig {
    /// Load configuration from a TOML file. A missing file yields the
    /// defaults; a present but unparseable file is a config error.
    pub fn load(path: &Path) -> VaultResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| VaultError::Config(format!("reading {}: {e}", path.display())))?;
        toml::from_str(&text)
            .map_err(|e| VaultError::Config(format!("parsing {}: {e}", path.display())))
    }

    /// Resolve storage credentials, falling back to the conventional AWS
    /// environment variables. Missing credentials are a config error.
    pub fn storage_credentials(&self) -> VaultResult<(String, String)> {
        let access = non_empty(&self.storage.access_key_id)
            .or_else(|| std::env::var("AWS_ACCESS_KEY_ID").ok())
            .ok_or_else(|| VaultError::Config("missing storage access key id".to_string()))?;
        let secret = non_empty(&self.storage.secret_access_key)
            .or_else(|| std::env::var("AWS_SECRET_ACCESS_KEY").ok())
            .ok_or_else(|| VaultError::Config("missing storage secret access key".to_string()))?;
        Ok((access, secret))
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = VaultConfig::load(Path::new("/nonexistent/chunkvault.toml")).unwrap();
        assert_eq!(cfg.storage.region, "us-east-1");
        assert_eq!(cfg.kdf.time_cost, 3);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunkvault.toml");
        std::fs::write(
            &path,
            "[storage]\nbucket = \"blobs\"\n\n[kdf]\ntime_cost = 1\n",
        )
        .unwrap();

        let cfg = VaultConfig::load(&path).unwrap();
        assert_eq!(cfg.storage.bucket, "blobs");
        assert_eq!(cfg.storage.region, "us-east-1", "unset keys take defaults");
        assert_eq!(cfg.kdf.time_cost, 1);
        assert_eq!(cfg.kdf.parallelism, 4);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunkvault.toml");
        std::fs::write(&path, "storage = [not toml").unwrap();

        let err = VaultConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::VaultError::Config(_)));
    }

    #[test]
    fn explicit_credentials_win() {
        let cfg = VaultConfig {
            storage: StorageConfig {
                access_key_id: "key".to_string(),
                secret_access_key: "secret".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let (access, secret) = cfg.storage_credentials().unwrap();
        assert_eq!(access, "key");
        assert_eq!(secret, "secret");
    }
}
