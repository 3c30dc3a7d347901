use thiserror::Error;

pub type VaultResult<T> = Result<T, VaultError>;

/// Failure taxonomy for the encrypt/decrypt pipelines.
///
/// Every variant is terminal to the operation that produced it: nothing is
/// retried inside the core, and no partial result is surfaced to the caller.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The source file is missing or unreadable.
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),

    /// The container blob is malformed: truncated length prefix, a length
    /// field exceeding the remaining bytes, or an invalid zero-length record.
    #[error("malformed container: {0}")]
    Framing(String),

    /// Tag verification failed. Wrong password and tampered data are
    /// indistinguishable here, which is the intended AEAD behavior.
    #[error("authentication failed: wrong password or corrupted data")]
    Authentication,

    /// The storage or metadata collaborator failed (upload, download,
    /// record not found).
    #[error("storage error: {0}")]
    Collaborator(String),

    /// Bad or missing configuration, including storage credentials.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
