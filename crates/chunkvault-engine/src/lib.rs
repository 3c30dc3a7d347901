//! chunkvault-engine: pipeline orchestration
//!
//! Wires the crypto core to the storage and metadata collaborators:
//!
//! - encrypt: salt → Argon2id key → chunk → encrypt each chunk in order →
//!   frame into one blob → upload → write metadata record (last, so a failed
//!   upload never leaves a dangling record)
//! - decrypt: load metadata → fetch blob → Argon2id key from stored salt →
//!   parse records → decrypt in order → concatenate
//!
//! Each invocation owns its key, chunks, and buffers; nothing is shared
//! across invocations and nothing is retried here.

pub mod decrypt;
pub mod encrypt;
pub mod metadata;

pub use decrypt::decrypt_file;
pub use encrypt::{encrypt_bytes, encrypt_path, EncryptOutcome};
pub use metadata::{FileMetadata, MetadataStore};
