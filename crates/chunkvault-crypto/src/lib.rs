//! chunkvault-crypto: the chunk-framing and authenticated-encryption core
//!
//! Pipeline: plaintext → fixed-size chunks → per-chunk XChaCha20-Poly1305 →
//! length-prefixed container blob.
//!
//! Container wire format (binary, big-endian):
//! ```text
//! record* := len(nonce):u32 len(tag):u32 len(ciphertext):u32 nonce tag ciphertext
//! blob    := record*        // no header, no trailing marker; EOF = end of blob
//! ```
//!
//! The key is derived per operation from (password, salt) via Argon2id; the
//! salt travels in the cleartext metadata record, the key never leaves the
//! invocation that derived it.

pub mod chunker;
pub mod cipher;
pub mod container;
pub mod kdf;

pub use chunker::{chunk_count, split_chunks};
pub use cipher::{decrypt_chunk, encrypt_chunk, EncryptedChunk};
pub use container::{deserialize_container, serialize_container};
pub use kdf::{derive_key, generate_salt, ChunkKey, KdfParams};
