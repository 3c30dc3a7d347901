//! chunkvault-storage: OpenDAL storage collaborator
//!
//! The pipelines treat storage as an opaque `put(blob) -> handle` /
//! `get(handle) -> blob` pair. Handles are content-addressed (BLAKE3 of the
//! blob), so re-uploading identical content is idempotent.

pub mod blob;
pub mod operator;

pub use blob::BlobStore;
pub use operator::build_operator;
