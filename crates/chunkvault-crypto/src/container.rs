//! Container framing: encrypted chunk records ↔ one linear blob
//!
//! Each record is framed as three big-endian u32 length fields followed by
//! the nonce, tag, and ciphertext bytes. There is no header and no record
//! count; the count travels in the metadata record, and end-of-blob is
//! detected by the remaining byte count reaching zero — never by a sentinel
//! length value. A zero-length ciphertext is invalid by definition: empty
//! sources produce an empty blob, so no record ever frames an empty chunk.

use chunkvault_core::{VaultError, VaultResult, NONCE_SIZE, TAG_SIZE};

use crate::cipher::EncryptedChunk;

/// Bytes of framing overhead per record: three u32 length fields.
const LEN_FIELDS: usize = 12;

/// Serialize the ordered records into a single container blob.
pub fn serialize_container(records: &[EncryptedChunk]) -> Vec<u8> {
    let total: usize = records
        .iter()
        .map(|r| LEN_FIELDS + NONCE_SIZE + TAG_SIZE + r.ciphertext.len())
        .sum();

    let mut blob = Vec::with_capacity(total);
    for record in records {
        // Part lengths are bounded by NONCE_SIZE / TAG_SIZE / CHUNK_SIZE,
        // all far below u32::MAX.
        blob.extend_from_slice(&(record.nonce.len() as u32).to_be_bytes());
        blob.extend_from_slice(&(record.tag.len() as u32).to_be_bytes());
        blob.extend_from_slice(&(record.ciphertext.len() as u32).to_be_bytes());
        blob.extend_from_slice(&record.nonce);
        blob.extend_from_slice(&record.tag);
        blob.extend_from_slice(&record.ciphertext);
    }
    blob
}

/// Parse a container blob back into its ordered records.
///
/// Fails with `VaultError::Framing` on any malformed input: a truncated
/// length prefix, a length field exceeding the remaining bytes, lengths that
/// do not match the cipher's nonce/tag sizes, or a zero-length ciphertext.
pub fn deserialize_container(blob: &[u8]) -> VaultResult<Vec<EncryptedChunk>> {
    let mut records = Vec::new();
    let mut cursor = Cursor::new(blob);

    while cursor.remaining() > 0 {
        let nonce_len = cursor.read_u32("nonce length")? as usize;
        let tag_len = cursor.read_u32("tag length")? as usize;
        let ciphertext_len = cursor.read_u32("ciphertext length")? as usize;

        if nonce_len != NONCE_SIZE {
            return Err(VaultError::Framing(format!(
                "record {}: nonce length {nonce_len}, expected {NONCE_SIZE}",
                records.len()
            )));
        }
        if tag_len != TAG_SIZE {
            return Err(VaultError::Framing(format!(
                "record {}: tag length {tag_len}, expected {TAG_SIZE}",
                records.len()
            )));
        }
        if ciphertext_len == 0 {
            return Err(VaultError::Framing(format!(
                "record {}: zero-length ciphertext (empty chunks are never framed)",
                records.len()
            )));
        }

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(cursor.read_bytes(nonce_len, "nonce")?);
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(cursor.read_bytes(tag_len, "tag")?);
        let ciphertext = cursor.read_bytes(ciphertext_len, "ciphertext")?.to_vec();

        records.push(EncryptedChunk {
            nonce,
            tag,
            ciphertext,
        });
    }

    Ok(records)
}

/// Bounds-checked reader over the blob with explicit remaining-byte tracking.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u32(&mut self, what: &str) -> VaultResult<u32> {
        let bytes = self.read_bytes(4, what)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_bytes(&mut self, len: usize, what: &str) -> VaultResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(VaultError::Framing(format!(
                "truncated {what} at offset {}: need {len} bytes, {} remain",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}
