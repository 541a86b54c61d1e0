//! Content hashing and object compression
//!
//! Objects are addressed by the SHA-1 digest of their raw bytes (no type header is mixed into
//! the hashed content) and stored zlib-compressed. [`decompress`] is the exact inverse of
//! [`compress`] for every byte sequence, including the empty one.

use crate::artifacts::objects::DIGEST_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Compute the content hash of `data`.
pub fn digest(data: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(data);
    let digest: [u8; DIGEST_LENGTH] = hasher.finalize().into();

    ObjectId::from_digest(&digest)
}

pub fn compress(data: &[u8]) -> Result<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;

    encoder
        .finish()
        .map(|compressed_content| compressed_content.into())
        .map_err(Error::from)
}

/// Reverse [`compress`]; malformed input is reported as [`Error::CorruptObject`].
///
/// The input must be exactly one zlib stream: bytes left over after the end of the stream
/// are corruption too.
pub fn decompress(data: &[u8]) -> Result<Bytes> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut decompressed_content = Vec::new();
    decoder
        .read_to_end(&mut decompressed_content)
        .map_err(|e| Error::corrupt_object(format!("unable to decompress content: {e}")))?;

    let consumed = decoder.total_in();
    if consumed != data.len() as u64 {
        return Err(Error::corrupt_object(format!(
            "{} trailing bytes after compressed content",
            data.len() as u64 - consumed
        )));
    }

    Ok(decompressed_content.into())
}
