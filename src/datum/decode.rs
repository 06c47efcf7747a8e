//! Generic CBOR decoding with ciborium.

use crate::error::{Error, Result};
use ciborium::Value;

/// Decode CBOR bytes into a generic value tree.
///
/// Trailing bytes after the first complete item are rejected so a truncated
/// paste is not silently accepted as a shorter datum.
pub fn decode_cbor(bytes: &[u8]) -> Result<Value> {
    if bytes.is_empty() {
        return Err(Error::DecodeFailed("empty input".to_string()));
    }

    let mut reader = bytes;
    let value: Value =
        ciborium::from_reader(&mut reader).map_err(|e| Error::DecodeFailed(e.to_string()))?;

    if !reader.is_empty() {
        return Err(Error::DecodeFailed(format!(
            "{} trailing byte(s) after datum",
            reader.len()
        )));
    }

    Ok(value)
}
