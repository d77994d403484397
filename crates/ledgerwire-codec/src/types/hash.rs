//! Hex-shaped values: fixed-width hashes, blobs and hash vectors.

use serde_json::Value;

use crate::error::{CodecError, DecodeError};

/// Parses exactly `N` bytes of hex.
pub(crate) fn hash_from_json<const N: usize>(field: &str, json: &Value) -> Result<[u8; N], CodecError> {
    let text = json
        .as_str()
        .ok_or_else(|| CodecError::invalid_field(field, "expected a hex string"))?;
    if text.len() != N * 2 {
        return Err(CodecError::invalid_field(
            field,
            format!("expected {} hex digits, got {}", N * 2, text.len()),
        ));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(text, &mut out)
        .map_err(|e| CodecError::invalid_field(field, e.to_string()))?;
    Ok(out)
}

/// Parses hex of any even length.
pub(crate) fn blob_from_json(field: &str, json: &Value) -> Result<Vec<u8>, CodecError> {
    let text = json
        .as_str()
        .ok_or_else(|| CodecError::invalid_field(field, "expected a hex string"))?;
    hex::decode(text).map_err(|e| CodecError::invalid_field(field, e.to_string()))
}

pub(crate) fn hex_to_json(bytes: &[u8]) -> Value {
    Value::String(hex::encode_upper(bytes))
}

/// Parses an array of 256-bit hashes.
pub(crate) fn vector256_from_json(field: &str, json: &Value) -> Result<Vec<[u8; 32]>, CodecError> {
    json.as_array()
        .ok_or_else(|| CodecError::invalid_field(field, "expected an array of hashes"))?
        .iter()
        .map(|item| hash_from_json::<32>(field, item))
        .collect()
}

pub(crate) fn vector256_to_json(hashes: &[[u8; 32]]) -> Value {
    Value::Array(hashes.iter().map(|h| hex_to_json(h)).collect())
}

/// Splits a length-framed payload into 32-byte hashes.
pub(crate) fn vector256_from_bytes(field: &str, bytes: &[u8]) -> Result<Vec<[u8; 32]>, DecodeError> {
    if bytes.len() % 32 != 0 {
        return Err(DecodeError::invalid_value(
            field,
            format!("{} bytes is not a whole number of hashes", bytes.len()),
        ));
    }
    Ok(bytes
        .chunks_exact(32)
        .map(|chunk| {
            let mut hash = [0u8; 32];
            hash.copy_from_slice(chunk);
            hash
        })
        .collect())
}
