//! Canonical binary codec for ledger transactions and ledger objects.
//!
//! Documents are JSON objects keyed by field name. Encoding resolves every
//! key through the field definition registry, writes the fields in canonical
//! `(type code, field code)` order as header and value pairs, and renders the
//! result as hex. Decoding reverses this and rejects anything that is not
//! exactly the canonical form.
//!
//! The signing framings produce the byte sequences that get signed: each is
//! tagged with a four-byte prefix so that bytes meant for one context are
//! never valid in another.
//!
//! ```rust
//! use serde_json::json;
//!
//! let hex = ledgerwire_codec::encode(&json!({"Fee": "100"}))?;
//! assert_eq!(hex, "684000000000000064");
//! # Ok::<(), ledgerwire_codec::CodecError>(())
//! ```
#![deny(missing_docs)]

/// Top-level codec and signing framings.
pub mod codec;
/// Field definition registry.
pub mod definitions;
/// Error types.
pub mod error;
/// Field id headers.
pub mod field_id;
/// Signing and hashing prefixes.
pub mod hash_prefix;
/// Transaction id hashing.
pub mod hashing;
/// Length prefixes for variable-length values.
pub mod length;
/// Object and array serializers.
pub mod object;
/// Cursor over encoded bytes.
pub mod parser;
/// Per-type value serializers.
pub mod types;

pub use codec::BinaryCodec;
pub use definitions::{definitions, Definitions, FieldDefinition, FieldType, NameTable};
pub use error::{CodecError, DecodeError, DefinitionsError};
pub use field_id::FieldId;
pub use hash_prefix::HashPrefix;
pub use hashing::{sha512_half, Sha512Half, TransactionHasher};
pub use object::{ArrayElement, FieldEntry, StArray, StObject, MAX_NESTING_DEPTH};
pub use types::{Amount, Currency, FieldValue, Issue, IssuedAmount, IssuedValue, PathSet, PathStep};

pub use ledgerwire_address::{AccountId, AddressError};

use serde_json::Value;

/// Encodes a document with the embedded registry. See [`BinaryCodec::encode`].
pub fn encode(document: &Value) -> Result<String, CodecError> {
    BinaryCodec::new().encode(document)
}

/// Decodes hex with the embedded registry. See [`BinaryCodec::decode`].
pub fn decode(hex: &str) -> Result<Value, CodecError> {
    BinaryCodec::new().decode(hex)
}

/// See [`BinaryCodec::encode_for_signing`].
pub fn encode_for_signing(document: &Value) -> Result<String, CodecError> {
    BinaryCodec::new().encode_for_signing(document)
}

/// See [`BinaryCodec::encode_for_multi_signing`].
pub fn encode_for_multi_signing(document: &Value, signer: &str) -> Result<String, CodecError> {
    BinaryCodec::new().encode_for_multi_signing(document, signer)
}

/// See [`BinaryCodec::encode_for_signing_claim`].
pub fn encode_for_signing_claim(claim: &Value) -> Result<String, CodecError> {
    BinaryCodec::new().encode_for_signing_claim(claim)
}

/// See [`BinaryCodec::encode_for_batch_inner_signing`].
pub fn encode_for_batch_inner_signing(batch: &Value) -> Result<Vec<u8>, CodecError> {
    BinaryCodec::new().encode_for_batch_inner_signing(batch)
}

/// See [`BinaryCodec::encode_for_batch_inner_multi_signing`].
pub fn encode_for_batch_inner_multi_signing(
    batch: &Value,
    signer: &str,
) -> Result<Vec<u8>, CodecError> {
    BinaryCodec::new().encode_for_batch_inner_multi_signing(batch, signer)
}

/// See [`BinaryCodec::transaction_hash`].
pub fn transaction_hash(document: &Value) -> Result<[u8; 32], CodecError> {
    BinaryCodec::new().transaction_hash(document)
}
