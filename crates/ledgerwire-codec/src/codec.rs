//! Top-level encode, decode and signing framings.

use ledgerwire_address::AccountId;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::definitions::{definitions, Definitions};
use crate::error::{CodecError, DecodeError};
use crate::hash_prefix::HashPrefix;
use crate::hashing::{Sha512Half, TransactionHasher};
use crate::object::StObject;
use crate::parser::BinaryParser;
use crate::types::{self, Amount, FieldValue};

/// Schema-driven codec between JSON documents and the canonical binary form.
///
/// The codec only reads its registry, so one instance can be shared freely
/// across threads.
///
/// # Example
///
/// ```rust
/// use ledgerwire_codec::BinaryCodec;
/// use serde_json::json;
///
/// let codec = BinaryCodec::new();
/// let hex = codec.encode(&json!({"Flags": 1}))?;
/// assert_eq!(hex, "2200000001");
/// assert_eq!(codec.decode(&hex)?, json!({"Flags": 1}));
/// # Ok::<(), ledgerwire_codec::CodecError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinaryCodec<'d, H = Sha512Half> {
    definitions: &'d Definitions,
    hasher: H,
}

impl BinaryCodec<'static> {
    /// Codec over the embedded registry.
    pub fn new() -> Self {
        Self::with_definitions(definitions())
    }
}

impl Default for BinaryCodec<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d> BinaryCodec<'d> {
    /// Codec over a caller-supplied registry.
    pub fn with_definitions(definitions: &'d Definitions) -> Self {
        Self {
            definitions,
            hasher: Sha512Half,
        }
    }
}

impl<'d, H: TransactionHasher> BinaryCodec<'d, H> {
    /// Replaces the hasher used for transaction ids.
    pub fn with_hasher<T: TransactionHasher>(self, hasher: T) -> BinaryCodec<'d, T> {
        BinaryCodec {
            definitions: self.definitions,
            hasher,
        }
    }

    /// Registry this codec encodes against.
    pub fn definitions(&self) -> &'d Definitions {
        self.definitions
    }

    /// Parses a JSON document into its typed form.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ExpectedObject`] when `document` is not an
    /// object, or the first field that fails to convert.
    pub fn parse(&self, document: &Value) -> Result<StObject<'d>, CodecError> {
        let map = document
            .as_object()
            .ok_or_else(|| CodecError::ExpectedObject("document".into()))?;
        StObject::from_json(map, self.definitions)
    }

    /// Encodes a document to bytes.
    pub fn encode_to_bytes(&self, document: &Value) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.parse(document)?.write_to(&mut out)?;
        debug!(bytes = out.len(), "encoded document");
        Ok(out)
    }

    /// Encodes a document to uppercase hex.
    ///
    /// Field order in the input does not matter; fields are always written
    /// sorted by type code, then field code.
    pub fn encode(&self, document: &Value) -> Result<String, CodecError> {
        self.encode_to_bytes(document).map(hex::encode_upper)
    }

    /// Decodes canonical bytes back into a JSON document.
    ///
    /// # Errors
    ///
    /// Any malformed, truncated or non-canonical input fails as a whole.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        let mut parser = BinaryParser::new(bytes);
        let object = StObject::read(&mut parser, self.definitions)?;
        debug!(bytes = bytes.len(), fields = object.len(), "decoded document");
        Ok(object.to_json(self.definitions))
    }

    /// Decodes hex (either case) into a JSON document.
    pub fn decode(&self, hex: &str) -> Result<Value, CodecError> {
        let bytes = hex::decode(hex.trim()).map_err(DecodeError::from)?;
        Ok(self.decode_bytes(&bytes)?)
    }

    /// Bytes a single signer signs: `STX\0` and the signing fields.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::SigningRequiresObject`] for non-object input.
    #[instrument(level = "debug", skip_all)]
    pub fn encode_for_signing(&self, document: &Value) -> Result<String, CodecError> {
        let object = self.signing_object(document)?;
        let mut out = HashPrefix::TransactionSign.bytes().to_vec();
        object.write_filtered(&mut out, |def| def.is_signing_field)?;
        Ok(hex::encode_upper(out))
    }

    /// Bytes one of several signers signs: `SMT\0`, the signing fields with
    /// an empty `SigningPubKey`, then the signer's account id.
    ///
    /// # Errors
    ///
    /// Fails like [`encode_for_signing`](Self::encode_for_signing), or with
    /// [`CodecError::Address`] when `signer` is not an address.
    #[instrument(level = "debug", skip(self, document))]
    pub fn encode_for_multi_signing(
        &self,
        document: &Value,
        signer: &str,
    ) -> Result<String, CodecError> {
        let signer: AccountId = signer.parse()?;
        let mut object = self.signing_object(document)?;
        if let Some(def) = self.definitions.field_by_name("SigningPubKey") {
            object.insert(def, FieldValue::Blob(Vec::new()));
        }
        let mut out = HashPrefix::TransactionMultiSign.bytes().to_vec();
        object.write_filtered(&mut out, |def| def.is_signing_field)?;
        out.extend_from_slice(signer.as_bytes());
        Ok(hex::encode_upper(out))
    }

    /// Bytes a payment channel claim signs: `CLM\0`, the 32-byte channel and
    /// the amount in drops as a big-endian 64-bit integer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ledgerwire_codec::BinaryCodec;
    /// use serde_json::json;
    ///
    /// let claim = json!({"Channel": "AB".repeat(32), "Amount": "1000"});
    /// let hex = BinaryCodec::new().encode_for_signing_claim(&claim)?;
    /// assert!(hex.starts_with("434C4D00"));
    /// assert!(hex.ends_with("00000000000003E8"));
    /// # Ok::<(), ledgerwire_codec::CodecError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::IncompleteClaim`] when `Channel` or `Amount` is
    /// missing.
    #[instrument(level = "debug", skip_all)]
    pub fn encode_for_signing_claim(&self, claim: &Value) -> Result<String, CodecError> {
        let map = claim.as_object().ok_or(CodecError::SigningRequiresObject)?;
        let (Some(channel), Some(amount)) = (map.get("Channel"), map.get("Amount")) else {
            return Err(CodecError::IncompleteClaim);
        };
        let channel: [u8; 32] = types::hash_from_json("Channel", channel)?;
        let drops = match Amount::from_json(amount)? {
            Amount::Native(drops) => drops,
            Amount::Issued(_) => {
                return Err(CodecError::invalid_field(
                    "Amount",
                    "claims are denominated in drops",
                ))
            }
        };

        let mut out = HashPrefix::PaymentChannelClaim.bytes().to_vec();
        out.extend_from_slice(&channel);
        out.extend_from_slice(&drops.to_be_bytes());
        Ok(hex::encode_upper(out))
    }

    /// Bytes signed to approve a batch: `BCH\0`, the batch flags, the number
    /// of inner transactions, then each inner transaction's id in order.
    ///
    /// The batch is a document with `Flags` (default 0) and a
    /// `RawTransactions` array of `{"RawTransaction": {...}}` wrappers. Inner
    /// ids are computed by the codec's [`TransactionHasher`] over each inner
    /// transaction's full encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidBatch`] when the inner transaction list is
    /// missing or malformed, or the encoding error of an inner transaction.
    #[instrument(level = "debug", skip_all)]
    pub fn encode_for_batch_inner_signing(&self, batch: &Value) -> Result<Vec<u8>, CodecError> {
        let map = batch.as_object().ok_or(CodecError::SigningRequiresObject)?;
        let flags = match map.get("Flags") {
            Some(flags) => types::uint_from_json("Flags", flags, u32::MAX.into())? as u32,
            None => 0,
        };
        let ids = self.inner_transaction_ids(map)?;
        let count = u32::try_from(ids.len())
            .map_err(|_| CodecError::InvalidBatch(format!("{} inner transactions", ids.len())))?;

        let mut out = HashPrefix::Batch.bytes().to_vec();
        out.extend_from_slice(&flags.to_be_bytes());
        out.extend_from_slice(&count.to_be_bytes());
        for id in &ids {
            out.extend_from_slice(id);
        }
        debug!(inner = count, "framed batch for signing");
        Ok(out)
    }

    /// [`encode_for_batch_inner_signing`](Self::encode_for_batch_inner_signing)
    /// followed by the signer's account id.
    #[instrument(level = "debug", skip(self, batch))]
    pub fn encode_for_batch_inner_multi_signing(
        &self,
        batch: &Value,
        signer: &str,
    ) -> Result<Vec<u8>, CodecError> {
        let signer: AccountId = signer.parse()?;
        let mut out = self.encode_for_batch_inner_signing(batch)?;
        out.extend_from_slice(signer.as_bytes());
        Ok(out)
    }

    /// Transaction id: the hasher applied to the full encoding.
    pub fn transaction_hash(&self, document: &Value) -> Result<[u8; 32], CodecError> {
        let encoded = self.encode_to_bytes(document)?;
        Ok(self.hasher.transaction_id(&encoded))
    }

    fn signing_object(&self, document: &Value) -> Result<StObject<'d>, CodecError> {
        let map = document
            .as_object()
            .ok_or(CodecError::SigningRequiresObject)?;
        StObject::from_json(map, self.definitions)
    }

    fn inner_transaction_ids(&self, batch: &Map<String, Value>) -> Result<Vec<[u8; 32]>, CodecError> {
        let raw = batch
            .get("RawTransactions")
            .and_then(Value::as_array)
            .ok_or_else(|| CodecError::InvalidBatch("missing RawTransactions array".into()))?;
        raw.iter()
            .enumerate()
            .map(|(i, wrapper)| {
                let inner = wrapper
                    .get("RawTransaction")
                    .filter(|inner| inner.is_object())
                    .ok_or_else(|| {
                        CodecError::InvalidBatch(format!(
                            "element {i} is not a RawTransaction wrapper"
                        ))
                    })?;
                self.transaction_hash(inner)
            })
            .collect()
    }
}
