use ledgerwire_address::AddressError;
use thiserror::Error;

/// Errors raised while loading a field definitions schema.
///
/// These indicate a corrupt schema resource, never a runtime condition.
#[derive(Debug, Error)]
pub enum DefinitionsError {
    /// The schema is not valid JSON or does not have the expected shape.
    #[error("invalid definitions JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A serialized field names a type the codec has no serializer for.
    #[error("field {field} has unsupported type {type_name}")]
    UnknownType {
        /// Field name.
        field: String,
        /// Type name from the schema.
        type_name: String,
    },
    /// Two serialized fields share a wire identity.
    #[error("fields {first} and {second} share type code {type_code} and field code {field_code}")]
    DuplicateCode {
        /// Field registered first.
        first: String,
        /// Field that collided with it.
        second: String,
        /// Shared type code.
        type_code: i32,
        /// Shared field code.
        field_code: i32,
    },
    /// The same field name appears twice.
    #[error("duplicate field name {0}")]
    DuplicateName(String),
    /// A serialized field has a code that cannot be packed into a field id.
    #[error("field {field} has codes ({type_code}, {field_code}) outside 1..=255")]
    CodeOutOfRange {
        /// Field name.
        field: String,
        /// Type code from the schema.
        type_code: i32,
        /// Field code from the schema.
        field_code: i32,
    },
    /// A field whose value has no intrinsic width is not length-prefixed.
    #[error("field {0} must be length-prefixed")]
    MissingLengthPrefix(String),
    /// A structural field the codec relies on is absent.
    #[error("required field {0} is missing from definitions")]
    MissingField(&'static str),
}

/// Errors raised while decoding binary input.
///
/// Every decoding failure is reported through this one type; nothing is
/// recovered partially.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input text is not valid hex.
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The buffer ended before a value was complete.
    #[error("unexpected end of input at offset {offset}: needed {needed} more bytes")]
    Truncated {
        /// Offset of the read that failed.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
    },
    /// A length prefix byte is outside the defined tiers.
    #[error("invalid length prefix 0x{byte:02x} at offset {offset}")]
    InvalidLengthPrefix {
        /// Offset of the prefix byte.
        offset: usize,
        /// Offending byte.
        byte: u8,
    },
    /// A decoded length exceeds the largest encodable length.
    #[error("length {length} at offset {offset} exceeds maximum")]
    LengthOutOfRange {
        /// Offset of the length prefix.
        offset: usize,
        /// Decoded length.
        length: usize,
    },
    /// A field id header is malformed or not in its shortest form.
    #[error("invalid field id at offset {offset}")]
    InvalidFieldId {
        /// Offset of the header.
        offset: usize,
    },
    /// No field is registered under the decoded codes.
    #[error("unknown field with type code {type_code} and field code {field_code}")]
    UnknownField {
        /// Decoded type code.
        type_code: u8,
        /// Decoded field code.
        field_code: u8,
    },
    /// A structural marker appeared where it cannot close anything.
    #[error("unexpected {marker} at offset {offset}")]
    UnexpectedMarker {
        /// Offset of the marker.
        offset: usize,
        /// Marker name.
        marker: &'static str,
    },
    /// Fields were not in strictly ascending canonical order.
    #[error("field {field} at offset {offset} is out of canonical order")]
    NonCanonicalOrder {
        /// Offset of the offending header.
        offset: usize,
        /// Field name.
        field: String,
    },
    /// A nested container ran to the end of input without its end marker.
    #[error("{field} is not terminated")]
    UnterminatedContainer {
        /// Field that opened the container.
        field: String,
    },
    /// Containers are nested deeper than the decoder follows.
    #[error("{field} at offset {offset} exceeds the maximum nesting depth of {limit}")]
    NestingTooDeep {
        /// Offset where the container opened.
        offset: usize,
        /// Field that opened the container.
        field: String,
        /// Deepest nesting accepted.
        limit: usize,
    },
    /// Bytes were read but do not form a valid value.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field or type being decoded.
        field: String,
        /// What was wrong.
        reason: String,
    },
}

/// Errors returned by the codec's public operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A variable-length payload is longer than the framer can express.
    #[error("length {0} exceeds maximum of 918744 bytes")]
    LengthOutOfRange(usize),
    /// An issued amount's normalized exponent is outside [-96, 80].
    #[error("exponent out of range")]
    ExponentOutOfRange,
    /// An issued amount needs more than 16 significant digits.
    #[error("{0} has more than 16 digits")]
    TooManyDigits(String),
    /// A native amount does not fit in 62 bits.
    #[error("native amount {0} exceeds the 62-bit bound")]
    NativeAmountOutOfRange(String),
    /// Amount text is not a number of the expected shape.
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount {
        /// Offending text.
        value: String,
        /// What was wrong.
        reason: String,
    },
    /// A field value does not match its type.
    #[error("invalid value for field {field}: {reason}")]
    InvalidField {
        /// Field name.
        field: String,
        /// What was wrong.
        reason: String,
    },
    /// A JSON object was expected.
    #[error("expected JSON object for {0}")]
    ExpectedObject(String),
    /// Signing framings only accept objects.
    #[error("JSON object required for signing")]
    SigningRequiresObject,
    /// Claim framing needs both of its fields.
    #[error("Unsigned claims must have Channel and Amount fields.")]
    IncompleteClaim,
    /// A batch transaction is missing its inner transactions or has malformed ones.
    #[error("invalid batch transaction: {0}")]
    InvalidBatch(String),
    /// Signer address could not be decoded.
    #[error(transparent)]
    Address(#[from] AddressError),
    /// Decoding failed.
    #[error("decoding failed: {0}")]
    Decode(#[from] DecodeError),
}

impl CodecError {
    pub(crate) fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        CodecError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl DecodeError {
    pub(crate) fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        DecodeError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
