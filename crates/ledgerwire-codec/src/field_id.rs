//! Compact field id headers.
//!
//! A field's `(type code, field code)` pair is packed into one to three bytes.
//! Codes below 16 share a byte as nibbles; larger codes take a byte of their
//! own, and a zero nibble marks which code was moved out.

use crate::error::DecodeError;
use crate::parser::BinaryParser;

/// Wire identity of a serialized field.
///
/// Ordering is by type code, then field code, which is the canonical field
/// order of every serialized object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    /// Type code (1..=255).
    pub type_code: u8,
    /// Field code (1..=255).
    pub field_code: u8,
}

impl FieldId {
    /// Reserved marker closing a nested object.
    pub const OBJECT_END: FieldId = FieldId::new(14, 1);
    /// Reserved marker closing an array.
    pub const ARRAY_END: FieldId = FieldId::new(15, 1);

    /// Creates a field id.
    pub const fn new(type_code: u8, field_code: u8) -> Self {
        Self {
            type_code,
            field_code,
        }
    }

    /// Appends the header bytes to `out`.
    pub fn write_to(self, out: &mut Vec<u8>) {
        let (t, f) = (self.type_code, self.field_code);
        match (t < 16, f < 16) {
            (true, true) => out.push((t << 4) | f),
            (false, true) => out.extend_from_slice(&[f, t]),
            (true, false) => out.extend_from_slice(&[t << 4, f]),
            (false, false) => out.extend_from_slice(&[0, t, f]),
        }
    }

    /// Header bytes as a new vector.
    pub fn to_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3);
        self.write_to(&mut out);
        out
    }

    /// Reads a header, returning the id and the number of bytes consumed.
    ///
    /// Headers that are not in their shortest form are rejected so that every
    /// id has exactly one encoding.
    pub fn read(parser: &mut BinaryParser<'_>) -> Result<(FieldId, usize), DecodeError> {
        let offset = parser.position();
        let first = parser.read_u8()?;
        let (high, low) = (first >> 4, first & 0x0F);

        let (id, long_codes_ok) = match (high, low) {
            (0, 0) => {
                let t = parser.read_u8()?;
                let f = parser.read_u8()?;
                (FieldId::new(t, f), t >= 16 && f >= 16)
            }
            (0, f) => {
                let t = parser.read_u8()?;
                (FieldId::new(t, f), t >= 16)
            }
            (t, 0) => {
                let f = parser.read_u8()?;
                (FieldId::new(t, f), f >= 16)
            }
            (t, f) => (FieldId::new(t, f), true),
        };

        if !long_codes_ok {
            return Err(DecodeError::InvalidFieldId { offset });
        }
        Ok((id, parser.position() - offset))
    }
}
