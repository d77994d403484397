//! Per-type value serializers.
//!
//! [`FieldValue`] is the tagged union of every serializable value. Each
//! variant knows its JSON form and its wire form; the field's definition
//! decides which variant applies and whether the value is length-prefixed.

mod amount;
mod currency;
mod hash;
mod issue;
mod path_set;
mod uint;

pub use amount::{
    Amount, IssuedAmount, IssuedValue, MAX_EXPONENT, MAX_NATIVE_DROPS, MAX_PRECISION,
    MIN_EXPONENT,
};
pub use currency::Currency;
pub use issue::Issue;
pub use path_set::{PathSet, PathStep};

pub(crate) use hash::hash_from_json;
pub(crate) use uint::uint_from_json;

use ledgerwire_address::AccountId;
use serde_json::Value;

use crate::definitions::{Definitions, FieldDefinition, FieldType};
use crate::error::{CodecError, DecodeError};
use crate::field_id::FieldId;
use crate::length::{read_length, write_length};
use crate::object::{StArray, StObject};
use crate::parser::BinaryParser;

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'d> {
    /// 8-bit unsigned integer.
    UInt8(u8),
    /// 16-bit unsigned integer.
    UInt16(u16),
    /// 32-bit unsigned integer.
    UInt32(u32),
    /// 64-bit unsigned integer.
    UInt64(u64),
    /// 128-bit hash.
    Hash128([u8; 16]),
    /// 160-bit hash.
    Hash160([u8; 20]),
    /// 256-bit hash.
    Hash256([u8; 32]),
    /// Arbitrary bytes.
    Blob(Vec<u8>),
    /// Account identifier.
    AccountId(AccountId),
    /// Native or issued amount.
    Amount(Amount),
    /// Currency and issuer.
    Issue(Issue),
    /// Payment paths.
    PathSet(PathSet),
    /// List of 256-bit hashes.
    Vector256(Vec<[u8; 32]>),
    /// Nested object.
    Object(StObject<'d>),
    /// Array of wrapped objects.
    Array(StArray<'d>),
}

impl<'d> FieldValue<'d> {
    /// Builds the value of `def` from its JSON form.
    pub fn from_json(
        def: &'d FieldDefinition,
        json: &Value,
        defs: &'d Definitions,
    ) -> Result<Self, CodecError> {
        let name = def.name.as_str();
        let integer = |max: u64| match defs.name_table_for(name) {
            Some(table) => uint::enumerated_from_json(name, json, table, max),
            None => uint::uint_from_json(name, json, max),
        };

        let value = match def.field_type {
            FieldType::UInt8 => FieldValue::UInt8(integer(u8::MAX.into())? as u8),
            FieldType::UInt16 => FieldValue::UInt16(integer(u16::MAX.into())? as u16),
            FieldType::UInt32 => FieldValue::UInt32(integer(u32::MAX.into())? as u32),
            FieldType::UInt64 => FieldValue::UInt64(uint::uint64_from_json(name, json)?),
            FieldType::Hash128 => FieldValue::Hash128(hash::hash_from_json(name, json)?),
            FieldType::Hash160 => FieldValue::Hash160(hash::hash_from_json(name, json)?),
            FieldType::Hash256 => FieldValue::Hash256(hash::hash_from_json(name, json)?),
            FieldType::Blob => FieldValue::Blob(hash::blob_from_json(name, json)?),
            FieldType::AccountId => {
                let text = json
                    .as_str()
                    .ok_or_else(|| CodecError::invalid_field(name, "expected an address"))?;
                FieldValue::AccountId(text.parse()?)
            }
            FieldType::Amount => FieldValue::Amount(Amount::from_json(json)?),
            FieldType::Issue => FieldValue::Issue(Issue::from_json(name, json)?),
            FieldType::PathSet => FieldValue::PathSet(PathSet::from_json(name, json)?),
            FieldType::Vector256 => FieldValue::Vector256(hash::vector256_from_json(name, json)?),
            FieldType::Object => {
                let map = json
                    .as_object()
                    .ok_or_else(|| CodecError::ExpectedObject(def.name.clone()))?;
                FieldValue::Object(StObject::from_json(map, defs)?)
            }
            FieldType::Array => FieldValue::Array(StArray::from_json(def, json, defs)?),
        };
        Ok(value)
    }

    /// JSON form of the value.
    pub fn to_json(&self, def: &FieldDefinition, defs: &Definitions) -> Value {
        let enumerated = |value: u64| match defs.name_table_for(&def.name) {
            Some(table) => uint::enumerated_to_json(value, table),
            None => Value::from(value),
        };
        match self {
            FieldValue::UInt8(v) => enumerated((*v).into()),
            FieldValue::UInt16(v) => enumerated((*v).into()),
            FieldValue::UInt32(v) => enumerated((*v).into()),
            FieldValue::UInt64(v) => uint::uint64_to_json(*v),
            FieldValue::Hash128(h) => hash::hex_to_json(h),
            FieldValue::Hash160(h) => hash::hex_to_json(h),
            FieldValue::Hash256(h) => hash::hex_to_json(h),
            FieldValue::Blob(b) => hash::hex_to_json(b),
            FieldValue::AccountId(a) => Value::String(a.to_address()),
            FieldValue::Amount(a) => a.to_json(),
            FieldValue::Issue(i) => i.to_json(),
            FieldValue::PathSet(p) => p.to_json(),
            FieldValue::Vector256(v) => hash::vector256_to_json(v),
            FieldValue::Object(o) => o.to_json(defs),
            FieldValue::Array(a) => a.to_json(defs),
        }
    }

    /// Appends the value bytes (without the field header), length-prefixed
    /// when the field is.
    pub fn write_to(&self, def: &FieldDefinition, out: &mut Vec<u8>) -> Result<(), CodecError> {
        if def.is_vl_encoded {
            let mut body = Vec::new();
            self.write_body(&mut body)?;
            write_length(body.len(), out)?;
            out.extend_from_slice(&body);
            Ok(())
        } else {
            self.write_body(out)
        }
    }

    fn write_body(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match self {
            FieldValue::UInt8(v) => out.push(*v),
            FieldValue::UInt16(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::UInt32(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::UInt64(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::Hash128(h) => out.extend_from_slice(h),
            FieldValue::Hash160(h) => out.extend_from_slice(h),
            FieldValue::Hash256(h) => out.extend_from_slice(h),
            FieldValue::Blob(b) => out.extend_from_slice(b),
            FieldValue::AccountId(a) => out.extend_from_slice(a.as_bytes()),
            FieldValue::Amount(a) => a.write_to(out),
            FieldValue::Issue(i) => i.write_to(out),
            FieldValue::PathSet(p) => p.write_to(out),
            FieldValue::Vector256(v) => v.iter().for_each(|h| out.extend_from_slice(h)),
            FieldValue::Object(o) => {
                o.write_to(out)?;
                FieldId::OBJECT_END.write_to(out);
            }
            FieldValue::Array(a) => a.write_to(out)?,
        }
        Ok(())
    }

    /// Reads the value of `def`; the field header has already been consumed.
    pub fn read(
        def: &'d FieldDefinition,
        parser: &mut BinaryParser<'_>,
        defs: &'d Definitions,
    ) -> Result<Self, DecodeError> {
        Self::read_at_depth(def, parser, defs, 0)
    }

    /// As [`FieldValue::read`] for a field inside `depth` enclosing containers.
    pub(crate) fn read_at_depth(
        def: &'d FieldDefinition,
        parser: &mut BinaryParser<'_>,
        defs: &'d Definitions,
        depth: usize,
    ) -> Result<Self, DecodeError> {
        if !def.is_vl_encoded {
            return Self::read_body(def, parser, None, defs, depth);
        }
        let length = read_length(parser)?;
        let body = parser.read(length)?;
        let mut inner = BinaryParser::new(body);
        let value = Self::read_body(def, &mut inner, Some(length), defs, depth)?;
        if !inner.is_empty() {
            return Err(DecodeError::invalid_value(
                &def.name,
                format!("{} trailing bytes inside length prefix", inner.remaining()),
            ));
        }
        Ok(value)
    }

    fn read_body(
        def: &'d FieldDefinition,
        parser: &mut BinaryParser<'_>,
        framed: Option<usize>,
        defs: &'d Definitions,
        depth: usize,
    ) -> Result<Self, DecodeError> {
        let value = match def.field_type {
            FieldType::UInt8 => FieldValue::UInt8(parser.read_u8()?),
            FieldType::UInt16 => FieldValue::UInt16(parser.read_u16()?),
            FieldType::UInt32 => FieldValue::UInt32(parser.read_u32()?),
            FieldType::UInt64 => FieldValue::UInt64(parser.read_u64()?),
            FieldType::Hash128 => FieldValue::Hash128(parser.read_array()?),
            FieldType::Hash160 => FieldValue::Hash160(parser.read_array()?),
            FieldType::Hash256 => FieldValue::Hash256(parser.read_array()?),
            FieldType::Blob | FieldType::Vector256 => {
                // registry guarantees these are framed
                let bytes = parser.read(framed.unwrap_or(0))?;
                if def.field_type == FieldType::Blob {
                    FieldValue::Blob(bytes.to_vec())
                } else {
                    FieldValue::Vector256(hash::vector256_from_bytes(&def.name, bytes)?)
                }
            }
            FieldType::AccountId => FieldValue::AccountId(AccountId::new(parser.read_array()?)),
            FieldType::Amount => FieldValue::Amount(Amount::read(parser)?),
            FieldType::Issue => FieldValue::Issue(Issue::read(parser)?),
            FieldType::PathSet => FieldValue::PathSet(PathSet::read(parser)?),
            FieldType::Object => {
                FieldValue::Object(StObject::read_nested(parser, defs, &def.name, depth + 1)?)
            }
            FieldType::Array => FieldValue::Array(StArray::read(def, parser, defs, depth + 1)?),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::definitions;
    use serde_json::json;

    fn encode(name: &str, json: Value) -> Vec<u8> {
        let defs = definitions();
        let def = defs.field_by_name(name).unwrap();
        let value = FieldValue::from_json(def, &json, defs).unwrap();
        let mut out = Vec::new();
        value.write_to(def, &mut out).unwrap();
        out
    }

    fn decode(name: &str, bytes: &[u8]) -> Result<Value, DecodeError> {
        let defs = definitions();
        let def = defs.field_by_name(name).unwrap();
        let mut parser = BinaryParser::new(bytes);
        let value = FieldValue::read(def, &mut parser, defs)?;
        assert!(parser.is_empty());
        Ok(value.to_json(def, defs))
    }

    #[test]
    fn integers_are_big_endian() {
        assert_eq!(encode("Flags", json!(1)), [0, 0, 0, 1]);
        assert_eq!(encode("TickSize", json!(5)), [5]);
        assert_eq!(encode("SignerWeight", json!(258)), [1, 2]);
        assert_eq!(encode("OwnerNode", json!("1")), [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn enumerated_fields_use_names() {
        assert_eq!(encode("TransactionType", json!("Payment")), [0, 0]);
        assert_eq!(decode("TransactionType", &[0, 0]).unwrap(), json!("Payment"));
        assert_eq!(encode("TransactionResult", json!("tesSUCCESS")), [0]);
    }

    #[test]
    fn account_is_length_prefixed() {
        let bytes = encode("Account", json!("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert_eq!(bytes[0], 20);
        assert_eq!(
            hex::encode_upper(&bytes[1..]),
            "B5F762798A53D543A014CAF8B297CFF8F2F937E8"
        );
        assert_eq!(
            decode("Account", &bytes).unwrap(),
            json!("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")
        );
    }

    #[test]
    fn account_accepts_hex() {
        assert_eq!(
            encode("Account", json!("b5f762798a53d543a014caf8b297cff8f2f937e8")),
            encode("Account", json!("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"))
        );
    }

    #[test]
    fn framed_account_must_be_twenty_bytes() {
        let mut bytes = vec![21];
        bytes.extend_from_slice(&[0u8; 21]);
        assert!(matches!(
            decode("Account", &bytes),
            Err(DecodeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn blob_is_length_prefixed() {
        assert_eq!(encode("Domain", json!("DEADBEEF")), [4, 0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(encode("Domain", json!("")), [0]);
    }

    #[test]
    fn vector256_is_length_prefixed() {
        let hash = "11".repeat(32);
        let bytes = encode("Hashes", json!([hash, hash]));
        assert_eq!(bytes[0], 64);
        assert_eq!(bytes.len(), 65);
        assert_eq!(decode("Hashes", &bytes).unwrap(), json!([hash, hash]));
    }

    #[test]
    fn type_mismatches_name_the_field() {
        let defs = definitions();
        let def = defs.field_by_name("Flags").unwrap();
        match FieldValue::from_json(def, &json!("lots"), defs) {
            Err(CodecError::InvalidField { field, .. }) => assert_eq!(field, "Flags"),
            other => panic!("expected invalid field, got {other:?}"),
        }
        let def = defs.field_by_name("Memo").unwrap();
        assert!(matches!(
            FieldValue::from_json(def, &json!([]), defs),
            Err(CodecError::ExpectedObject(_))
        ));
    }
}
