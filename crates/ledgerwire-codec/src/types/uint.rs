//! Unsigned integer fields and their enumerated names.

use serde_json::Value;

use crate::definitions::NameTable;
use crate::error::CodecError;

/// Reads an unsigned integer from a JSON number or decimal string.
pub(crate) fn uint_from_json(field: &str, json: &Value, max: u64) -> Result<u64, CodecError> {
    let value = match json {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| CodecError::invalid_field(field, format!("{n} is not an unsigned integer")))?,
        Value::String(s) => s
            .parse::<u64>()
            .map_err(|_| CodecError::invalid_field(field, format!("'{s}' is not an unsigned integer")))?,
        other => {
            return Err(CodecError::invalid_field(
                field,
                format!("expected an unsigned integer, got {other}"),
            ))
        }
    };
    if value > max {
        return Err(CodecError::invalid_field(
            field,
            format!("{value} exceeds maximum {max}"),
        ));
    }
    Ok(value)
}

/// Like [`uint_from_json`], but strings are first looked up in the field's
/// name table (`"Payment"`, `"tesSUCCESS"`).
pub(crate) fn enumerated_from_json(
    field: &str,
    json: &Value,
    table: &NameTable,
    max: u64,
) -> Result<u64, CodecError> {
    let Value::String(name) = json else {
        return uint_from_json(field, json, max);
    };
    let code = table
        .code(name)
        .ok_or_else(|| CodecError::invalid_field(field, format!("unknown name '{name}'")))?;
    u64::try_from(code)
        .ok()
        .filter(|&code| code <= max)
        .ok_or_else(|| CodecError::invalid_field(field, format!("'{name}' has no wire code")))
}

/// Renders an enumerated value by name when the table knows it.
pub(crate) fn enumerated_to_json(value: u64, table: &NameTable) -> Value {
    i32::try_from(value)
        .ok()
        .and_then(|code| table.name(code))
        .map(|name| Value::String(name.to_string()))
        .unwrap_or_else(|| Value::from(value))
}

/// UInt64 values are written as hex text (up to 16 digits); plain JSON
/// numbers are accepted as well.
pub(crate) fn uint64_from_json(field: &str, json: &Value) -> Result<u64, CodecError> {
    match json {
        Value::String(s) if !s.is_empty() && s.len() <= 16 => u64::from_str_radix(s, 16)
            .map_err(|_| CodecError::invalid_field(field, format!("'{s}' is not hex"))),
        Value::String(s) => Err(CodecError::invalid_field(
            field,
            format!("'{s}' must be 1 to 16 hex digits"),
        )),
        other => uint_from_json(field, other, u64::MAX),
    }
}

pub(crate) fn uint64_to_json(value: u64) -> Value {
    Value::String(format!("{value:016X}"))
}
