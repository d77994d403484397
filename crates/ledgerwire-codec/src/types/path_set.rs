//! Payment path sets.
//!
//! Each step starts with a type byte naming which of account, currency and
//! issuer follow (in that order). Paths are separated by `0xFF` and the set is
//! terminated by `0x00`.

use ledgerwire_address::AccountId;
use serde_json::{Map, Value};

use super::currency::Currency;
use crate::error::{CodecError, DecodeError};
use crate::parser::BinaryParser;

const TYPE_ACCOUNT: u8 = 0x01;
const TYPE_CURRENCY: u8 = 0x10;
const TYPE_ISSUER: u8 = 0x20;
const PATH_SEPARATOR: u8 = 0xFF;
const PATH_SET_END: u8 = 0x00;

/// One hop of a payment path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathStep {
    /// Account rippled through.
    pub account: Option<AccountId>,
    /// Currency converted into.
    pub currency: Option<Currency>,
    /// Issuer of that currency.
    pub issuer: Option<AccountId>,
}

impl PathStep {
    fn type_byte(&self) -> u8 {
        let mut ty = 0;
        if self.account.is_some() {
            ty |= TYPE_ACCOUNT;
        }
        if self.currency.is_some() {
            ty |= TYPE_CURRENCY;
        }
        if self.issuer.is_some() {
            ty |= TYPE_ISSUER;
        }
        ty
    }

    fn from_json(field: &str, json: &Value) -> Result<Self, CodecError> {
        let map = json
            .as_object()
            .ok_or_else(|| CodecError::invalid_field(field, "path steps must be objects"))?;
        let step = PathStep {
            account: member(field, map, "account")?
                .map(|s| s.parse::<AccountId>())
                .transpose()?,
            currency: member(field, map, "currency")?
                .map(Currency::from_text)
                .transpose()?,
            issuer: member(field, map, "issuer")?
                .map(|s| s.parse::<AccountId>())
                .transpose()?,
        };
        if step.type_byte() == 0 {
            return Err(CodecError::invalid_field(field, "empty path step"));
        }
        Ok(step)
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(account) = &self.account {
            map.insert("account".into(), Value::String(account.to_address()));
        }
        if let Some(currency) = &self.currency {
            map.insert("currency".into(), Value::String(currency.to_text()));
        }
        if let Some(issuer) = &self.issuer {
            map.insert("issuer".into(), Value::String(issuer.to_address()));
        }
        Value::Object(map)
    }
}

fn member<'a>(
    field: &str,
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, CodecError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(CodecError::invalid_field(
            field,
            format!("path step member '{key}' must be a string"),
        )),
    }
}

/// Alternative payment paths, each a sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSet(pub Vec<Vec<PathStep>>);

impl PathSet {
    /// Parses an array of arrays of step objects.
    pub fn from_json(field: &str, json: &Value) -> Result<Self, CodecError> {
        let paths = json
            .as_array()
            .ok_or_else(|| CodecError::invalid_field(field, "expected an array of paths"))?;
        let paths = paths
            .iter()
            .map(|path| {
                let steps = path
                    .as_array()
                    .ok_or_else(|| CodecError::invalid_field(field, "each path must be an array"))?;
                if steps.is_empty() {
                    return Err(CodecError::invalid_field(field, "empty path"));
                }
                steps
                    .iter()
                    .map(|step| PathStep::from_json(field, step))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(paths))
    }

    /// JSON form.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|path| Value::Array(path.iter().map(PathStep::to_json).collect()))
                .collect(),
        )
    }

    /// Appends the wire form.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(PATH_SEPARATOR);
            }
            for step in path {
                out.push(step.type_byte());
                if let Some(account) = &step.account {
                    out.extend_from_slice(account.as_bytes());
                }
                if let Some(currency) = &step.currency {
                    out.extend_from_slice(currency.as_bytes());
                }
                if let Some(issuer) = &step.issuer {
                    out.extend_from_slice(issuer.as_bytes());
                }
            }
        }
        out.push(PATH_SET_END);
    }

    /// Reads the wire form up to and including the terminator.
    pub fn read(parser: &mut BinaryParser<'_>) -> Result<Self, DecodeError> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        loop {
            let offset = parser.position();
            match parser.read_u8()? {
                PATH_SET_END => {
                    if current.is_empty() && !paths.is_empty() {
                        return Err(DecodeError::invalid_value("Paths", "empty path"));
                    }
                    if !current.is_empty() {
                        paths.push(current);
                    }
                    return Ok(Self(paths));
                }
                PATH_SEPARATOR => {
                    if current.is_empty() {
                        return Err(DecodeError::invalid_value("Paths", "empty path"));
                    }
                    paths.push(std::mem::take(&mut current));
                }
                ty if ty & !(TYPE_ACCOUNT | TYPE_CURRENCY | TYPE_ISSUER) != 0 => {
                    return Err(DecodeError::invalid_value(
                        "Paths",
                        format!("invalid step type 0x{ty:02x} at offset {offset}"),
                    ));
                }
                ty => {
                    let mut step = PathStep::default();
                    if ty & TYPE_ACCOUNT != 0 {
                        step.account = Some(AccountId::new(parser.read_array()?));
                    }
                    if ty & TYPE_CURRENCY != 0 {
                        step.currency = Some(Currency::from_bytes(parser.read_array()?));
                    }
                    if ty & TYPE_ISSUER != 0 {
                        step.issuer = Some(AccountId::new(parser.read_array()?));
                    }
                    current.push(step);
                }
            }
        }
    }
}
