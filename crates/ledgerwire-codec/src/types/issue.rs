//! Issues: a currency with its issuer when not native.

use ledgerwire_address::AccountId;
use serde_json::{json, Value};

use super::currency::Currency;
use crate::error::{CodecError, DecodeError};
use crate::parser::BinaryParser;

/// A currency and, unless it is the native currency, its issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Currency code.
    pub currency: Currency,
    /// Issuer; `None` exactly when the currency is native.
    pub issuer: Option<AccountId>,
}

impl Issue {
    /// Parses `{"currency": "XRP"}` or `{"currency": ..., "issuer": ...}`.
    pub fn from_json(field: &str, json: &Value) -> Result<Self, CodecError> {
        let map = json
            .as_object()
            .ok_or_else(|| CodecError::invalid_field(field, "expected an object"))?;
        let currency = map
            .get("currency")
            .and_then(Value::as_str)
            .ok_or_else(|| CodecError::invalid_field(field, "missing currency"))?;
        let currency = Currency::from_text(currency)?;
        let issuer = match (currency.is_native(), map.get("issuer")) {
            (true, None) => None,
            (true, Some(_)) => {
                return Err(CodecError::invalid_field(
                    field,
                    "the native currency has no issuer",
                ))
            }
            (false, Some(Value::String(issuer))) => Some(issuer.parse::<AccountId>()?),
            (false, _) => return Err(CodecError::invalid_field(field, "missing issuer")),
        };
        Ok(Self { currency, issuer })
    }

    /// JSON form.
    pub fn to_json(&self) -> Value {
        match &self.issuer {
            None => json!({ "currency": self.currency.to_text() }),
            Some(issuer) => json!({
                "currency": self.currency.to_text(),
                "issuer": issuer.to_address(),
            }),
        }
    }

    /// Appends the wire form.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.currency.as_bytes());
        if let Some(issuer) = &self.issuer {
            out.extend_from_slice(issuer.as_bytes());
        }
    }

    /// Reads the wire form.
    pub fn read(parser: &mut BinaryParser<'_>) -> Result<Self, DecodeError> {
        let currency = Currency::from_bytes(parser.read_array()?);
        let issuer = if currency.is_native() {
            None
        } else {
            Some(AccountId::new(parser.read_array()?))
        };
        Ok(Self { currency, issuer })
    }
}
