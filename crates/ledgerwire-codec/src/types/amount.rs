//! Amount serializer.
//!
//! Native amounts are 8 bytes: bit 63 clear, bit 62 set (positive), and the
//! drop count in the low 62 bits.
//!
//! Issued amounts are 48 bytes: an 8-byte header (bit 63 set, bit 62 the
//! sign, 8 bits of exponent biased by 97, 54 bits of mantissa normalized to
//! 16 decimal digits), then the 20-byte currency and the 20-byte issuer.
//! Zero is the bare header `0x8000000000000000`.

use std::fmt;
use std::str::FromStr;

use ledgerwire_address::AccountId;
use serde_json::{json, Map, Value};

use super::currency::Currency;
use crate::error::{CodecError, DecodeError};
use crate::parser::BinaryParser;

/// Smallest normalized exponent of an issued amount.
pub const MIN_EXPONENT: i32 = -96;
/// Largest normalized exponent of an issued amount.
pub const MAX_EXPONENT: i32 = 80;
/// Significant decimal digits an issued amount can carry.
pub const MAX_PRECISION: usize = 16;
/// Largest native amount in drops.
pub const MAX_NATIVE_DROPS: u64 = (1 << 62) - 1;

const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
const MAX_MANTISSA: u64 = 9_999_999_999_999_999;
const MANTISSA_MASK: u64 = (1 << 54) - 1;
const EXPONENT_BIAS: i32 = 97;
const NOT_NATIVE_BIT: u64 = 0x8000_0000_0000_0000;
const POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;

/// Decimal value of an issued amount, held as `mantissa * 10^exponent`.
///
/// Non-zero values always have a 16-digit mantissa and an exponent in
/// [`MIN_EXPONENT`, `MAX_EXPONENT`]; zero has mantissa 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssuedValue {
    negative: bool,
    mantissa: u64,
    exponent: i32,
}

impl IssuedValue {
    /// The zero value.
    pub const ZERO: IssuedValue = IssuedValue {
        negative: false,
        mantissa: 0,
        exponent: 0,
    };

    /// Parses decimal text (`"1.5"`, `"-12"`, `"9999999999999999e80"`).
    ///
    /// Significant digits are counted after dropping leading and trailing
    /// zeros, so `"100000000000000000000"` is a single digit.
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        let invalid = |reason: &str| CodecError::InvalidAmount {
            value: text.to_string(),
            reason: reason.to_string(),
        };

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (number, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(i) => {
                let exponent = parse_exponent(&unsigned[i + 1..])
                    .ok_or_else(|| invalid("malformed exponent"))?;
                (&unsigned[..i], exponent)
            }
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("unexpected character"));
        }

        let digits = format!("{int_part}{frac_part}");
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(Self::ZERO);
        }
        let trimmed = significant.trim_end_matches('0');
        if trimmed.len() > MAX_PRECISION {
            return Err(CodecError::TooManyDigits(text.to_string()));
        }

        let mut exponent = exponent - frac_part.len() as i64
            + (significant.len() - trimmed.len()) as i64;
        let mut mantissa: u64 = trimmed
            .parse()
            .map_err(|_| invalid("mantissa does not fit"))?;
        while mantissa < MIN_MANTISSA {
            mantissa *= 10;
            exponent -= 1;
        }
        if exponent < i64::from(MIN_EXPONENT) || exponent > i64::from(MAX_EXPONENT) {
            return Err(CodecError::ExponentOutOfRange);
        }

        Ok(Self {
            negative,
            mantissa,
            exponent: exponent as i32,
        })
    }

    /// True for zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// True for values below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Normalized 16-digit mantissa (0 for zero).
    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// Normalized exponent.
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Packs the value into an 8-byte amount header.
    pub fn to_bits(&self) -> u64 {
        if self.is_zero() {
            return NOT_NATIVE_BIT;
        }
        let mut bits =
            NOT_NATIVE_BIT | ((self.exponent + EXPONENT_BIAS) as u64) << 54 | self.mantissa;
        if !self.negative {
            bits |= POSITIVE_BIT;
        }
        bits
    }

    /// Unpacks an issued amount header.
    pub fn from_bits(bits: u64) -> Result<Self, DecodeError> {
        let mantissa = bits & MANTISSA_MASK;
        if mantissa == 0 {
            if bits != NOT_NATIVE_BIT {
                return Err(DecodeError::invalid_value("Amount", "non-canonical zero"));
            }
            return Ok(Self::ZERO);
        }
        if !(MIN_MANTISSA..=MAX_MANTISSA).contains(&mantissa) {
            return Err(DecodeError::invalid_value(
                "Amount",
                format!("mantissa {mantissa} is not normalized"),
            ));
        }
        let exponent = ((bits >> 54) & 0xFF) as i32 - EXPONENT_BIAS;
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return Err(DecodeError::invalid_value(
                "Amount",
                format!("exponent {exponent} out of range"),
            ));
        }
        Ok(Self {
            negative: bits & POSITIVE_BIT == 0,
            mantissa,
            exponent,
        })
    }
}

impl FromStr for IssuedValue {
    type Err = CodecError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

/// Plain decimal notation without trailing zeros.
impl fmt::Display for IssuedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut digits = self.mantissa.to_string();
        let mut exponent = self.exponent;
        while digits.ends_with('0') {
            digits.pop();
            exponent += 1;
        }
        if self.negative {
            f.write_str("-")?;
        }
        if exponent >= 0 {
            return write!(f, "{digits}{}", "0".repeat(exponent as usize));
        }
        let point = digits.len() as i32 + exponent;
        if point > 0 {
            let (int_part, frac_part) = digits.split_at(point as usize);
            write!(f, "{int_part}.{frac_part}")
        } else {
            write!(f, "0.{}{digits}", "0".repeat((-point) as usize))
        }
    }
}

/// An amount of a non-native currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedAmount {
    /// Decimal quantity.
    pub value: IssuedValue,
    /// Currency code (never the native currency).
    pub currency: Currency,
    /// Issuing account.
    pub issuer: AccountId,
}

/// A native or issued-currency amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// Drops of the native currency.
    Native(u64),
    /// Issued-currency amount.
    Issued(IssuedAmount),
}

impl Amount {
    /// Parses a native amount from its drop count text.
    pub fn native(drops: &str) -> Result<Self, CodecError> {
        let invalid = |reason: &str| CodecError::InvalidAmount {
            value: drops.to_string(),
            reason: reason.to_string(),
        };
        if drops.starts_with('-') {
            return Err(invalid("native amounts cannot be negative"));
        }
        if drops.is_empty() || !drops.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("native amounts must be a whole number of drops"));
        }
        let value: u64 = drops
            .parse()
            .map_err(|_| CodecError::NativeAmountOutOfRange(drops.to_string()))?;
        if value > MAX_NATIVE_DROPS {
            return Err(CodecError::NativeAmountOutOfRange(drops.to_string()));
        }
        Ok(Amount::Native(value))
    }

    /// Builds an amount from its JSON form: a drops string, or an object with
    /// `currency`, `issuer` and `value`.
    pub fn from_json(json: &Value) -> Result<Self, CodecError> {
        match json {
            Value::String(drops) => Self::native(drops),
            Value::Object(map) => {
                let value = IssuedValue::parse(str_member(map, "value")?)?;
                let currency = Currency::from_text(str_member(map, "currency")?)?;
                if currency.is_native() {
                    return Err(CodecError::InvalidAmount {
                        value: json.to_string(),
                        reason: "issued amounts cannot use the native currency".into(),
                    });
                }
                let issuer: AccountId = str_member(map, "issuer")?.parse()?;
                Ok(Amount::Issued(IssuedAmount {
                    value,
                    currency,
                    issuer,
                }))
            }
            other => Err(CodecError::InvalidAmount {
                value: other.to_string(),
                reason: "expected a drops string or an issued amount object".into(),
            }),
        }
    }

    /// JSON form of the amount.
    pub fn to_json(&self) -> Value {
        match self {
            Amount::Native(drops) => Value::String(drops.to_string()),
            Amount::Issued(issued) => json!({
                "currency": issued.currency.to_text(),
                "issuer": issued.issuer.to_address(),
                "value": issued.value.to_string(),
            }),
        }
    }

    /// Appends the wire form.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Amount::Native(drops) => out.extend_from_slice(&(POSITIVE_BIT | drops).to_be_bytes()),
            Amount::Issued(issued) => {
                out.extend_from_slice(&issued.value.to_bits().to_be_bytes());
                out.extend_from_slice(issued.currency.as_bytes());
                out.extend_from_slice(issued.issuer.as_bytes());
            }
        }
    }

    /// Reads the wire form.
    pub fn read(parser: &mut BinaryParser<'_>) -> Result<Self, DecodeError> {
        let bits = parser.read_u64()?;
        if bits & NOT_NATIVE_BIT == 0 {
            if bits & POSITIVE_BIT == 0 {
                return Err(DecodeError::invalid_value(
                    "Amount",
                    "native amount without the positive bit",
                ));
            }
            return Ok(Amount::Native(bits & MAX_NATIVE_DROPS));
        }
        let value = IssuedValue::from_bits(bits)?;
        let currency = Currency::from_bytes(parser.read_array()?);
        if currency.is_native() {
            return Err(DecodeError::invalid_value(
                "Amount",
                "issued amount with the native currency",
            ));
        }
        let issuer = AccountId::new(parser.read_array()?);
        Ok(Amount::Issued(IssuedAmount {
            value,
            currency,
            issuer,
        }))
    }
}

/// Parses a signed decimal exponent. Well-formed exponents too large for
/// `i32` saturate so the range check reports them.
fn parse_exponent(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let limit = i64::from(i32::MAX);
    let saturated = if text.starts_with('-') { -limit } else { limit };
    Some(text.parse::<i64>().map_or(saturated, |e| e.clamp(-limit, limit)))
}

fn str_member<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a str, CodecError> {
    map.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| CodecError::InvalidAmount {
            value: Value::Object(map.clone()).to_string(),
            reason: format!("missing string member '{key}'"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(text: &str) -> u64 {
        IssuedValue::parse(text).unwrap().to_bits()
    }

    #[test]
    fn normalizes_to_sixteen_digits() {
        let value = IssuedValue::parse("1.5").unwrap();
        assert_eq!(value.mantissa(), 1_500_000_000_000_000);
        assert_eq!(value.exponent(), -15);
        assert!(!value.is_negative());
    }

    #[test]
    fn known_headers() {
        // 1 USD
        assert_eq!(bits("1"), 0xD4838D7EA4C68000);
        assert_eq!(bits("-1"), 0x94838D7EA4C68000);
        assert_eq!(bits("0"), 0x8000000000000000);
        assert_eq!(bits("-0.000"), 0x8000000000000000);
    }

    #[test]
    fn exponent_bounds() {
        assert!(IssuedValue::parse("9999999999999999e80").is_ok());
        assert!(IssuedValue::parse("1000000000000000e-96").is_ok());
        assert!(matches!(
            IssuedValue::parse("9999999999999999e81"),
            Err(CodecError::ExponentOutOfRange)
        ));
        assert!(matches!(
            IssuedValue::parse("1000000000000000e-97"),
            Err(CodecError::ExponentOutOfRange)
        ));
    }

    #[test]
    fn oversized_exponents_are_out_of_range() {
        for text in [
            "1e3000000000",
            "1e-3000000000",
            "1e99999999999999999999999",
            "1.5E+2147483648",
        ] {
            assert!(
                matches!(IssuedValue::parse(text), Err(CodecError::ExponentOutOfRange)),
                "{text:?}"
            );
        }
        assert_eq!(IssuedValue::parse("0e3000000000").unwrap(), IssuedValue::ZERO);
    }

    #[test]
    fn precision_counts_significant_digits_only() {
        let err = IssuedValue::parse("12345678901234567").unwrap_err();
        assert_eq!(err.to_string(), "12345678901234567 has more than 16 digits");
        assert!(IssuedValue::parse("100000000000000000").is_ok());
        assert!(IssuedValue::parse("0.00000000000000000001").is_ok());
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "-", ".", "1.2.3", "abc", "1e", "1ee2", "--1", "1 "] {
            assert!(
                matches!(IssuedValue::parse(text), Err(CodecError::InvalidAmount { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_is_plain_decimal() {
        for (input, shown) in [
            ("1.5", "1.5"),
            ("100", "100"),
            ("-0.001", "-0.001"),
            ("1.50", "1.5"),
            ("12.3e2", "1230"),
            ("1e-3", "0.001"),
            ("0", "0"),
        ] {
            assert_eq!(IssuedValue::parse(input).unwrap().to_string(), shown);
        }
    }

    #[test]
    fn header_round_trip() {
        for text in ["1", "-1", "0", "123.456", "9999999999999999e80", "-1000000000000000e-96"] {
            let value = IssuedValue::parse(text).unwrap();
            assert_eq!(IssuedValue::from_bits(value.to_bits()).unwrap(), value);
        }
    }

    #[test]
    fn rejects_unnormalized_headers() {
        assert!(IssuedValue::from_bits(0x8000000000000001).is_err());
        assert!(IssuedValue::from_bits(0xC000000000000000).is_err());
    }

    #[test]
    fn native_amounts() {
        assert_eq!(Amount::native("100").unwrap(), Amount::Native(100));
        let mut out = Vec::new();
        Amount::Native(100).write_to(&mut out);
        assert_eq!(out, hex::decode("4000000000000064").unwrap());
        assert!(matches!(
            Amount::native("-1"),
            Err(CodecError::InvalidAmount { .. })
        ));
        assert!(matches!(
            Amount::native("1.5"),
            Err(CodecError::InvalidAmount { .. })
        ));
        assert!(Amount::native(&MAX_NATIVE_DROPS.to_string()).is_ok());
        assert!(matches!(
            Amount::native(&(MAX_NATIVE_DROPS + 1).to_string()),
            Err(CodecError::NativeAmountOutOfRange(_))
        ));
        assert!(matches!(
            Amount::native("99999999999999999999999"),
            Err(CodecError::NativeAmountOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_negative_native_on_the_wire() {
        let bytes = 100u64.to_be_bytes();
        assert!(Amount::read(&mut BinaryParser::new(&bytes)).is_err());
    }

    #[test]
    fn issued_amount_json_round_trip() {
        let json = json!({
            "currency": "USD",
            "issuer": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "value": "-12.25"
        });
        let amount = Amount::from_json(&json).unwrap();
        let mut out = Vec::new();
        amount.write_to(&mut out);
        assert_eq!(out.len(), 48);
        let decoded = Amount::read(&mut BinaryParser::new(&out)).unwrap();
        assert_eq!(decoded, amount);
        assert_eq!(decoded.to_json(), json);
    }

    #[test]
    fn rejects_native_currency_in_issued_wire_form() {
        let mut out = bits("1").to_be_bytes().to_vec();
        out.extend_from_slice(&[0; 20]);
        out.extend_from_slice(&[1; 20]);
        assert!(matches!(
            Amount::read(&mut BinaryParser::new(&out)),
            Err(DecodeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn issued_amount_requires_non_native_currency() {
        let json = json!({
            "currency": "XRP",
            "issuer": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "value": "1"
        });
        assert!(Amount::from_json(&json).is_err());
        assert!(Amount::from_json(&json!(100)).is_err());
    }
}
