//! Currency codes: three-character ISO-style text or 160-bit hex.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CodecError;

static ISO_CODE: OnceLock<Regex> = OnceLock::new();

fn iso_code() -> &'static Regex {
    ISO_CODE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9?!@#$%^&*<>(){}\[\]|]{3}$").expect("invalid regex")
    })
}

/// 160-bit currency code.
///
/// Three-character codes occupy bytes 12..15 with every other byte zero; the
/// native currency is all zeros; anything else is an opaque 160-bit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Currency([u8; 20]);

impl Currency {
    /// The native currency.
    pub const NATIVE: Currency = Currency([0; 20]);

    /// Wraps raw code bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw code bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the native currency.
    pub fn is_native(&self) -> bool {
        self.0 == [0; 20]
    }

    /// Parses `"XRP"`, a three-character code, or 40 hex digits.
    pub fn from_text(text: &str) -> Result<Self, CodecError> {
        if text == "XRP" {
            return Ok(Self::NATIVE);
        }
        if iso_code().is_match(text) {
            let mut bytes = [0u8; 20];
            bytes[12..15].copy_from_slice(text.as_bytes());
            return Ok(Self(bytes));
        }
        if text.len() == 40 {
            if let Ok(raw) = hex::decode(text) {
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(&raw);
                return Ok(Self(bytes));
            }
        }
        Err(CodecError::invalid_field(
            "currency",
            format!("'{text}' is neither a three-character code nor 40 hex digits"),
        ))
    }

    /// Textual form: `"XRP"`, the three-character code, or uppercase hex.
    pub fn to_text(&self) -> String {
        if self.is_native() {
            return "XRP".to_string();
        }
        let padding_is_zero = self.0[..12].iter().chain(&self.0[15..]).all(|&b| b == 0);
        if padding_is_zero {
            if let Ok(code) = std::str::from_utf8(&self.0[12..15]) {
                if code != "XRP" && iso_code().is_match(code) {
                    return code.to_string();
                }
            }
        }
        hex::encode_upper(self.0)
    }
}
