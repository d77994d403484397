//! Classic address codec for ledger account identifiers.
//!
//! An account is identified on the wire by 20 raw bytes. Its textual form is
//! base58check over the ripple alphabet: a `0x00` version byte, the 20-byte
//! account id, and a 4-byte double-SHA-256 checksum.
//!
//! ```rust
//! use ledgerwire_address::AccountId;
//!
//! let account = AccountId::from_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")?;
//! assert_eq!(account.to_hex(), "B5F762798A53D543A014CAF8B297CFF8F2F937E8");
//! assert_eq!(account.to_address(), "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
//! # Ok::<(), ledgerwire_address::AddressError>(())
//! ```
#![deny(missing_docs)]

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Size of an account identifier in bytes.
pub const ACCOUNT_ID_LENGTH: usize = 20;

/// Version byte prefixed to account ids before base58check encoding.
pub const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Errors produced while converting between addresses and account ids.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The text is not valid base58check over the ripple alphabet.
    #[error("invalid address '{address}': {source}")]
    Base58 {
        /// Offending address text.
        address: String,
        /// Underlying base58 failure (alphabet or checksum).
        #[source]
        source: bs58::decode::Error,
    },
    /// The decoded payload has the wrong size.
    #[error("invalid account id length: {0} bytes, expected 20")]
    InvalidLength(usize),
    /// The decoded payload does not carry the account version byte.
    #[error("invalid address version byte 0x{0:02x}")]
    InvalidVersion(u8),
    /// Hex account id text could not be decoded.
    #[error("invalid account id hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// A 20-byte account identifier.
///
/// Ordering and equality are defined on the raw bytes, never on the text form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountId([u8; ACCOUNT_ID_LENGTH]);

impl AccountId {
    /// Wraps raw account id bytes.
    pub const fn new(bytes: [u8; ACCOUNT_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Returns the raw account id bytes.
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LENGTH] {
        &self.0
    }

    /// Builds an account id from a byte slice of exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; ACCOUNT_ID_LENGTH] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// Decodes a classic address (`r...`).
    pub fn from_address(address: &str) -> Result<Self, AddressError> {
        let decoded = bs58::decode(address)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .with_check(None)
            .into_vec()
            .map_err(|source| AddressError::Base58 {
                address: address.to_string(),
                source,
            })?;

        // The checksum is stripped by bs58; the version byte is not.
        match decoded.split_first() {
            Some((&ACCOUNT_ID_VERSION, payload)) => Self::from_slice(payload),
            Some((&version, _)) => Err(AddressError::InvalidVersion(version)),
            None => Err(AddressError::InvalidLength(0)),
        }
    }

    /// Decodes 40 hex characters (either case).
    pub fn from_hex(text: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(text)?;
        Self::from_slice(&bytes)
    }

    /// Encodes the account id as a classic address.
    pub fn to_address(&self) -> String {
        bs58::encode(self.0)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .with_check_version(ACCOUNT_ID_VERSION)
            .into_string()
    }

    /// Uppercase hex form of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    /// Accepts either a classic address or 40 hex characters.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.len() == ACCOUNT_ID_LENGTH * 2 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
            Self::from_hex(text)
        } else {
            Self::from_address(text)
        }
    }
}

impl From<[u8; ACCOUNT_ID_LENGTH]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_address())
    }
}
