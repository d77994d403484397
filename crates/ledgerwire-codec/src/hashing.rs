//! Transaction hashing.

use sha2::{Digest, Sha512};

use crate::hash_prefix::HashPrefix;

/// Computes transaction ids from canonical encodings.
///
/// Batch inner-signing hashes each inner transaction through this trait, so
/// callers with their own hashing service can plug it in.
pub trait TransactionHasher {
    /// Id of a transaction given its full canonical encoding.
    fn transaction_id(&self, encoded: &[u8]) -> [u8; 32];
}

/// The network's hash: the first half of SHA-512 over `TXN\0` and the
/// encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512Half;

impl TransactionHasher for Sha512Half {
    fn transaction_id(&self, encoded: &[u8]) -> [u8; 32] {
        sha512_half(&[&HashPrefix::TransactionId.bytes()[..], encoded])
    }
}

/// First 32 bytes of SHA-512 over the concatenated parts.
pub fn sha512_half(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut half = [0u8; 32];
    half.copy_from_slice(&digest[..32]);
    half
}
