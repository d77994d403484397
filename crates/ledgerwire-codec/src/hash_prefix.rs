//! Domain separators prepended to bytes that are hashed or signed.

/// Four-byte tags (three ASCII letters and a NUL) that keep byte sequences
/// meant for one signing context from being valid in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashPrefix {
    /// Transaction id: `b"TXN\0"`.
    TransactionId,
    /// Single-signing: `b"STX\0"`.
    TransactionSign,
    /// Multi-signing: `b"SMT\0"`.
    TransactionMultiSign,
    /// Payment channel claim: `b"CLM\0"`.
    PaymentChannelClaim,
    /// Batch inner-transaction signing: `b"BCH\0"`.
    Batch,
}

impl HashPrefix {
    /// Prefix bytes.
    pub const fn bytes(self) -> [u8; 4] {
        match self {
            HashPrefix::TransactionId => *b"TXN\0",
            HashPrefix::TransactionSign => *b"STX\0",
            HashPrefix::TransactionMultiSign => *b"SMT\0",
            HashPrefix::PaymentChannelClaim => *b"CLM\0",
            HashPrefix::Batch => *b"BCH\0",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_distinct_tags() {
        let all = [
            HashPrefix::TransactionId,
            HashPrefix::TransactionSign,
            HashPrefix::TransactionMultiSign,
            HashPrefix::PaymentChannelClaim,
            HashPrefix::Batch,
        ];
        for (i, a) in all.iter().enumerate() {
            assert_eq!(a.bytes()[3], 0);
            for b in &all[i + 1..] {
                assert_ne!(a.bytes(), b.bytes());
            }
        }
        assert_eq!(HashPrefix::TransactionSign.bytes(), [0x53, 0x54, 0x58, 0x00]);
    }
}
