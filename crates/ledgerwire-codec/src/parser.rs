//! Big-endian reads over a borrowed byte buffer.

use crate::error::DecodeError;

/// Forward-only cursor over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct BinaryParser<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> BinaryParser<'a> {
    /// Starts reading at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consumes `len` bytes.
    pub fn read(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.position,
                needed: len,
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..self.position])
    }

    /// Consumes exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Consumes one byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Consumes a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Consumes a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Consumes a big-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let bytes = [0x01, 0x02, 0x00, 0x00, 0x00, 0x03];
        let mut parser = BinaryParser::new(&bytes);
        assert_eq!(parser.read_u16().unwrap(), 0x0102);
        assert_eq!(parser.read_u32().unwrap(), 3);
        assert!(parser.is_empty());
    }

    #[test]
    fn truncated_read_reports_offset() {
        let mut parser = BinaryParser::new(&[0xAA, 0xBB]);
        parser.read_u8().unwrap();
        match parser.read_u32() {
            Err(DecodeError::Truncated { offset, needed }) => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 4);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
        // a failed read consumes nothing
        assert_eq!(parser.remaining(), 1);
    }
}
