//! Variable-length prefixes for blob-shaped values.
//!
//! | length            | prefix bytes |
//! |-------------------|--------------|
//! | 0 ..= 192         | 1            |
//! | 193 ..= 12480     | 2            |
//! | 12481 ..= 918744  | 3            |

use crate::error::{CodecError, DecodeError};
use crate::parser::BinaryParser;

/// Largest length expressed with a one-byte prefix.
pub const MAX_SINGLE_BYTE_LENGTH: usize = 192;
/// Largest length expressed with a two-byte prefix.
pub const MAX_DOUBLE_BYTE_LENGTH: usize = 12480;
/// Largest encodable length.
pub const MAX_LENGTH: usize = 918744;

/// Appends the length prefix for `len` to `out`.
pub fn write_length(len: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
    if len <= MAX_SINGLE_BYTE_LENGTH {
        out.push(len as u8);
    } else if len <= MAX_DOUBLE_BYTE_LENGTH {
        let n = len - 193;
        out.extend_from_slice(&[193 + (n >> 8) as u8, (n & 0xFF) as u8]);
    } else if len <= MAX_LENGTH {
        let n = len - 12481;
        out.extend_from_slice(&[
            241 + (n >> 16) as u8,
            ((n >> 8) & 0xFF) as u8,
            (n & 0xFF) as u8,
        ]);
    } else {
        return Err(CodecError::LengthOutOfRange(len));
    }
    Ok(())
}

/// Length prefix for `len` as a new vector.
pub fn encode_length(len: usize) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(3);
    write_length(len, &mut out)?;
    Ok(out)
}

/// Reads a length prefix.
pub fn read_length(parser: &mut BinaryParser<'_>) -> Result<usize, DecodeError> {
    let offset = parser.position();
    let b1 = parser.read_u8()? as usize;
    let len = match b1 {
        0..=192 => b1,
        193..=240 => {
            let b2 = parser.read_u8()? as usize;
            193 + ((b1 - 193) << 8) + b2
        }
        241..=254 => {
            let b2 = parser.read_u8()? as usize;
            let b3 = parser.read_u8()? as usize;
            12481 + ((b1 - 241) << 16) + (b2 << 8) + b3
        }
        _ => {
            return Err(DecodeError::InvalidLengthPrefix {
                offset,
                byte: b1 as u8,
            })
        }
    };
    if len > MAX_LENGTH {
        return Err(DecodeError::LengthOutOfRange {
            offset,
            length: len,
        });
    }
    Ok(len)
}
