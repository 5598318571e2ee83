//! Fixed-width and variable-length primitive encoders.
//!
//! Every integer on the Xeris wire is little-endian. Strings carry an 8-byte
//! little-endian length prefix followed by their UTF-8 bytes. Counts and the
//! instruction payload length use the compact base-128 varint:
//!
//! ```text
//! value          bytes
//! 0..=0x7f       1      0xxxxxxx
//! 0x80..=0x3fff  2      1xxxxxxx 0xxxxxxx
//! ...            n      low groups first, high bit = continuation
//! ```

use crate::error::XrsError;

/// Longest compact encoding of a `u64` (ceil(64 / 7)).
const MAX_COMPACT_LEN: usize = 10;

pub fn encode_u8(value: u8) -> [u8; 1] {
    [value]
}

pub fn encode_u32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

pub fn encode_u64(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Encode a string as `u64 LE length || UTF-8 bytes`.
///
/// No terminator is written and no length limit is enforced.
pub fn encode_string(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(8 + bytes.len());
    out.extend_from_slice(&encode_u64(bytes.len() as u64));
    out.extend_from_slice(bytes);
    out
}

/// Encode `value` as the minimal compact base-128 varint.
///
/// Integer shifts are used throughout, so the whole `u64` range encodes
/// exactly.
pub fn encode_compact_length(value: u64) -> Vec<u8> {
    let mut val = value;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

/// Decode a compact length from the front of `data`.
///
/// Returns `(value, bytes_consumed)` or an error if the data is truncated or
/// the value does not fit in a `u64`.
pub fn decode_compact_length(data: &[u8]) -> Result<(u64, usize), XrsError> {
    let mut value: u64 = 0;
    let mut consumed = 0usize;

    loop {
        let byte = *data.get(consumed).ok_or_else(|| {
            XrsError::SerializationError(
                "unexpected end of data while decoding compact length".into(),
            )
        })?;
        if consumed == MAX_COMPACT_LEN - 1 && byte > 0x01 {
            return Err(XrsError::SerializationError(
                "compact length overflows u64".into(),
            ));
        }

        value |= u64::from(byte & 0x7f) << (7 * consumed);
        consumed += 1;

        if byte & 0x80 == 0 {
            break;
        }
    }

    Ok((value, consumed))
}
