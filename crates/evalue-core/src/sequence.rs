//! Length-prefixed framing for several values in one buffer.
//!
//! The single-value format gives strings no length, so values cannot
//! simply be concatenated. A sequence wraps each encoded value in a frame:
//!
//! ```text
//! ┌────────────┬────────────┬──────────────────┬────────────┬─────
//! │   Count    │  Length 0  │     Value 0      │  Length 1  │ ...
//! │  (4 bytes) │  (4 bytes) │ (Length 0 bytes) │  (4 bytes) │
//! └────────────┴────────────┴──────────────────┴────────────┴─────
//! ```
//!
//! Counts and lengths are big-endian `u32`. Every frame must be consumed
//! exactly by the value it holds.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::error::{DecodeError, Result, ValueError};
use crate::value::Value;

/// Size of the count that starts a sequence.
pub const SEQUENCE_HEADER_SIZE: usize = 4;

/// Size of the length prefix in front of each value.
pub const FRAME_HEADER_SIZE: usize = 4;

/// Encodes `values` as a framed sequence.
///
/// Fails with [`ValueError::UnsupportedKind`] if any value is a list, and
/// with [`ValueError::FrameTooLarge`] or [`ValueError::TooManyValues`] when a
/// length or the count does not fit in a `u32`.
pub fn encode_values(values: &[Value]) -> Result<Bytes> {
    let count =
        u32::try_from(values.len()).map_err(|_| ValueError::TooManyValues(values.len()))?;

    let mut total = SEQUENCE_HEADER_SIZE;
    let mut lengths = Vec::with_capacity(values.len());
    for value in values {
        let len = value.encoded_len()?;
        lengths.push(frame_len(len)?);
        total += FRAME_HEADER_SIZE + len;
    }

    let mut buf = BytesMut::with_capacity(total);
    buf.put_u32(count);
    for (value, len) in values.iter().zip(lengths) {
        buf.put_u32(len);
        value.encode_into(&mut buf)?;
    }

    debug!(count = values.len(), len = buf.len(), "encoded value sequence");
    Ok(buf.freeze())
}

/// Decodes a framed sequence produced by [`encode_values`].
pub fn decode_values(data: &[u8]) -> Result<Vec<Value>> {
    let mut cursor = data;
    ensure(cursor, SEQUENCE_HEADER_SIZE)?;
    let count = cursor.get_u32() as usize;

    // Each frame needs at least its header and a tag byte.
    let mut values = Vec::with_capacity(count.min(cursor.remaining() / (FRAME_HEADER_SIZE + 1)));
    for _ in 0..count {
        ensure(cursor, FRAME_HEADER_SIZE)?;
        let len = cursor.get_u32() as usize;
        ensure(cursor, len)?;

        let (mut frame, rest) = cursor.split_at(len);
        cursor = rest;
        values.push(Value::decode_buf(&mut frame)?);
        if !frame.is_empty() {
            return Err(DecodeError::TrailingBytes(frame.len()).into());
        }
    }

    if !cursor.is_empty() {
        return Err(DecodeError::TrailingBytes(cursor.len()).into());
    }

    debug!(count, "decoded value sequence");
    Ok(values)
}

fn frame_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| ValueError::FrameTooLarge(len))
}

fn ensure(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(ValueError::Malformed(DecodeError::Truncated {
            needed,
            available: buf.len(),
        }));
    }
    Ok(())
}
