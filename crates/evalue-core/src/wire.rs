//! Binary encoding of non-list values.
//!
//! # Wire Format
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────────────┐
//! │   Tag    │                   Payload                    │
//! │ (1 byte) │                                              │
//! └──────────┴──────────────────────────────────────────────┘
//!
//!   0 None     (nothing)
//!   1 Tensor   encoded tensor, self-delimiting
//!   2 String   UTF-8 bytes up to the end of the buffer
//!   3 Double   8 bytes, IEEE-754, big-endian
//!   4 Int      8 bytes, two's complement, big-endian
//!   5 Bool     1 byte, nonzero = true
//! ```
//!
//! Tags 6 through 11 belong to the list kinds and are never written or
//! accepted. A string carries no length prefix, so it must be the last
//! thing in its buffer; use [`crate::sequence`] to put several values in
//! one buffer.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use evalue_tensor::Tensor;
use tracing::debug;

use crate::error::{DecodeError, Result, ValueError};
use crate::kind::ValueKind;
use crate::value::Value;

/// Size of the tag that starts every encoded value.
pub const TAG_SIZE: usize = 1;

impl Value {
    /// Returns the exact number of bytes [`Value::encode`] produces.
    pub fn encoded_len(&self) -> Result<usize> {
        let payload = match self {
            Value::None => 0,
            Value::Tensor(t) => t.encoded_size(),
            Value::String(s) => s.len(),
            Value::Double(_) | Value::Int(_) => 8,
            Value::Bool(_) => 1,
            _ => return Err(ValueError::UnsupportedKind(self.kind())),
        };
        Ok(TAG_SIZE + payload)
    }

    /// Encodes this value into a fresh buffer sized to fit it exactly.
    ///
    /// Fails with [`ValueError::UnsupportedKind`] for list kinds.
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len()?);
        self.encode_into(&mut buf)?;
        debug!(kind = %self.kind(), len = buf.len(), "encoded value");
        Ok(buf.freeze())
    }

    /// Appends the encoding of this value to `buf`.
    ///
    /// Nothing is written when the value is a list kind.
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) -> Result<()> {
        match self {
            Value::None => buf.put_u8(ValueKind::None.code()),
            Value::Tensor(t) => {
                buf.put_u8(ValueKind::Tensor.code());
                t.encode_into(buf);
            }
            Value::String(s) => {
                buf.put_u8(ValueKind::String.code());
                buf.put_slice(s.as_bytes());
            }
            Value::Double(d) => {
                buf.put_u8(ValueKind::Double.code());
                buf.put_f64(*d);
            }
            Value::Int(i) => {
                buf.put_u8(ValueKind::Int.code());
                buf.put_i64(*i);
            }
            Value::Bool(b) => {
                buf.put_u8(ValueKind::Bool.code());
                buf.put_u8(*b as u8);
            }
            _ => return Err(ValueError::UnsupportedKind(self.kind())),
        }
        Ok(())
    }

    /// Decodes one value from the start of `data`.
    ///
    /// Bytes after a fixed-width or tensor payload are ignored.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut cursor = data;
        Self::decode_buf(&mut cursor)
    }

    /// Decodes one value from a buffer that may be absent.
    pub fn decode_nullable(data: Option<&[u8]>) -> Result<Self> {
        match data {
            Some(data) => Self::decode(data),
            None => Err(DecodeError::NullBuffer.into()),
        }
    }

    /// Decodes one value from `buf`, advancing it past the value.
    ///
    /// A string payload drains everything that remains in `buf`.
    pub fn decode_buf<B: Buf>(buf: &mut B) -> Result<Self> {
        if !buf.has_remaining() {
            return Err(DecodeError::EmptyBuffer.into());
        }
        let kind = ValueKind::try_from(buf.get_u8())?;

        let value = match kind {
            ValueKind::None => Value::None,
            ValueKind::Tensor => Value::Tensor(Tensor::decode(buf).map_err(DecodeError::from)?),
            ValueKind::String => {
                let len = buf.remaining();
                let bytes = buf.copy_to_bytes(len);
                let text = std::str::from_utf8(&bytes).map_err(|_| DecodeError::InvalidUtf8)?;
                Value::String(text.to_owned())
            }
            ValueKind::Double => {
                ensure(buf, 8)?;
                Value::Double(buf.get_f64())
            }
            ValueKind::Int => {
                ensure(buf, 8)?;
                Value::Int(buf.get_i64())
            }
            ValueKind::Bool => {
                ensure(buf, 1)?;
                Value::Bool(buf.get_u8() != 0)
            }
            list => return Err(DecodeError::ReservedTypeCode(list).into()),
        };

        debug!(%kind, remaining = buf.remaining(), "decoded value");
        Ok(value)
    }
}

fn ensure<B: Buf>(buf: &B, needed: usize) -> std::result::Result<(), DecodeError> {
    if buf.remaining() < needed {
        return Err(DecodeError::Truncated {
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}
