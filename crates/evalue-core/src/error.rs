//! Error types for value access and the wire codec.

use evalue_tensor::TensorError;
use thiserror::Error;

use crate::kind::ValueKind;

/// Errors surfaced by [`Value`](crate::Value) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// An accessor was called on a value of a different kind.
    #[error("expected value of kind {expected}, found {actual}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// List kinds have no wire encoding.
    #[error("cannot encode value of kind {0}: list kinds are not serializable")]
    UnsupportedKind(ValueKind),

    /// An encoded value is too long for a `u32` frame length.
    #[error("value of {0} encoded bytes exceeds the u32 frame length")]
    FrameTooLarge(usize),

    /// A sequence holds more values than a `u32` count can describe.
    #[error("sequence of {0} values exceeds the u32 value count")]
    TooManyValues(usize),

    /// The input bytes are not a valid encoded value.
    #[error("malformed value buffer: {0}")]
    Malformed(#[from] DecodeError),
}

impl ValueError {
    /// Returns whether the error came from decoding corrupt input.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ValueError::Malformed(_))
    }
}

/// Reasons a buffer failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("buffer cannot be null")]
    NullBuffer,

    #[error("buffer is empty")]
    EmptyBuffer,

    #[error("invalid type code: {0}")]
    UnknownTypeCode(u8),

    /// Tag of a list kind, which the wire format never carries.
    #[error("type code {} ({}) is reserved", .0.code(), .0)]
    ReservedTypeCode(ValueKind),

    #[error("truncated buffer: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("{0} trailing bytes after last value")]
    TrailingBytes(usize),

    #[error("invalid tensor payload: {0}")]
    Tensor(#[from] TensorError),
}

/// Result type used throughout evalue-core.
pub type Result<T> = std::result::Result<T, ValueError>;
