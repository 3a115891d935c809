//! Tensor construction and decoding errors.

use thiserror::Error;

use crate::dtype::DType;

/// Errors produced while building or decoding a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Not enough bytes left to read the next field.
    #[error("truncated tensor: need {needed} bytes, {available} available")]
    Incomplete { needed: usize, available: usize },

    /// Unknown element type code.
    #[error("unknown tensor dtype: 0x{0:02x}")]
    UnknownDType(u8),

    /// Shape does not fit in addressable memory.
    #[error("tensor shape {0:?} overflows addressable size")]
    ShapeOverflow(Vec<u64>),

    /// Data length doesn't match the shape and dtype.
    #[error("data length {actual} doesn't match expected byte size {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Typed access with the wrong element type.
    #[error("tensor dtype is {actual}, requested {requested}")]
    DTypeMismatch { requested: DType, actual: DType },
}

/// Result type for tensor operations.
pub type TensorResult<T> = Result<T, TensorError>;
