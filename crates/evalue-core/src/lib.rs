//! Tagged runtime values exchanged with the inference runtime.
//!
//! A [`Value`] holds exactly one of twelve kinds: none, a tensor, a
//! string, a double, a 64-bit integer, a bool, or a list of bools,
//! doubles, ints, tensors, scalars or optional tensors. Payloads are read
//! back with fallible `to_*` accessors or by matching on the enum.
//!
//! The non-list kinds have a compact binary encoding (see [`wire`]), and
//! [`sequence`] frames several values into one buffer.
//!
//! # Example
//!
//! ```rust
//! use evalue_core::{Value, ValueKind};
//!
//! let value = Value::from_int(42);
//! let encoded = value.encode().unwrap();
//! assert_eq!(encoded[0], ValueKind::Int.code());
//!
//! let decoded = Value::decode(&encoded).unwrap();
//! assert_eq!(decoded.to_int().unwrap(), 42);
//! assert!(decoded.to_bool().is_err());
//! ```

pub mod error;
pub mod kind;
pub mod sequence;
pub mod value;
pub mod wire;

pub use error::{DecodeError, Result, ValueError};
pub use kind::ValueKind;
pub use sequence::{decode_values, encode_values, SEQUENCE_HEADER_SIZE};
pub use value::{Scalar, Value};

pub use evalue_tensor::{DType, Tensor, TensorMeta};
