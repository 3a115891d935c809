//! Dense tensors handed to the inference runtime alongside other values.
//!
//! A [`Tensor`] is a shape, an element type and a shared byte buffer.
//! Cloning a tensor never copies its data; every clone refers to the
//! same storage.
//!
//! # Example
//!
//! ```rust
//! use evalue_tensor::{DType, Tensor, TensorMeta};
//!
//! let meta = TensorMeta::new(vec![2, 3], DType::Float32);
//! let tensor = Tensor::from_f32(&meta, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//!
//! let encoded = tensor.encode();
//! let decoded = Tensor::decode(&mut encoded.clone()).unwrap();
//! assert_eq!(decoded, tensor);
//! ```

pub mod dtype;
pub mod error;
pub mod tensor;

pub use dtype::{DType, Element};
pub use error::{TensorError, TensorResult};
pub use tensor::{Tensor, TensorMeta, TENSOR_HEADER_MIN_SIZE};
