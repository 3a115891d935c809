//! Tensor storage and its self-delimiting wire codec.
//!
//! # Wire Format
//!
//! ```text
//! ┌──────────┬──────────┬─────────────────┬──────────────────────┐
//! │  DType   │   NDim   │      Dims       │         Data         │
//! │ (1 byte) │ (4 bytes)│ (8 bytes each)  │ (numel × elem bytes) │
//! └──────────┴──────────┴─────────────────┴──────────────────────┘
//! ```
//!
//! All multi-byte fields, element data included, are big-endian. The
//! data length is implied by the shape, so a decoder consumes exactly the
//! bytes of one tensor and leaves the cursor positioned after them.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::trace;

use crate::dtype::{DType, Element};
use crate::error::{TensorError, TensorResult};

/// Smallest possible encoded tensor: dtype plus a zero rank.
pub const TENSOR_HEADER_MIN_SIZE: usize = 5;

/// Shape and element type of a tensor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TensorMeta {
    /// Shape of the tensor (e.g., `[batch, seq_len, hidden]`)
    pub shape: Vec<usize>,
    /// Data type of tensor elements
    pub dtype: DType,
}

impl TensorMeta {
    /// Creates new tensor metadata with the given shape and dtype.
    ///
    /// ```rust
    /// use evalue_tensor::{TensorMeta, DType};
    ///
    /// let meta = TensorMeta::new(vec![32, 768], DType::Float32);
    /// assert_eq!(meta.numel().unwrap(), 32 * 768);
    /// assert_eq!(meta.byte_size().unwrap(), 32 * 768 * 4);
    ///
    /// let huge = TensorMeta::new(vec![usize::MAX, 2], DType::Float32);
    /// assert!(huge.numel().is_err());
    /// ```
    pub fn new(shape: Vec<usize>, dtype: DType) -> Self {
        Self { shape, dtype }
    }

    /// Returns the total number of elements in the tensor.
    ///
    /// Fails with [`TensorError::ShapeOverflow`] when the product of the
    /// dimensions does not fit in `usize`.
    pub fn numel(&self) -> TensorResult<usize> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| self.overflow())
    }

    /// Returns the total size in bytes of the tensor data.
    pub fn byte_size(&self) -> TensorResult<usize> {
        self.numel()?
            .checked_mul(self.dtype.element_size())
            .ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> TensorError {
        TensorError::ShapeOverflow(self.shape.iter().map(|&d| d as u64).collect())
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Size of the encoded header (dtype, rank and dims).
    #[inline]
    pub fn header_size(&self) -> usize {
        TENSOR_HEADER_MIN_SIZE + 8 * self.shape.len()
    }
}

/// A dense, row-major tensor.
///
/// The data buffer is reference counted: clones share it, and a tensor
/// decoded from a `Bytes` cursor borrows the cursor's storage instead of
/// copying it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    meta: TensorMeta,
    data: Bytes,
}

impl Tensor {
    /// Creates a tensor from metadata and raw big-endian element bytes.
    pub fn new(meta: TensorMeta, data: Bytes) -> TensorResult<Self> {
        let expected = meta.byte_size()?;
        if data.len() != expected {
            return Err(TensorError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { meta, data })
    }

    /// Creates a tensor from a slice of elements.
    pub fn from_slice<T: Element>(shape: Vec<usize>, values: &[T]) -> TensorResult<Self> {
        let meta = TensorMeta::new(shape, T::DTYPE);
        let expected = meta.byte_size()?;
        if values.len() != meta.numel()? {
            return Err(TensorError::LengthMismatch {
                expected,
                actual: values.len() * T::DTYPE.element_size(),
            });
        }
        let mut buf = BytesMut::with_capacity(expected);
        for &value in values {
            value.put(&mut buf);
        }
        Ok(Self {
            meta,
            data: buf.freeze(),
        })
    }

    /// Creates a new tensor from a slice of f32 values.
    pub fn from_f32(meta: &TensorMeta, data: &[f32]) -> TensorResult<Self> {
        if meta.dtype != DType::Float32 {
            return Err(TensorError::DTypeMismatch {
                requested: DType::Float32,
                actual: meta.dtype,
            });
        }
        Self::from_slice(meta.shape.clone(), data)
    }

    /// Creates a new tensor filled with zeros.
    pub fn zeros(meta: TensorMeta) -> TensorResult<Self> {
        let data = Bytes::from(vec![0u8; meta.byte_size()?]);
        Ok(Self { meta, data })
    }

    /// Returns the tensor metadata.
    #[inline]
    pub fn meta(&self) -> &TensorMeta {
        &self.meta
    }

    /// Returns the raw element bytes.
    #[inline]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the total number of elements.
    ///
    /// Construction already validated the shape, so this cannot overflow.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len() / self.meta.dtype.element_size()
    }

    /// Returns the total size in bytes.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Returns the shape of the tensor.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.meta.shape
    }

    /// Returns the data type of the tensor.
    #[inline]
    pub fn dtype(&self) -> DType {
        self.meta.dtype
    }

    /// Copies the elements out as `T`.
    pub fn to_vec<T: Element>(&self) -> TensorResult<Vec<T>> {
        if self.meta.dtype != T::DTYPE {
            return Err(TensorError::DTypeMismatch {
                requested: T::DTYPE,
                actual: self.meta.dtype,
            });
        }
        let mut cursor = &self.data[..];
        Ok((0..self.numel()).map(|_| T::get(&mut cursor)).collect())
    }

    /// Returns the data as f32 values.
    pub fn to_f32_vec(&self) -> TensorResult<Vec<f32>> {
        self.to_vec()
    }

    /// Returns the data as f64 values.
    pub fn to_f64_vec(&self) -> TensorResult<Vec<f64>> {
        self.to_vec()
    }

    /// Returns the data as i64 values.
    pub fn to_i64_vec(&self) -> TensorResult<Vec<i64>> {
        self.to_vec()
    }

    /// Returns the total size of this tensor when encoded.
    #[inline]
    pub fn encoded_size(&self) -> usize {
        self.meta.header_size() + self.data.len()
    }

    /// Encodes this tensor to bytes.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_size());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Encodes this tensor into the given buffer.
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.meta.dtype.code());
        buf.put_u32(self.meta.shape.len() as u32);
        for &dim in &self.meta.shape {
            buf.put_u64(dim as u64);
        }
        buf.put_slice(&self.data);
    }

    /// Decodes one tensor from `buf`, advancing it past the tensor's bytes.
    ///
    /// Bytes after the tensor are left untouched.
    pub fn decode<B: Buf>(buf: &mut B) -> TensorResult<Self> {
        ensure(buf, TENSOR_HEADER_MIN_SIZE)?;
        let dtype = DType::try_from(buf.get_u8())?;
        let ndim = buf.get_u32() as usize;

        ensure(buf, ndim.saturating_mul(8))?;
        let dims: Vec<u64> = (0..ndim).map(|_| buf.get_u64()).collect();

        let shape = dims
            .iter()
            .map(|&d| usize::try_from(d).ok())
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| TensorError::ShapeOverflow(dims.clone()))?;
        let meta = TensorMeta::new(shape, dtype);
        let byte_size = meta.byte_size()?;

        ensure(buf, byte_size)?;
        let data = buf.copy_to_bytes(byte_size);
        trace!(%dtype, shape = ?meta.shape, byte_size, "decoded tensor");

        Ok(Self { meta, data })
    }
}

fn ensure<B: Buf>(buf: &B, needed: usize) -> TensorResult<()> {
    if buf.remaining() < needed {
        return Err(TensorError::Incomplete {
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

impl Serialize for Tensor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tensor", 3)?;
        state.serialize_field("dtype", &self.meta.dtype)?;
        state.serialize_field("shape", &self.meta.shape)?;
        state.serialize_field("byte_size", &self.data.len())?;
        state.end()
    }
}

impl std::fmt::Display for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tensor<{}>{:?}", self.meta.dtype, self.meta.shape)
    }
}
