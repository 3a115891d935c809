//! Element types for tensor data.
//!
//! Codes are stable: they are written as the first byte of every encoded
//! tensor.

use bytes::{Buf, BufMut};
use half::{bf16, f16};
use serde::Serialize;

use crate::error::TensorError;

/// Data type for tensor elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DType {
    /// 32-bit floating point
    Float32 = 1,
    /// 16-bit IEEE 754 floating point
    Float16 = 2,
    /// 16-bit brain floating point (bfloat16)
    BFloat16 = 3,
    /// 64-bit floating point
    Float64 = 4,
    /// 8-bit signed integer
    Int8 = 5,
    /// 32-bit signed integer
    Int32 = 6,
    /// 64-bit signed integer
    Int64 = 7,
    /// 8-bit unsigned integer
    UInt8 = 8,
    /// Boolean (1 byte per element)
    Bool = 9,
}

impl DType {
    /// Returns the size in bytes of a single element of this data type.
    ///
    /// ```rust
    /// use evalue_tensor::DType;
    ///
    /// assert_eq!(DType::Float32.element_size(), 4);
    /// assert_eq!(DType::BFloat16.element_size(), 2);
    /// assert_eq!(DType::Bool.element_size(), 1);
    /// ```
    #[inline]
    pub const fn element_size(&self) -> usize {
        match self {
            DType::Float64 | DType::Int64 => 8,
            DType::Float32 | DType::Int32 => 4,
            DType::Float16 | DType::BFloat16 => 2,
            DType::Int8 | DType::UInt8 | DType::Bool => 1,
        }
    }

    /// Returns a human-readable name for this data type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            DType::Float32 => "float32",
            DType::Float16 => "float16",
            DType::BFloat16 => "bfloat16",
            DType::Float64 => "float64",
            DType::Int8 => "int8",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::Bool => "bool",
        }
    }

    /// Wire code of this data type.
    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u8> for DType {
    type Error = TensorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DType::Float32),
            2 => Ok(DType::Float16),
            3 => Ok(DType::BFloat16),
            4 => Ok(DType::Float64),
            5 => Ok(DType::Int8),
            6 => Ok(DType::Int32),
            7 => Ok(DType::Int64),
            8 => Ok(DType::UInt8),
            9 => Ok(DType::Bool),
            _ => Err(TensorError::UnknownDType(value)),
        }
    }
}

/// Types that can be stored as tensor elements.
///
/// Elements are stored big-endian so a tensor's bytes mean the same thing
/// on every host.
pub trait Element: Copy + Send + Sync + 'static {
    /// The DType corresponding to this element type.
    const DTYPE: DType;

    /// Appends this element to `buf`.
    fn put<B: BufMut>(self, buf: &mut B);

    /// Reads one element from `buf`. The caller guarantees enough bytes remain.
    fn get<B: Buf>(buf: &mut B) -> Self;
}

macro_rules! impl_element {
    ($ty:ty, $dtype:expr, $put:ident, $get:ident) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn put<B: BufMut>(self, buf: &mut B) {
                buf.$put(self);
            }

            #[inline]
            fn get<B: Buf>(buf: &mut B) -> Self {
                buf.$get()
            }
        }
    };
}

impl_element!(f32, DType::Float32, put_f32, get_f32);
impl_element!(f64, DType::Float64, put_f64, get_f64);
impl_element!(i8, DType::Int8, put_i8, get_i8);
impl_element!(i32, DType::Int32, put_i32, get_i32);
impl_element!(i64, DType::Int64, put_i64, get_i64);
impl_element!(u8, DType::UInt8, put_u8, get_u8);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    fn put<B: BufMut>(self, buf: &mut B) {
        buf.put_u8(self as u8);
    }

    fn get<B: Buf>(buf: &mut B) -> Self {
        buf.get_u8() != 0
    }
}

impl Element for f16 {
    const DTYPE: DType = DType::Float16;

    fn put<B: BufMut>(self, buf: &mut B) {
        buf.put_u16(self.to_bits());
    }

    fn get<B: Buf>(buf: &mut B) -> Self {
        f16::from_bits(buf.get_u16())
    }
}

impl Element for bf16 {
    const DTYPE: DType = DType::BFloat16;

    fn put<B: BufMut>(self, buf: &mut B) {
        buf.put_u16(self.to_bits());
    }

    fn get<B: Buf>(buf: &mut B) -> Self {
        bf16::from_bits(buf.get_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_sizes() {
        assert_eq!(DType::Float32.element_size(), 4);
        assert_eq!(DType::Float16.element_size(), 2);
        assert_eq!(DType::BFloat16.element_size(), 2);
        assert_eq!(DType::Float64.element_size(), 8);
        assert_eq!(DType::Int8.element_size(), 1);
        assert_eq!(DType::Int32.element_size(), 4);
        assert_eq!(DType::Int64.element_size(), 8);
        assert_eq!(DType::UInt8.element_size(), 1);
        assert_eq!(DType::Bool.element_size(), 1);
    }

    #[test]
    fn test_code_conversion() {
        for code in 1..=9u8 {
            let dtype = DType::try_from(code).unwrap();
            assert_eq!(dtype.code(), code);
        }
        assert!(matches!(
            DType::try_from(0),
            Err(TensorError::UnknownDType(0))
        ));
        assert!(DType::try_from(42).is_err());
    }

    #[test]
    fn test_element_sizes_match_dtype() {
        fn written<T: Element>(value: T) -> usize {
            let mut buf = Vec::new();
            value.put(&mut buf);
            assert_eq!(buf.len(), T::DTYPE.element_size());
            buf.len()
        }

        written(1.5f32);
        written(1.5f64);
        written(-3i8);
        written(-3i32);
        written(-3i64);
        written(7u8);
        written(true);
        written(f16::from_f32(0.5));
        written(bf16::from_f32(0.5));
    }

    #[test]
    fn test_elements_are_big_endian() {
        let mut buf = Vec::new();
        1i32.put(&mut buf);
        assert_eq!(buf, [0, 0, 0, 1]);

        let mut cursor = &buf[..];
        assert_eq!(i32::get(&mut cursor), 1);
    }

    #[test]
    fn test_half_round_trip() {
        let mut buf = Vec::new();
        f16::from_f32(1.25).put(&mut buf);
        bf16::from_f32(-2.0).put(&mut buf);

        let mut cursor = &buf[..];
        assert_eq!(f16::get(&mut cursor).to_f32(), 1.25);
        assert_eq!(bf16::get(&mut cursor).to_f32(), -2.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(DType::BFloat16.to_string(), "bfloat16");
    }
}
