//! The tagged [`Value`] type.
//!
//! Values are built once through a factory (or a `From` conversion) and
//! are read-only afterwards. List payloads sit behind an [`Arc`], so
//! cloning a value or reading a list never copies the elements, and a
//! tensor payload shares its buffer with the tensor it was built from.

use std::fmt;
use std::sync::Arc;

use evalue_tensor::Tensor;
use serde::Serialize;

use crate::error::{Result, ValueError};
use crate::kind::ValueKind;

/// A scalar element of a `ListScalar` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Double(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Double(d) => write!(f, "{:?}", d),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Double(value)
    }
}

/// A runtime value holding exactly one kind of payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    None,
    Tensor(Tensor),
    String(String),
    Double(f64),
    Int(i64),
    Bool(bool),
    ListBool(Arc<[bool]>),
    ListDouble(Arc<[f64]>),
    ListInt(Arc<[i64]>),
    ListTensor(Arc<[Tensor]>),
    ListScalar(Arc<[Scalar]>),
    ListOptionalTensor(Arc<[Option<Tensor>]>),
}

impl Value {
    /// Creates the none value, standing for an absent optional.
    pub fn none() -> Self {
        Value::None
    }

    pub fn from_tensor(tensor: Tensor) -> Self {
        Value::Tensor(tensor)
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn from_double(value: f64) -> Self {
        Value::Double(value)
    }

    pub fn from_int(value: i64) -> Self {
        Value::Int(value)
    }

    pub fn from_bool(value: bool) -> Self {
        Value::Bool(value)
    }

    pub fn list_from_bools(values: impl Into<Arc<[bool]>>) -> Self {
        Value::ListBool(values.into())
    }

    pub fn list_from_doubles(values: impl Into<Arc<[f64]>>) -> Self {
        Value::ListDouble(values.into())
    }

    pub fn list_from_ints(values: impl Into<Arc<[i64]>>) -> Self {
        Value::ListInt(values.into())
    }

    pub fn list_from_tensors(values: impl Into<Arc<[Tensor]>>) -> Self {
        Value::ListTensor(values.into())
    }

    pub fn list_from_scalars(values: impl Into<Arc<[Scalar]>>) -> Self {
        Value::ListScalar(values.into())
    }

    pub fn list_from_optional_tensors(values: impl Into<Arc<[Option<Tensor>]>>) -> Self {
        Value::ListOptionalTensor(values.into())
    }

    /// Returns the active kind.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::None => ValueKind::None,
            Value::Tensor(_) => ValueKind::Tensor,
            Value::String(_) => ValueKind::String,
            Value::Double(_) => ValueKind::Double,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::ListBool(_) => ValueKind::ListBool,
            Value::ListDouble(_) => ValueKind::ListDouble,
            Value::ListInt(_) => ValueKind::ListInt,
            Value::ListTensor(_) => ValueKind::ListTensor,
            Value::ListScalar(_) => ValueKind::ListScalar,
            Value::ListOptionalTensor(_) => ValueKind::ListOptionalTensor,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    pub fn is_tensor(&self) -> bool {
        matches!(self, Value::Tensor(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    pub fn is_bool_list(&self) -> bool {
        matches!(self, Value::ListBool(_))
    }

    #[inline]
    pub fn is_double_list(&self) -> bool {
        matches!(self, Value::ListDouble(_))
    }

    #[inline]
    pub fn is_int_list(&self) -> bool {
        matches!(self, Value::ListInt(_))
    }

    #[inline]
    pub fn is_tensor_list(&self) -> bool {
        matches!(self, Value::ListTensor(_))
    }

    #[inline]
    pub fn is_scalar_list(&self) -> bool {
        matches!(self, Value::ListScalar(_))
    }

    #[inline]
    pub fn is_optional_tensor_list(&self) -> bool {
        matches!(self, Value::ListOptionalTensor(_))
    }

    fn mismatch(&self, expected: ValueKind) -> ValueError {
        ValueError::TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }

    /// Succeeds only for the none value.
    pub fn to_none(&self) -> Result<()> {
        match self {
            Value::None => Ok(()),
            _ => Err(self.mismatch(ValueKind::None)),
        }
    }

    pub fn to_tensor(&self) -> Result<&Tensor> {
        match self {
            Value::Tensor(t) => Ok(t),
            _ => Err(self.mismatch(ValueKind::Tensor)),
        }
    }

    /// Returns the string payload.
    ///
    /// Named `to_str` so it does not collide with [`ToString::to_string`],
    /// which renders any value for display.
    pub fn to_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            _ => Err(self.mismatch(ValueKind::String)),
        }
    }

    pub fn to_double(&self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            _ => Err(self.mismatch(ValueKind::Double)),
        }
    }

    pub fn to_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            _ => Err(self.mismatch(ValueKind::Int)),
        }
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(ValueKind::Bool)),
        }
    }

    pub fn to_bool_list(&self) -> Result<&[bool]> {
        match self {
            Value::ListBool(l) => Ok(&**l),
            _ => Err(self.mismatch(ValueKind::ListBool)),
        }
    }

    pub fn to_double_list(&self) -> Result<&[f64]> {
        match self {
            Value::ListDouble(l) => Ok(&**l),
            _ => Err(self.mismatch(ValueKind::ListDouble)),
        }
    }

    pub fn to_int_list(&self) -> Result<&[i64]> {
        match self {
            Value::ListInt(l) => Ok(&**l),
            _ => Err(self.mismatch(ValueKind::ListInt)),
        }
    }

    pub fn to_tensor_list(&self) -> Result<&[Tensor]> {
        match self {
            Value::ListTensor(l) => Ok(&**l),
            _ => Err(self.mismatch(ValueKind::ListTensor)),
        }
    }

    pub fn to_scalar_list(&self) -> Result<&[Scalar]> {
        match self {
            Value::ListScalar(l) => Ok(&**l),
            _ => Err(self.mismatch(ValueKind::ListScalar)),
        }
    }

    pub fn to_optional_tensor_list(&self) -> Result<&[Option<Tensor>]> {
        match self {
            Value::ListOptionalTensor(l) => Ok(&**l),
            _ => Err(self.mismatch(ValueKind::ListOptionalTensor)),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

impl From<Tensor> for Value {
    fn from(value: Tensor) -> Self {
        Value::Tensor(value)
    }
}

impl From<Option<Tensor>> for Value {
    fn from(value: Option<Tensor>) -> Self {
        value.map_or(Value::None, Value::Tensor)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_vec {
    ($elem:ty, $variant:ident) => {
        impl From<Vec<$elem>> for Value {
            fn from(values: Vec<$elem>) -> Self {
                Value::$variant(values.into())
            }
        }
    };
}

impl_from_vec!(bool, ListBool);
impl_from_vec!(f64, ListDouble);
impl_from_vec!(i64, ListInt);
impl_from_vec!(Tensor, ListTensor);
impl_from_vec!(Scalar, ListScalar);
impl_from_vec!(Option<Tensor>, ListOptionalTensor);

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, it) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item(f, it)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Tensor(t) => write!(f, "{}", t),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
            Value::ListBool(l) => write_list(f, l, |f, b| write!(f, "{}", b)),
            Value::ListDouble(l) => write_list(f, l, |f, d| write!(f, "{:?}", d)),
            Value::ListInt(l) => write_list(f, l, |f, i| write!(f, "{}", i)),
            Value::ListTensor(l) => write_list(f, l, |f, t| write!(f, "{}", t)),
            Value::ListScalar(l) => write_list(f, l, |f, s| write!(f, "{}", s)),
            Value::ListOptionalTensor(l) => write_list(f, l, |f, t| match t {
                Some(t) => write!(f, "{}", t),
                None => f.write_str("None"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalue_tensor::DType;

    fn tensor() -> Tensor {
        Tensor::from_slice(vec![2], &[1.0f32, 2.0]).unwrap()
    }

    #[test]
    fn test_scalar_factories() {
        assert_eq!(Value::from_int(-7).to_int().unwrap(), -7);
        assert_eq!(Value::from_double(0.25).to_double().unwrap(), 0.25);
        assert!(Value::from_bool(true).to_bool().unwrap());
        assert_eq!(Value::from_string("héllo").to_str().unwrap(), "héllo");
        assert!(Value::none().to_none().is_ok());
    }

    #[test]
    fn test_tensor_payload_shares_buffer() {
        let t = tensor();
        let value = Value::from_tensor(t.clone());
        let held = value.to_tensor().unwrap();

        assert_eq!(held, &t);
        assert_eq!(held.data().as_ptr(), t.data().as_ptr());
        assert_eq!(held.dtype(), DType::Float32);
    }

    #[test]
    fn test_list_accessors_share_storage() {
        let value = Value::list_from_ints(vec![1i64, 2, 3]);
        let clone = value.clone();

        let a = value.to_int_list().unwrap();
        let b = clone.to_int_list().unwrap();
        assert_eq!(a, &[1, 2, 3]);
        assert_eq!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn test_optional_tensor_list_keeps_gaps() {
        let value = Value::list_from_optional_tensors(vec![Some(tensor()), None, Some(tensor())]);
        let list = value.to_optional_tensor_list().unwrap();

        assert_eq!(list.len(), 3);
        assert!(list[0].is_some());
        assert!(list[1].is_none());
        assert!(value.is_optional_tensor_list());
    }

    #[test]
    fn test_scalar_list() {
        let value = Value::list_from_scalars(vec![Scalar::Int(1), 2.5.into(), true.into()]);
        assert_eq!(
            value.to_scalar_list().unwrap(),
            &[Scalar::Int(1), Scalar::Double(2.5), Scalar::Bool(true)]
        );
        assert_eq!(value.kind(), ValueKind::ListScalar);
    }

    #[test]
    fn test_mismatch_reports_both_kinds() {
        let err = Value::from_bool(false).to_int().unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                expected: ValueKind::Int,
                actual: ValueKind::Bool,
            }
        );

        let err = Value::none().to_tensor_list().unwrap_err();
        assert_eq!(err.to_string(), "expected value of kind ListTensor, found None");
    }

    #[test]
    fn test_from_conversions() {
        assert!(Value::from(3i64).is_int());
        assert!(Value::from(3.0f64).is_double());
        assert!(Value::from(false).is_bool());
        assert!(Value::from("s").is_string());
        assert!(Value::from(String::from("s")).is_string());
        assert!(Value::from(tensor()).is_tensor());
        assert!(Value::from(None::<Tensor>).is_none());
        assert!(Value::from(Some(tensor())).is_tensor());
        assert!(Value::from(vec![true]).is_bool_list());
        assert!(Value::from(vec![1.0f64]).is_double_list());
        assert!(Value::from(vec![1i64]).is_int_list());
        assert!(Value::from(vec![tensor()]).is_tensor_list());
        assert!(Value::from(vec![Scalar::Bool(true)]).is_scalar_list());
        assert!(Value::from(vec![None::<Tensor>]).is_optional_tensor_list());
        assert!(Value::default().is_none());
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let value = Value::list_from_doubles(Vec::<f64>::new());
        assert!(value.to_double_list().unwrap().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::none().to_string(), "None");
        assert_eq!(Value::from_int(42).to_string(), "42");
        assert_eq!(Value::from_double(1.0).to_string(), "1.0");
        assert_eq!(Value::from_string("a\"b").to_string(), "\"a\\\"b\"");
        assert_eq!(Value::list_from_bools(vec![true, false]).to_string(), "[true, false]");
        assert_eq!(
            Value::list_from_optional_tensors(vec![None, Some(tensor())]).to_string(),
            "[None, tensor<float32>[2]]"
        );
        assert_eq!(
            Value::list_from_scalars(vec![Scalar::Int(1), Scalar::Double(0.5)]).to_string(),
            "[1, 0.5]"
        );
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_value(Value::from_int(5)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "Int", "value": 5}));

        let json = serde_json::to_value(Value::none()).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "None"}));

        let json = serde_json::to_value(Value::from_tensor(tensor())).unwrap();
        assert_eq!(json["value"]["dtype"], "float32");
        assert_eq!(json["value"]["shape"], serde_json::json!([2]));
    }

    #[test]
    fn test_value_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
    }
}
