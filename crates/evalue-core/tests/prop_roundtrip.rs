//! Property-based round-trip tests for the wire codec.
//!
//! Random scalars, strings and small tensors must survive
//! `decode(encode(value))`, alone and inside framed sequences, and
//! arbitrary bytes must decode to a value or an error without panicking.
//!
//! Doubles are compared by bit pattern, so NaN payloads are covered too.
//! Sequence tests leave NaN out because `Value` equality follows `f64`.
use evalue_core::{decode_values, encode_values, Tensor, Value};
use proptest::collection::vec;
use proptest::prelude::*;

/// Small i64 tensors, including empty and zero-dimensional shapes.
fn arb_tensor() -> impl Strategy<Value = Tensor> {
    vec(1usize..4, 0..3).prop_flat_map(|shape| {
        let numel = shape.iter().product::<usize>();
        vec(any::<i64>(), numel).prop_map(move |data| {
            Tensor::from_slice(shape.clone(), &data).expect("data matches shape")
        })
    })
}

/// Any non-list value whose equality is reflexive.
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::none()),
        arb_tensor().prop_map(Value::from_tensor),
        any::<String>().prop_map(Value::from_string),
        any::<f64>()
            .prop_filter("NaN is not equal to itself", |d| !d.is_nan())
            .prop_map(Value::from_double),
        any::<i64>().prop_map(Value::from_int),
        any::<bool>().prop_map(Value::from_bool),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn int_round_trips(n in any::<i64>()) {
        let decoded = Value::decode(&Value::from_int(n).encode().unwrap()).unwrap();
        prop_assert_eq!(decoded.to_int().unwrap(), n);
    }

    #[test]
    fn double_round_trips_bit_exact(bits in any::<u64>()) {
        let d = f64::from_bits(bits);
        let decoded = Value::decode(&Value::from_double(d).encode().unwrap()).unwrap();
        prop_assert_eq!(decoded.to_double().unwrap().to_bits(), bits);
    }

    #[test]
    fn string_round_trips(s in any::<String>()) {
        let encoded = Value::from_string(s.as_str()).encode().unwrap();
        prop_assert_eq!(encoded.len(), 1 + s.len());
        let decoded = Value::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.to_str().unwrap(), s.as_str());
    }

    #[test]
    fn bool_round_trips(b in any::<bool>()) {
        let decoded = Value::decode(&Value::from_bool(b).encode().unwrap()).unwrap();
        prop_assert_eq!(decoded.to_bool().unwrap(), b);
    }

    #[test]
    fn tensor_round_trips(tensor in arb_tensor()) {
        let value = Value::from_tensor(tensor.clone());
        let encoded = value.encode().unwrap();
        prop_assert_eq!(encoded.len(), value.encoded_len().unwrap());

        let decoded = Value::decode(&encoded).unwrap();
        let back = decoded.to_tensor().unwrap();
        prop_assert_eq!(back.shape(), tensor.shape());
        prop_assert_eq!(back.to_i64_vec().unwrap(), tensor.to_i64_vec().unwrap());
    }

    #[test]
    fn sequence_round_trips(values in vec(arb_value(), 0..8)) {
        let encoded = encode_values(&values).unwrap();
        prop_assert_eq!(decode_values(&encoded).unwrap(), values);
    }

    #[test]
    fn decode_never_panics(bytes in vec(any::<u8>(), 0..64)) {
        let _ = Value::decode(&bytes);
        let _ = decode_values(&bytes);
    }
}
