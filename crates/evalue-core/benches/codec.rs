use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use evalue_core::{decode_values, encode_values, Tensor, Value};

fn bench_scalars(c: &mut Criterion) {
    let int = Value::from_int(42);
    let encoded = int.encode().unwrap();

    c.bench_function("encode_int", |b| b.iter(|| black_box(&int).encode().unwrap()));
    c.bench_function("decode_int", |b| {
        b.iter(|| Value::decode(black_box(&encoded)).unwrap())
    });
}

fn bench_tensors(c: &mut Criterion) {
    let mut group = c.benchmark_group("tensor_value");
    for numel in [16usize, 1024, 65536] {
        let data: Vec<f32> = (0..numel).map(|i| i as f32).collect();
        let value = Value::from_tensor(Tensor::from_slice(vec![numel], &data).unwrap());
        let encoded = value.encode().unwrap();
        group.throughput(Throughput::Bytes(encoded.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", numel), &value, |b, v| {
            b.iter(|| v.encode().unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decode", numel), &encoded, |b, e| {
            b.iter(|| Value::decode(e).unwrap())
        });
    }
    group.finish();
}

fn bench_sequence(c: &mut Criterion) {
    let values: Vec<Value> = (0..64)
        .map(|i| match i % 3 {
            0 => Value::from_int(i),
            1 => Value::from_double(i as f64),
            _ => Value::from_string(format!("value-{}", i)),
        })
        .collect();
    let encoded = encode_values(&values).unwrap();

    c.bench_function("encode_values_64", |b| {
        b.iter(|| encode_values(black_box(&values)).unwrap())
    });
    c.bench_function("decode_values_64", |b| {
        b.iter(|| decode_values(black_box(&encoded)).unwrap())
    });
}

criterion_group!(benches, bench_scalars, bench_tensors, bench_sequence);
criterion_main!(benches);
