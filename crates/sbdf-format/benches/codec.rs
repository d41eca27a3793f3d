//! Benchmarks for SBDF value-array encoding and decoding.

#![allow(clippy::unwrap_used, missing_docs)]

use bytes::BytesMut;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::io::Cursor;

use sbdf_format::ValueArray;
use sbdf_types::{SbdfValue, ValueType};

fn double_array(len: usize) -> ValueArray {
    let values = (0..len).map(|i| SbdfValue::Double(i as f64 * 0.5)).collect();
    ValueArray::plain(ValueType::Double, values).unwrap()
}

fn string_array(len: usize) -> ValueArray {
    let values = (0..len)
        .map(|i| SbdfValue::String(format!("value-{i}")))
        .collect();
    ValueArray::plain(ValueType::String, values).unwrap()
}

fn bench_plain_double_encode(c: &mut Criterion) {
    let array = double_array(10_000);
    let mut group = c.benchmark_group("value_array");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("plain_double_encode", |b| {
        b.iter(|| {
            let mut buf = BytesMut::with_capacity(80 * 1024);
            array.write(&mut buf).unwrap();
            black_box(buf)
        })
    });
    group.finish();
}

fn bench_plain_double_decode(c: &mut Criterion) {
    let array = double_array(10_000);
    let mut buf = BytesMut::new();
    array.write(&mut buf).unwrap();
    let encoded = buf.freeze();

    c.bench_function("plain_double_decode", |b| {
        b.iter(|| {
            let decoded = ValueArray::read(&mut Cursor::new(&encoded[..])).unwrap();
            black_box(decoded)
        })
    });
}

fn bench_plain_string_roundtrip(c: &mut Criterion) {
    let array = string_array(1_000);
    let mut buf = BytesMut::new();
    array.write(&mut buf).unwrap();
    let encoded = buf.freeze();

    c.bench_function("plain_string_decode", |b| {
        b.iter(|| {
            let decoded = ValueArray::read(&mut Cursor::new(&encoded[..])).unwrap();
            black_box(decoded)
        })
    });
}

fn bench_bit_array_decode(c: &mut Criterion) {
    let bools: Vec<bool> = (0..50_000).map(|i| i % 3 == 0).collect();
    let array = ValueArray::bit_from_bools(&bools);
    let mut buf = BytesMut::new();
    array.write(&mut buf).unwrap();
    let encoded = buf.freeze();

    c.bench_function("bit_array_decode", |b| {
        b.iter(|| {
            let decoded = ValueArray::read(&mut Cursor::new(&encoded[..])).unwrap();
            black_box(decoded)
        })
    });
}

criterion_group!(
    benches,
    bench_plain_double_encode,
    bench_plain_double_decode,
    bench_plain_string_roundtrip,
    bench_bit_array_decode
);
criterion_main!(benches);
