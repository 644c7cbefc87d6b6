//! Encode/decode throughput benchmarks over a representative transfer
//! record.
//!
//! Run with `cargo bench`.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use freighter::schema::{DecimalSchema, FieldSchema, RecordSchema};
use freighter::{decode_datum, encode_datum, read_container, write_container, Money, Schema, Value};

fn transfer_schema() -> Schema {
    let account = Schema::Union(vec![
        Schema::Record(RecordSchema::new(
            "DanishAccount",
            vec![
                FieldSchema::new("regnr", Schema::String),
                FieldSchema::new("kontonr", Schema::String),
            ],
        )),
        Schema::Record(RecordSchema::new(
            "IbanAccount",
            vec![
                FieldSchema::new("countryCode", Schema::String),
                FieldSchema::new("checkDigits", Schema::Int),
                FieldSchema::new("BBAN", Schema::String),
            ],
        )),
    ]);

    Schema::Record(RecordSchema::new(
        "TransferRequest",
        vec![
            FieldSchema::new("amount", Schema::Decimal(DecimalSchema::new(10, 2))),
            FieldSchema::new("currencyCode", Schema::String),
            FieldSchema::new("date", Schema::Date),
            FieldSchema::new("from", account.clone()),
            FieldSchema::new("to", account),
        ],
    ))
}

fn transfer_value() -> Value {
    Value::record(vec![
        ("amount", Value::Decimal(Money::new(10000, 2))),
        ("currencyCode", Value::String("DKK".into())),
        (
            "date",
            Value::Date(chrono::NaiveDate::from_ymd_opt(2020, 2, 5).unwrap()),
        ),
        (
            "from",
            Value::union(
                0,
                Value::record(vec![
                    ("regnr", Value::String("1000".into())),
                    ("kontonr", Value::String("0000001234".into())),
                ]),
            ),
        ),
        (
            "to",
            Value::union(
                1,
                Value::record(vec![
                    ("countryCode", Value::String("DK".into())),
                    ("checkDigits", Value::Int(12)),
                    ("BBAN", Value::String("9999000999".into())),
                ]),
            ),
        ),
    ])
}

fn bench_datum(c: &mut Criterion) {
    let schema = transfer_schema();
    let value = transfer_value();
    let bytes = encode_datum(&value, &schema).unwrap();

    let mut group = c.benchmark_group("datum");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| encode_datum(black_box(&value), black_box(&schema)).unwrap())
    });
    group.bench_function("decode", |b| {
        b.iter(|| decode_datum(black_box(&bytes), black_box(&schema)).unwrap())
    });

    group.finish();
}

fn bench_container(c: &mut Criterion) {
    let schema = transfer_schema();
    let value = transfer_value();
    let bytes = write_container(&value, &schema).unwrap();

    let mut group = c.benchmark_group("container");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("write", |b| {
        b.iter(|| write_container(black_box(&value), black_box(&schema)).unwrap())
    });
    group.bench_function("read", |b| {
        b.iter(|| read_container(black_box(&bytes)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_datum, bench_container);
criterion_main!(benches);
