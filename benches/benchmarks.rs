use criterion::{criterion_group, criterion_main, Criterion};
use fson::{parse, serialize, FormatOptions};

const SMALL_OBJECT: &str = r#"{ flag: bool: true, count: i32: 7, name: cstr: "fson" }"#;

fn nested_document(width: usize) -> String {
    let mut items = String::new();
    for i in 0..width {
        if i > 0 {
            items.push(',');
        }
        items.push_str(&i.to_string());
    }
    format!(
        r#"{{ app: object: {{ name: cstr: "bench", ids: array<i32>: [{}] }}, enabled: bool: true }}"#,
        items
    )
}

fn small_object_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_object");
    group.bench_function("parse", |b| b.iter(|| parse(SMALL_OBJECT).unwrap()));
    let value = parse(SMALL_OBJECT).unwrap();
    group.bench_function("serialize_compact", |b| {
        b.iter(|| serialize(&value, &FormatOptions::compact()))
    });
    group.bench_function("serialize_pretty", |b| {
        b.iter(|| serialize(&value, &FormatOptions::pretty()))
    });
    group.finish();
}

fn large_array_benchmarks(c: &mut Criterion, width: usize) {
    let text = nested_document(width);
    let mut group = c.benchmark_group(format!("large_array_{}", width));
    group.bench_function("parse", |b| b.iter(|| parse(&text).unwrap()));
    let value = parse(&text).unwrap();
    group.bench_function("serialize_compact", |b| {
        b.iter(|| serialize(&value, &FormatOptions::compact()))
    });
    group.finish();
}

fn large_array_100_benchmarks(c: &mut Criterion) {
    large_array_benchmarks(c, 100);
}

fn large_array_1000_benchmarks(c: &mut Criterion) {
    large_array_benchmarks(c, 1000);
}

fn roundtrip_benchmarks(c: &mut Criterion) {
    let text = nested_document(200);
    c.bench_function("roundtrip_compact", |b| {
        b.iter(|| fson::roundtrip(&text, &FormatOptions::compact()).unwrap())
    });
}

criterion_group!(
    benches,
    small_object_benchmarks,
    large_array_100_benchmarks,
    large_array_1000_benchmarks,
    roundtrip_benchmarks
);
criterion_main!(benches);
