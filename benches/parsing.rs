//! Criterion benchmarks for KRN parsing, construction and sanitizing.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use krn::{Krn, KrnBuilder, safe_resource_id};

/// Benchmark: `Krn::parse` with varying shapes
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = [
        ("minimal", "//kopexa.com/a/b"),
        ("typical", "//kopexa.com/frameworks/iso27001/controls/a-5-1"),
        (
            "with_service",
            "//catalog.kopexa.com/frameworks/iso27001/controls/a-5-1",
        ),
        (
            "with_version",
            "//kopexa.com/frameworks/iso27001/controls/a-5-1@v1.2.3",
        ),
        (
            "deep",
            "//isms.kopexa.com/tenants/acme-corp/workspaces/main/control-implementations/ci-123/evidences/ev-456@latest",
        ),
    ];

    for (name, text) in test_cases {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("krn", name), &text, |b, text| {
            b.iter(|| Krn::parse(black_box(text)));
        });
    }

    group.bench_function("rejected", |b| {
        b.iter(|| Krn::parse(black_box("//kopexa.com/frameworks/-bad")));
    });

    group.finish();
}

/// Benchmark: lookups and navigation on a parsed KRN at varying depths
fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");

    for depth in [1, 2, 4, 8] {
        let mut builder = KrnBuilder::new();
        for i in 0..depth {
            builder = builder.resource(&format!("level{i}s"), &format!("id-{i}"));
        }
        let krn = builder.build().expect("valid test KRN");
        let last = format!("level{}s", depth - 1);

        group.bench_with_input(BenchmarkId::new("resource_id", depth), &krn, |b, krn| {
            b.iter(|| black_box(krn).resource_id(black_box(&last)));
        });
        group.bench_with_input(BenchmarkId::new("parent", depth), &krn, |b, krn| {
            b.iter(|| black_box(krn).parent());
        });
        group.bench_with_input(BenchmarkId::new("child", depth), &krn, |b, krn| {
            b.iter(|| black_box(krn).child("controls", "a-5-1"));
        });
    }

    group.finish();
}

/// Benchmark: builder versus parsing the same KRN
fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");

    group.bench_function("build", |b| {
        b.iter(|| {
            KrnBuilder::new()
                .service(black_box("catalog"))
                .resource(black_box("frameworks"), black_box("iso27001"))
                .resource(black_box("controls"), black_box("a-5-1"))
                .version(black_box("v1"))
                .build()
        });
    });

    group.bench_function("parse_equivalent", |b| {
        b.iter(|| Krn::parse(black_box("//catalog.kopexa.com/frameworks/iso27001/controls/a-5-1@v1")));
    });

    group.finish();
}

/// Benchmark: `safe_resource_id` on clean and messy input
fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");

    let long = "Annex A: 5.1 (Policies) ".repeat(20);
    let test_cases = [
        ("clean", "iso27001-2022"),
        ("title", "A.5.1 Policies for information security"),
        ("long", long.as_str()),
    ];

    for (name, input) in test_cases {
        group.bench_with_input(BenchmarkId::new("input", name), &input, |b, input| {
            b.iter(|| safe_resource_id(black_box(input)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_navigation,
    bench_builder,
    bench_sanitize,
);
criterion_main!(benches);
