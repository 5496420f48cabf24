use std::hint::black_box;
use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};

use numstat::config::{ErrorReportConfig, ErrorReportStyle};
use numstat::order_stats::{percentile, sort_values};
use numstat::{aggregate, extract_field, stats, AggregateConfig, ErrorReporter};

fn quiet() -> ErrorReporter {
    ErrorReporter::new(ErrorReportConfig {
        style: ErrorReportStyle::Off,
        file: None,
    })
}

fn numbers(n: usize) -> Vec<u8> {
    (0..n)
        .map(|i| format!("{}.{}\n", (i * 7919) % 100_003, i % 100))
        .collect::<String>()
        .into_bytes()
}

fn tsv_rows(n: usize) -> Vec<u8> {
    (0..n)
        .map(|i| format!("host-{}\t{}\t{}\n", i % 16, i % 503, (i * 31) % 10_007))
        .collect::<String>()
        .into_bytes()
}

fn bench_extract_field(c: &mut Criterion) {
    let line = "2024-01-01\tGET\t/api/v1/items\t200\t1532";
    c.bench_function("extract_field_tab_5", |b| {
        b.iter(|| {
            black_box(extract_field(black_box(line), "\t", black_box(5)));
        });
    });
}

fn bench_aggregate_running_totals(c: &mut Criterion) {
    let input = numbers(100_000);
    let config = AggregateConfig::default();
    let sink = quiet();
    c.bench_function("aggregate_100k_totals", |b| {
        b.iter(|| {
            let result = aggregate(Cursor::new(input.as_slice()), &config, &sink).unwrap();
            black_box(result.sum);
        });
    });
}

fn bench_aggregate_field_extraction(c: &mut Criterion) {
    let input = tsv_rows(100_000);
    let config = AggregateConfig {
        field_index: 3,
        ..AggregateConfig::default()
    };
    let sink = quiet();
    c.bench_function("aggregate_100k_field_3", |b| {
        b.iter(|| {
            let result = aggregate(Cursor::new(input.as_slice()), &config, &sink).unwrap();
            black_box(result.count);
        });
    });
}

fn bench_compute_order_stats(c: &mut Criterion) {
    let input = numbers(100_000);
    let config = AggregateConfig {
        need_values: true,
        median: true,
        percentile_rank: 99,
        ..AggregateConfig::default()
    };
    let sink = quiet();
    c.bench_function("compute_100k_median_p99", |b| {
        b.iter(|| {
            let result = stats::compute(Cursor::new(input.as_slice()), &config, &sink).unwrap();
            black_box(result.percentile);
        });
    });
}

fn bench_sort_and_percentile(c: &mut Criterion) {
    let values: Vec<f64> = (0..100_000)
        .map(|i| ((i * 7919) % 100_003) as f64)
        .collect();
    c.bench_function("sort_100k_then_p95", |b| {
        b.iter(|| {
            let mut sorted = values.clone();
            sort_values(&mut sorted);
            black_box(percentile(&sorted, 95));
        });
    });
}

criterion_group!(
    aggregate_benches,
    bench_extract_field,
    bench_aggregate_running_totals,
    bench_aggregate_field_extraction,
    bench_compute_order_stats,
    bench_sort_and_percentile
);
criterion_main!(aggregate_benches);
