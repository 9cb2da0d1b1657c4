//! Benchmarks for chatlens parsing and processing operations.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- parse_str`

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatlens::core::output::{to_csv, to_json, to_jsonl};
use chatlens::core::{ChatStats, FilterConfig, OutputConfig, apply_filters};
use chatlens::parser::ChatParser;
use chatlens::parsing::{accumulate, match_header, normalize_timestamp};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Mixed export: iOS and Android headers, continuations, media, system lines.
fn generate_export(count: usize) -> String {
    let mut lines = Vec::with_capacity(count * 2);
    for i in 0..count {
        let sender = ["Alice", "Bob", "Иван"][i % 3];
        let day = i % 28 + 1;
        let hour = i % 24;
        let minute = i % 60;
        match i % 10 {
            0 => lines.push(format!("{day:02}.03.2024, {hour:02}:{minute:02} - {sender} joined using this group's invite link")),
            1 => lines.push(format!("[3/{day}/24, {hour:02}:{minute:02}:00] {sender}: <attached: {i:08}-PHOTO.jpg>")),
            2 => lines.push(format!("{day:02}.03.2024, {hour:02}:{minute:02} - {sender}: <Media omitted>")),
            3 => {
                lines.push(format!("[3/{day}/24, {hour:02}:{minute:02}:00] {sender}: first line {i}"));
                lines.push("second line".to_string());
                lines.push(String::new());
                lines.push("after a blank".to_string());
            }
            _ => lines.push(format!("[3/{day}/24, {hour:02}:{minute:02}:00] {sender}: Message number {i}")),
        }
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_str");
    let parser = ChatParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let log = parser.parse_str(black_box(txt));
                black_box(log)
            });
        });
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_reader");
    let parser = ChatParser::new();

    for size in [1_000_usize, 10_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Bytes(txt.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let count = parser
                    .stream_reader(Cursor::new(black_box(txt.as_bytes())))
                    .filter_map(Result::ok)
                    .count();
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_accumulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulate");

    for size in [1_000_usize, 10_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| black_box(accumulate(black_box(txt))));
        });
    }
    group.finish();
}

fn bench_header_matching(c: &mut Criterion) {
    let lines = [
        ("bracketed_seconds", "[1/15/25, 10:30:45] Alice: Hello"),
        ("attachment", "[1/15/25, 10:30:45] Alice: <attached: 00000012-PHOTO.jpg>"),
        ("dashed", "15.01.2025, 10:30 - Alice: Hello"),
        ("system", "15.01.2025, 10:30 - Alice left"),
        ("continuation", "just some text without a header"),
    ];

    let mut group = c.benchmark_group("match_header");
    for (name, line) in lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), line, |b, line| {
            b.iter(|| black_box(match_header(black_box(line))));
        });
    }
    group.finish();

    c.bench_function("normalize_timestamp", |b| {
        b.iter(|| black_box(normalize_timestamp(black_box("1/15/25, 10:30 PM"))));
    });
}

// =============================================================================
// Processing Benchmarks
// =============================================================================

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_filters");

    for size in [1_000_usize, 10_000, 50_000] {
        let records = ChatParser::new().parse_str(&generate_export(size)).into_records();
        let config = FilterConfig::new()
            .with_participant("Alice")
            .with_query("message")
            .with_include_system(false)
            .with_date_from("2024-03-05")
            .unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let filtered = apply_filters(black_box(records.clone()), &config);
                black_box(filtered)
            });
        });
    }
    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");

    for size in [1_000_usize, 10_000, 50_000] {
        let records = ChatParser::new().parse_str(&generate_export(size)).into_records();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(ChatStats::from_records(black_box(records))));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let records = ChatParser::new().parse_str(&generate_export(10_000)).into_records();
    let config = OutputConfig::new().with_derived();

    let mut group = c.benchmark_group("output");
    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("csv", |b| b.iter(|| black_box(to_csv(&records, &config).unwrap())));
    group.bench_function("json", |b| b.iter(|| black_box(to_json(&records, &config).unwrap())));
    group.bench_function("jsonl", |b| b.iter(|| black_box(to_jsonl(&records, &config).unwrap())));
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let parser = ChatParser::new();
    let filter = FilterConfig::new().with_include_system(false);
    let output = OutputConfig::new();

    for size in [1_000_usize, 10_000] {
        let txt = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let log = parser.parse_str(black_box(txt)).filter(&filter);
                let csv = to_csv(log.records(), &output).unwrap();
                black_box(csv)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_parse_str,
    bench_stream,
    bench_accumulate,
    bench_header_matching,
    bench_filters,
    bench_stats,
    bench_output,
    bench_full_pipeline,
);

criterion_main!(benches);
