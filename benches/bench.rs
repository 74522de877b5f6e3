//! Criterion benchmarks for the skumatch resolution engine.
//!
//! Covers the hot paths:
//! - Similarity ratio primitives
//! - Token extraction
//! - Full pipeline resolution against a generated catalog

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use skumatch::similarity::{ratio, token_sort_ratio};
use skumatch::tokens::TokenExtractor;
use skumatch::{CatalogCache, CatalogEntry, CatalogHandle, Matcher};

/// Generate a synthetic catalog for benchmarking.
fn generate_catalog(count: usize) -> Vec<CatalogEntry> {
    let families = [
        "Rakza", "Tenergy", "Dignics", "Evolution", "Fastarc", "Rozena", "Hexer", "Bluefire",
    ];
    let colors = ["Black", "Red"];
    let sizes = ["1.8mm", "2.0mm", "2.1mm", "Max"];

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let family = families[i % families.len()];
        let color = colors[(i / families.len()) % colors.len()];
        let size = sizes[(i / (families.len() * colors.len())) % sizes.len()];
        entries.push(CatalogEntry::new(
            format!("{:05}", 10000 + i),
            format!("{family} {} {color} {size}", i % 90 + 5),
        ));
    }
    entries
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ratio", |b| {
        b.iter(|| ratio(black_box("Rakza 9 Black 2.0mm"), black_box("Rakza 9 Red 2.0mm")))
    });

    group.bench_function("token_sort_ratio", |b| {
        b.iter(|| {
            token_sort_ratio(
                black_box("Black Rakza 9 2.0mm"),
                black_box("Rakza 9 Black 2.0mm"),
            )
        })
    });

    group.finish();
}

fn bench_token_extraction(c: &mut Criterion) {
    let extractor = TokenExtractor::new();

    c.bench_function("token_extract", |b| {
        b.iter(|| extractor.extract(black_box("Rakza 9 Black 2.0mm (special offer)")))
    });
}

fn bench_resolution(c: &mut Criterion) {
    let handle = Arc::new(CatalogHandle::new(CatalogCache::build(
        generate_catalog(1000),
        Vec::new(),
    )));
    let matcher = Matcher::new(handle);

    let mut group = c.benchmark_group("resolve");

    group.bench_function("exact_code", |b| {
        b.iter(|| matcher.resolve(None, black_box(Some("10042"))))
    });

    group.bench_function("fuzzy_name", |b| {
        b.iter(|| matcher.resolve(black_box(Some("Rakza 13 Black")), None))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| matcher.resolve(black_box(Some("entirely unrelated input")), None))
    });

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_token_extraction, bench_resolution);
criterion_main!(benches);
