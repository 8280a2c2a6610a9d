//! StoreZen catalog search benchmarks
//!
//! Measures index rebuilds and both search tiers on synthetic catalogs.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use std::sync::Arc;
use std::time::Duration;
use storezen_lib::catalog::{IndexedField, Product};
use storezen_lib::config::SearchConfig;
use storezen_lib::{PrefixIndex, ProductSearch};

const CATEGORIES: [&str; 6] = ["Groceries", "Dairy", "Spices", "Fruits", "Beverages", "Electronics"];
const WORDS: [&str; 8] = ["Amul", "Basmati", "Green", "Masala", "Organic", "Sweet", "Premium", "Fresh"];

fn synthetic_catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| {
            let name = format!("{} Item {}", WORDS[i % WORDS.len()], i);
            Product::new(i as i64, name, CATEGORIES[i % CATEGORIES.len()])
        })
        .collect()
}

/// Benchmark building the prefix index from scratch
fn bench_index_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_index_rebuild");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [100, 1000, 10_000].iter() {
        let products: Vec<Arc<Product>> = synthetic_catalog(*size).into_iter().map(Arc::new).collect();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("rebuild", size), &products, |b, products| {
            let mut index = PrefixIndex::with_fields(IndexedField::defaults());
            b.iter(|| {
                index.rebuild(products.iter().cloned());
                black_box(index.node_count());
            });
        });
    }

    group.finish();
}

/// Benchmark prefix lookups by query length
fn bench_prefix_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_search");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    let index = PrefixIndex::from_products(
        IndexedField::defaults(),
        synthetic_catalog(10_000).into_iter().map(Arc::new),
    );

    for query in ["g", "gr", "gree", "green item 1"].iter() {
        group.bench_with_input(BenchmarkId::new("query", query.len()), query, |b, query| {
            b.iter(|| black_box(index.search(query)));
        });
    }

    group.finish();
}

/// Benchmark the full two-tier search, including the substring fallback
fn bench_two_tier_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_tier_search");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    let mut search = ProductSearch::new(SearchConfig::default());
    search.load(synthetic_catalog(10_000));

    group.bench_function("prefix_hit", |b| {
        b.iter(|| black_box(search.search("masala")));
    });
    group.bench_function("substring_fallback", |b| {
        b.iter(|| black_box(search.search("item 99")));
    });
    group.bench_function("no_match", |b| {
        b.iter(|| black_box(search.search("zzz")));
    });

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_index_rebuild, bench_prefix_search, bench_two_tier_search
}

criterion_main!(benches);
