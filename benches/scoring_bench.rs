use criterion::{criterion_group, criterion_main, Criterion};
use devscore::scorer::ScoringEngine;
use devscore::snapshot::MetricsSnapshot;
use std::collections::BTreeMap;
use std::hint::black_box;

fn sample_snapshot(i: usize) -> MetricsSnapshot {
    let mut languages = BTreeMap::new();
    languages.insert("Rust".to_string(), 80_000.0 + i as f64);
    languages.insert("Go".to_string(), 20_000.0);
    languages.insert("Shell".to_string(), 1_500.0);

    MetricsSnapshot {
        repos: 10.0 + (i % 40) as f64,
        stars: (i * 53 % 20_000) as f64,
        forks: (i * 7 % 3_000) as f64,
        watchers: 25.0,
        commits: 400.0 + (i * 31 % 5_000) as f64,
        contributions: 900.0,
        current_streak: (i % 60) as f64,
        longest_streak: 90.0,
        followers: (i * 11 % 4_000) as f64,
        following: 40.0,
        organizations: (i % 7) as f64,
        pull_requests: 80.0,
        merged_pull_requests: 66.0,
        reviews: 45.0,
        issues: 12.0,
        average_repo_size: 700.0,
        account_age_years: 1.0 + (i % 12) as f64,
        languages,
        ..Default::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let engine = ScoringEngine::canonical();
    let single = sample_snapshot(42);
    let batch: Vec<MetricsSnapshot> = (0..10_000).map(sample_snapshot).collect();

    c.bench_function("compute_score", |b| {
        b.iter(|| engine.compute_score(black_box(&single)))
    });

    c.bench_function("score_batch (10k)", |b| {
        b.iter(|| engine.score_batch(black_box(&batch)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
