//! Validation and session performance benchmarks.
//!
//! Measures built-in rule evaluation per pillar and a full review pass.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use aletheia::validation::CategoryValidation;
use aletheia::{LabelerConfig, LabelingItem, LabelingSession, Pillar, ValidationEngine};

/// Item with every metadata signal the built-in rules read.
fn sample_item(i: usize, pillar: Pillar) -> LabelingItem {
    LabelingItem::new(format!("item-{}", i), "input", "output")
        .with_pillar(pillar)
        .with_quality_score((i % 10) as f64 / 10.0)
        .with_meta("quality_score", (i % 5) as f64)
        .with_meta("neutrality_score", (i % 6) as f64)
        .with_meta("tonality_match", i % 2 == 0)
        .with_meta("task_type_valid", true)
        .with_meta("ethical_check", true)
        .with_meta("gdpr_compliant", i % 3 != 0)
        .with_meta("has_valid_citations", true)
        .with_meta("open_access", i % 4 != 0)
        .with_meta("factually_accurate", true)
        .with_meta("sourceCitation", "APA")
        .with_meta("isNeutral", true)
}

fn sample_items(n: usize) -> Vec<LabelingItem> {
    (0..n)
        .map(|i| sample_item(i, Pillar::all()[i % 3]))
        .collect()
}

/// Benchmark built-in rule evaluation.
fn bench_pillar_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("pillar_rules");
    let engine = ValidationEngine::new();

    for &pillar in Pillar::all() {
        let item = sample_item(7, pillar);
        group.bench_with_input(BenchmarkId::from_parameter(pillar), &item, |b, item| {
            b.iter(|| {
                let results = engine.validate(pillar, black_box(item));
                black_box(ValidationEngine::summarize(&results))
            })
        });
    }

    group.finish();
}

/// Benchmark a complete review pass with category validation on every save.
fn bench_review_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("review_pass");
    let config = LabelerConfig::new()
        .with_validation("scientific", CategoryValidation::new().with_required_citation())
        .with_validation("psychological", CategoryValidation::new().with_neutrality_check())
        .with_validation("technical", CategoryValidation::new().with_min_quality_score(0.3));

    for size in [100usize, 1_000] {
        let items = sample_items(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| {
                let mut session = LabelingSession::new(items.clone(), config.clone());
                while !session.is_complete() {
                    if session.validate().is_valid {
                        let _ = session.mark_completed(None);
                    } else {
                        let _ = session.mark_skipped();
                    }
                }
                black_box(session.stats())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pillar_rules, bench_review_pass);
criterion_main!(benches);
