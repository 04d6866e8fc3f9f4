//! This bench validates and re-serializes a large batch of raw issue records,
//! each carrying a full set of perspective detail.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use news_records::{Issue, Keying, Record};
use serde_json::{Value, json};

/// Generates raw issue records in the storage convention
fn preseed_records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "_id": format!("issue-{i}"),
                "title": format!("Budget negotiations, day {i}"),
                "category": "politics",
                "summary": "Lawmakers remain split over the spending package.",
                "keywords": ["budget", "parliament", "spending"],
                "createdAt": "2024-03-01T09:30:00Z",
                "leftSummary": "Cuts fall hardest on public services.",
                "centerSummary": "Both sides signal room for compromise.",
                "rightSummary": "Spending growth must be contained.",
                "view": i,
                "coverageSpectrum": {"left": 4, "center": 7, "right": 3, "total": 14},
                "leftKeywords": ["welfare"],
                "rightKeywords": ["deficit", "tax"],
            })
        })
        .collect()
}

fn validate_many(c: &mut Criterion) {
    c.bench_function("validate issues", |b| {
        b.iter_batched(
            || preseed_records(1_000),
            |records| {
                for raw in &records {
                    black_box(Issue::validate_value(raw).unwrap());
                }
            },
            BatchSize::SmallInput,
        );
    });

    let issues: Vec<Issue> = preseed_records(1_000)
        .iter()
        .map(|raw| Issue::validate_value(raw).unwrap())
        .collect();

    c.bench_function("serialize issues", |b| {
        b.iter(|| {
            for issue in &issues {
                black_box(issue.to_record(Keying::Alias));
            }
        });
    });
}

criterion_group!(benches, validate_many);
criterion_main!(benches);
