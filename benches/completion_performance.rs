//! Benchmark suite for the completion pipeline
//!
//! Measures:
//! - Context classification against the trigger rules
//! - Formatting analyzer entries into candidate records
//! - Two-pass ranking over large candidate lists

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use tex_completion::completion::{classify, format_entries, rank_candidates};
use tex_completion::models::StructuredEntry;

/// Mixed analyzer output of roughly `count` entries
fn generate_entries(count: usize) -> Vec<StructuredEntry> {
    let levels = ["chapter", "section", "subsection", "paragraph"];
    let types = ["article", "book", "inproceedings", "phdthesis", "misc"];

    (0..count)
        .map(|i| match i % 4 {
            0 => StructuredEntry::new(
                format!("term{}", i),
                "Glossaryentry",
                vec![json!({
                    "name": format!("Term {}", i),
                    "description": "A defined term",
                    "symbol": format!("T{}", i),
                })],
            ),
            1 => StructuredEntry::new(
                format!("ref{}", i),
                "Citation",
                vec![
                    json!({"title": format!("Paper {}", i), "authortext": format!("Author ({})", 1990 + i % 30)}),
                    json!(types[i % types.len()]),
                ],
            ),
            2 => StructuredEntry::new(
                format!("Heading {}", i),
                "Section",
                vec![json!(levels[i % levels.len()])],
            ),
            _ => StructuredEntry::new(format!("fig:{}", i), "Label", vec![json!(0)]),
        })
        .collect()
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_classification");

    let contexts = [
        ("glossary", r"The \gls{"),
        ("citation", r"as argued by \textcite[p.~4]{knuth84,lamport94,"),
        ("reference", r"see Figure~\ref{"),
        ("prose", "A long line of prose without any trigger in it at all"),
    ];

    for (name, context) in contexts.iter() {
        group.bench_with_input(BenchmarkId::new("classify", name), context, |b, context| {
            b.iter(|| classify(black_box(context)));
        });
    }

    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_formatting");

    for count in [100, 1_000, 10_000].iter() {
        let entries = generate_entries(*count);
        // throughput counts records, so every generated entry must format
        assert_eq!(format_entries(&entries).len(), *count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("format_entries", count), &entries, |b, entries| {
            b.iter(|| format_entries(black_box(entries)));
        });
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_ranking");

    for count in [100, 1_000, 10_000].iter() {
        let records = format_entries(&generate_entries(*count));
        assert_eq!(records.len(), *count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("rank_candidates", count), &records, |b, records| {
            b.iter(|| rank_candidates(black_box(records.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classification, bench_formatting, bench_ranking);

criterion_main!(benches);
