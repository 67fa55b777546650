//! Property tests for candidate ranking
//!
//! The ranking must match a reference two-pass stable sort exactly, be
//! deterministic, and order by sort key first.

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use tex_completion::completion::{rank_candidates, CandidateRecord};

#[derive(Debug, Clone)]
struct Candidates(Vec<CandidateRecord>);

impl Arbitrary for Candidates {
    fn arbitrary(g: &mut Gen) -> Self {
        let kinds = ['g', 'c', 's', 'l'];
        let keys = ["", "", "alpha", "beta", "gamma"];
        let len = usize::arbitrary(g) % 24;
        let records = (0..len)
            .map(|i| {
                let kind = *g.choose(&kinds).unwrap();
                let sort_key = g.choose(&keys).unwrap().to_string();
                CandidateRecord {
                    kind,
                    word: format!("w{}", i),
                    abbr: format!("w{}", i),
                    menu: String::new(),
                    allow_duplicates: true,
                    sort_key,
                }
            })
            .collect();
        Candidates(records)
    }
}

/// Reference implementation: two explicit stable insertion sorts
fn reference_rank(mut records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    fn insertion_sort<F: Fn(&CandidateRecord, &CandidateRecord) -> bool>(
        records: &mut [CandidateRecord],
        before: F,
    ) {
        for i in 1..records.len() {
            let mut j = i;
            while j > 0 && before(&records[j], &records[j - 1]) {
                records.swap(j, j - 1);
                j -= 1;
            }
        }
    }
    insertion_sort(&mut records, |a, b| a.kind > b.kind);
    insertion_sort(&mut records, |a, b| a.sort_key < b.sort_key);
    records
}

#[test]
fn prop_matches_reference_two_pass_sort() {
    fn prop(candidates: Candidates) -> TestResult {
        let ranked = rank_candidates(candidates.0.clone());
        TestResult::from_bool(ranked == reference_rank(candidates.0))
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Candidates) -> TestResult);
}

#[test]
fn prop_ranking_is_deterministic() {
    fn prop(candidates: Candidates) -> TestResult {
        let first = rank_candidates(candidates.0.clone());
        let second = rank_candidates(candidates.0);
        TestResult::from_bool(first == second)
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Candidates) -> TestResult);
}

#[test]
fn prop_sort_key_dominates_then_kind_descending() {
    fn prop(candidates: Candidates) -> TestResult {
        let ranked = rank_candidates(candidates.0);
        let ordered = ranked.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            a.sort_key < b.sort_key || (a.sort_key == b.sort_key && a.kind >= b.kind)
        });
        TestResult::from_bool(ordered)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Candidates) -> TestResult);
}
