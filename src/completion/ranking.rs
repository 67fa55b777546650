//! Ranking and sorting of completion candidates
//!
//! Candidates are ordered by two stable sorts, applied in this order:
//! 1. Kind, descending
//! 2. Sort key, ascending
//!
//! The second pass dominates: the final order is by sort key, and only
//! candidates with equal sort keys keep the kind-descending order from the
//! first pass. Sections and labels carry an empty sort key, so they lead the
//! list, with sections (`s`) ahead of labels (`l`).

use super::formatter::CandidateRecord;

/// Rank candidates with the two-pass stable sort
pub fn rank_candidates(mut records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    sort_by_kind_descending(&mut records);
    sort_by_key_ascending(&mut records);
    records
}

fn sort_by_kind_descending(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| b.kind.cmp(&a.kind));
}

fn sort_by_key_ascending(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
}
