//! LaTeX completion: context classification, formatting and ranking
//!
//! This module provides:
//! - Ordered trigger rules mapping the text before the cursor to categories
//! - Formatting of analyzer entries into editor-ready candidates
//! - A fixed two-pass ranking of the candidates
//! - `CompletionSource`, which wires the above to an analyzer backend

pub mod context;
pub mod formatter;
pub mod ranking;
pub mod rules;
pub mod source;

pub use context::{CompletionContext, classify, complete_position, determine_categories, union_of};
pub use formatter::{CandidateRecord, FormatError, format_entries, format_entry};
pub use ranking::rank_candidates;
pub use rules::{CategoryCode, CategoryRule, CategorySet, CitationType, SectionLevel, CATEGORY_RULES};
pub use source::{CompletionResponse, CompletionSource, SourceMetadata};
