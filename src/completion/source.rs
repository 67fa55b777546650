//! Completion source: the host-facing entry point
//!
//! Threads one completion request through the pipeline:
//! context → categories → analyzer → formatter → ranking.
//!
//! Nothing here fails from the host's point of view. A missing analyzer
//! yields no completion position, and analyzer failures yield no candidates.

use serde::Serialize;
use tracing::{debug, warn};

use super::context::{self, CompletionContext};
use super::formatter::{format_entries, CandidateRecord};
use super::ranking::rank_candidates;
use super::rules::{input_pattern, CategorySet};
use crate::analyzer::{create_gateway, AnalyzerGateway};
use crate::config::CompletionConfig;
use crate::models::StructuredEntry;
use crate::serde_helpers::serialize_offset;

/// Static description of the source for host registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub mark: &'static str,
    pub filetypes: Vec<&'static str>,
    pub rank: u32,
    pub input_pattern: String,
}

/// Result of a full completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResponse {
    /// Completion start offset, `-1` on the wire when completion is disabled
    #[serde(serialize_with = "serialize_offset")]
    pub start: Option<usize>,
    pub candidates: Vec<CandidateRecord>,
}

/// LaTeX completion source backed by an external analyzer
pub struct CompletionSource {
    config: CompletionConfig,
    gateway: Box<dyn AnalyzerGateway>,
}

impl CompletionSource {
    pub fn new(config: CompletionConfig, gateway: Box<dyn AnalyzerGateway>) -> Self {
        Self { config, gateway }
    }

    /// Source backed by the analyzer process described in `config`
    pub fn from_config(config: CompletionConfig) -> Self {
        let gateway = create_gateway(&config);
        Self::new(config, gateway)
    }

    pub fn metadata() -> SourceMetadata {
        SourceMetadata {
            name: "tex",
            mark: "[tex]",
            filetypes: vec!["tex"],
            rank: 500,
            input_pattern: input_pattern(),
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Completion start offset, or `None` when no analyzer is configured
    pub fn get_complete_position(&self, left_context: &str) -> Option<usize> {
        if !self.config.is_enabled() {
            return None;
        }
        Some(context::complete_position(left_context))
    }

    /// Classify the left context, or `None` when no analyzer is configured
    pub fn classify(&self, left_context: &str) -> Option<CompletionContext> {
        if !self.config.is_enabled() {
            return None;
        }
        Some(context::classify(left_context))
    }

    /// Ranked candidates for the left context
    pub fn gather_candidates(&self, left_context: &str) -> Vec<CandidateRecord> {
        match self.classify(left_context) {
            Some(context) => self.candidates_for(&context),
            None => Vec::new(),
        }
    }

    /// Start offset and ranked candidates in one pass
    pub fn complete(&self, left_context: &str) -> CompletionResponse {
        match self.classify(left_context) {
            Some(context) => CompletionResponse {
                start: Some(context.start_offset),
                candidates: self.candidates_for(&context),
            },
            None => CompletionResponse {
                start: None,
                candidates: Vec::new(),
            },
        }
    }

    fn candidates_for(&self, context: &CompletionContext) -> Vec<CandidateRecord> {
        if !context.wants_candidates() {
            debug!("No completion category for {:?}", context.keyword);
            return Vec::new();
        }
        let entries = self.fetch_entries(&context.categories);
        let records = format_entries(&entries);
        debug!(
            "Formatted {} of {} analyzer entries",
            records.len(),
            entries.len()
        );
        rank_candidates(records)
    }

    fn fetch_entries(&self, categories: &CategorySet) -> Vec<StructuredEntry> {
        if categories.is_empty() {
            return Vec::new();
        }
        match self.gateway.fetch(categories, &self.config.main_file) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("{} failed: {}", self.gateway.backend_name(), e);
                Vec::new()
            }
        }
    }
}
