//! Context detection for completion
//!
//! Works on the text left of the cursor only. Two things are derived from it:
//! 1. Where the completed word starts (the completion start offset)
//! 2. Which categories the analyzer should be asked for
//!
//! The category lookup key is the text from the last backslash to the cursor.
//! Every rule in [`CATEGORY_RULES`] is tried in order and all matching rules
//! contribute their categories.

use super::rules::{CategoryRule, CategorySet, CATEGORY_RULES};
use tracing::debug;

/// Completion context for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    /// Character index in the left context where the inserted word starts
    pub start_offset: usize,

    /// Lookup key the rules were matched against
    pub keyword: String,

    /// Categories requested from the analyzer (empty means no request)
    pub categories: CategorySet,
}

impl CompletionContext {
    /// Whether this context should trigger an analyzer request
    pub fn wants_candidates(&self) -> bool {
        !self.categories.is_empty()
    }
}

/// Classify the text left of the cursor
pub fn classify(left_context: &str) -> CompletionContext {
    let start_offset = complete_position(left_context);
    let keyword = category_key(left_context);
    let categories = determine_categories(&keyword);

    debug!(
        "Classified {:?}: start={}, categories=[{}]",
        keyword,
        start_offset,
        categories.to_tags()
    );

    CompletionContext {
        start_offset,
        keyword,
        categories,
    }
}

/// Start of the trailing run of word characters, in characters
///
/// Equals the character length of `left_context` when it is empty or ends
/// with a non-word character.
pub fn complete_position(left_context: &str) -> usize {
    let total = left_context.chars().count();
    let trailing = left_context
        .chars()
        .rev()
        .take_while(|c| is_word_char(*c))
        .count();
    total - trailing
}

/// Text after the last backslash, re-prefixed with a single backslash
///
/// Without any backslash the whole context is used.
pub fn category_key(left_context: &str) -> String {
    let tail = match left_context.rfind('\\') {
        Some(idx) => &left_context[idx + 1..],
        None => left_context,
    };
    format!("\\{}", tail)
}

/// Union of the categories of every built-in rule matching `key`
pub fn determine_categories(key: &str) -> CategorySet {
    union_of(&CATEGORY_RULES, key)
}

/// Union of the categories of every rule in `rules` matching `key`, in rule order
pub fn union_of(rules: &[CategoryRule], key: &str) -> CategorySet {
    let mut categories = CategorySet::new();
    for rule in rules {
        if rule.matches(key) {
            categories.extend(rule.categories.iter().copied());
        }
    }
    categories
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
