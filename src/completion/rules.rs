//! Static completion rules and lookup tables
//!
//! Everything the classifier and formatter need to know about LaTeX commands
//! and analyzer output lives here:
//! - The ordered trigger rules (regex → categories)
//! - Variant → category mapping
//! - BibTeX entry type → single character code
//! - Sectioning level → heading marker

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use tracing::trace;

/// Completion category requested from the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryCode {
    /// `\gls{...}` and friends
    Glossary,
    /// `\cite{...}` and friends
    Citation,
    /// Sectioning commands
    Section,
    /// `\label{...}` targets for `\ref{...}`
    Label,
}

impl CategoryCode {
    pub const ALL: [CategoryCode; 4] = [
        CategoryCode::Glossary,
        CategoryCode::Citation,
        CategoryCode::Section,
        CategoryCode::Label,
    ];

    /// Single character shown in the completion menu
    pub fn kind(self) -> char {
        match self {
            CategoryCode::Glossary => 'g',
            CategoryCode::Citation => 'c',
            CategoryCode::Section => 's',
            CategoryCode::Label => 'l',
        }
    }

    /// Tag understood by the analyzer's `-a` flag
    pub fn tag(self) -> &'static str {
        match self {
            CategoryCode::Glossary => "gls",
            CategoryCode::Citation => "bib",
            CategoryCode::Section => "sec",
            CategoryCode::Label => "lbl",
        }
    }

    /// Map an analyzer entry variant onto a category.
    ///
    /// Returns `None` for variants this source does not display.
    pub fn from_variant(variant: &str) -> Option<Self> {
        match variant {
            "Glossaryentry" => Some(CategoryCode::Glossary),
            "Citation" => Some(CategoryCode::Citation),
            "Section" => Some(CategoryCode::Section),
            "Label" => Some(CategoryCode::Label),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Insertion-ordered set of categories
///
/// Keeps the order in which rules contributed their categories so the
/// analyzer receives tags in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    codes: Vec<CategoryCode>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category. Returns `false` if it was already present.
    pub fn insert(&mut self, code: CategoryCode) -> bool {
        if self.codes.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    pub fn contains(&self, code: CategoryCode) -> bool {
        self.codes.contains(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = CategoryCode> + '_ {
        self.codes.iter().copied()
    }

    /// Comma-joined analyzer tags, skipping empty ones
    pub fn to_tags(&self) -> String {
        self.codes
            .iter()
            .map(|code| code.tag())
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Extend<CategoryCode> for CategorySet {
    fn extend<I: IntoIterator<Item = CategoryCode>>(&mut self, iter: I) {
        for code in iter {
            self.insert(code);
        }
    }
}

impl FromIterator<CategoryCode> for CategorySet {
    fn from_iter<I: IntoIterator<Item = CategoryCode>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        set.extend(iter);
        set
    }
}

/// A trigger rule: a context key matching `pattern` requests `categories`
#[derive(Debug)]
pub struct CategoryRule {
    /// Short name for logging
    pub name: &'static str,
    /// Unanchored source pattern, as advertised in the input pattern
    pub pattern: &'static str,
    /// Categories contributed when the rule matches
    pub categories: &'static [CategoryCode],
    regex: Regex,
}

impl CategoryRule {
    /// Compile a rule anchored at the start of the key. `None` if `pattern` is not a valid regex.
    pub fn new(
        name: &'static str,
        pattern: &'static str,
        categories: &'static [CategoryCode],
    ) -> Option<Self> {
        Regex::new(&format!("^(?:{})", pattern)).ok().map(|regex| CategoryRule {
            name,
            pattern,
            categories,
            regex,
        })
    }

    /// Whether `key` matches this rule, anchored at the start of the key
    pub fn matches(&self, key: &str) -> bool {
        let matched = self.regex.is_match(key);
        trace!("Rule '{}' against {:?}: {}", self.name, key, matched);
        matched
    }
}

pub const GLOSSARY_PATTERN: &str = r"(\\[gG]ls(desc|symbol)?\{$)";
pub const REFERENCE_PATTERN: &str = r"(\\(page|name|auto)?ref\{$)";
pub const CITATION_PATTERN: &str = r"(\\(text)?cite(\w|author|year)?(\[.*?\])?\{(\w*,)*$)";

/// Trigger rules in evaluation order
pub static CATEGORY_RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    vec![
        CategoryRule::new("glossary", GLOSSARY_PATTERN, &[CategoryCode::Glossary])
            .expect("failed to create glossary rule"),
        CategoryRule::new("reference", REFERENCE_PATTERN, &[CategoryCode::Label])
            .expect("failed to create reference rule"),
        CategoryRule::new("citation", CITATION_PATTERN, &[CategoryCode::Citation])
            .expect("failed to create citation rule"),
    ]
});

/// All rule patterns joined into one alternation
pub fn input_pattern() -> String {
    CATEGORY_RULES
        .iter()
        .map(|rule| rule.pattern)
        .collect::<Vec<_>>()
        .join("|")
}

/// BibTeX entry types known to the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationType {
    Article,
    Book,
    InBook,
    Booklet,
    Conference,
    InCollection,
    Manual,
    Misc,
    Proceedings,
    InProceedings,
    TechReport,
    PhdThesis,
    MasterThesis,
    Unpublished,
}

impl CitationType {
    /// Parse the lowercase entry type emitted by the analyzer
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "article" => Some(CitationType::Article),
            "book" => Some(CitationType::Book),
            "inbook" => Some(CitationType::InBook),
            "booklet" => Some(CitationType::Booklet),
            "conference" => Some(CitationType::Conference),
            "incollection" => Some(CitationType::InCollection),
            "manual" => Some(CitationType::Manual),
            "misc" => Some(CitationType::Misc),
            "proceedings" => Some(CitationType::Proceedings),
            "inproceedings" => Some(CitationType::InProceedings),
            "techreport" => Some(CitationType::TechReport),
            "phdthesis" => Some(CitationType::PhdThesis),
            "masterthesis" => Some(CitationType::MasterThesis),
            "unpublished" => Some(CitationType::Unpublished),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            CitationType::Article => 'a',
            CitationType::Book => 'B',
            CitationType::InBook => 'b',
            CitationType::Booklet => 'b',
            CitationType::Conference => 'C',
            CitationType::InCollection => 'c',
            CitationType::Manual => 'm',
            CitationType::Misc => 'M',
            CitationType::Proceedings => 'P',
            CitationType::InProceedings => 'p',
            CitationType::TechReport => 'r',
            CitationType::PhdThesis => 'T',
            CitationType::MasterThesis => 't',
            CitationType::Unpublished => 'u',
        }
    }
}

/// Sectioning depth of a `Section` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionLevel {
    Part,
    Chapter,
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
    Subparagraph,
    /// Reserved for label entries; the section formatter never produces it
    Label,
}

impl SectionLevel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "part" => Some(SectionLevel::Part),
            "chapter" => Some(SectionLevel::Chapter),
            "section" => Some(SectionLevel::Section),
            "subsection" => Some(SectionLevel::Subsection),
            "subsubsection" => Some(SectionLevel::Subsubsection),
            "paragraph" => Some(SectionLevel::Paragraph),
            "subparagraph" => Some(SectionLevel::Subparagraph),
            "label" => Some(SectionLevel::Label),
            _ => None,
        }
    }

    /// Heading marker, one `#` per level below `part`
    pub fn marker(self) -> &'static str {
        match self {
            SectionLevel::Part => "",
            SectionLevel::Chapter => "#",
            SectionLevel::Section => "##",
            SectionLevel::Subsection => "###",
            SectionLevel::Subsubsection => "####",
            SectionLevel::Paragraph => "#####",
            SectionLevel::Subparagraph => "######",
            SectionLevel::Label => "lbl",
        }
    }
}
