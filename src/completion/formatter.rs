//! Formatting of analyzer entries into completion candidates
//!
//! Each entry is formatted according to the category its variant maps to:
//!
//! | category | abbr | menu | sort |
//! |---|---|---|---|
//! | glossary | label | `description   (symbol)` | label |
//! | citation | `[<type code>] authortext` | title | label |
//! | section | `<marker> label` | empty | empty |
//! | label | `[lbl] label` | empty | empty |
//!
//! Entries with an unknown variant are dropped silently. Entries that cannot
//! be formatted (unknown citation type, missing field) are dropped with a
//! warning; the rest of the batch is unaffected.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{trace, warn};

use super::rules::{CategoryCode, CitationType, SectionLevel};
use crate::models::StructuredEntry;

/// Editor-ready completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRecord {
    /// Single character category marker
    pub kind: char,
    /// Text inserted on selection
    pub word: String,
    /// Text shown in the menu
    pub abbr: String,
    /// Secondary information, may be empty
    pub menu: String,
    /// Always set, the host must not merge equal words
    #[serde(rename = "dup")]
    pub allow_duplicates: bool,
    /// Ranking key, empty for sections and labels
    #[serde(rename = "sort")]
    pub sort_key: String,
}

impl CandidateRecord {
    fn new(code: CategoryCode, word: &str, abbr: String, menu: String, sort_key: String) -> Self {
        CandidateRecord {
            kind: code.kind(),
            word: word.to_string(),
            abbr,
            menu,
            allow_duplicates: true,
            sort_key,
        }
    }
}

/// Reasons a single entry could not be formatted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("{variant} entry '{label}' lacks field '{field}'")]
    MissingField {
        variant: &'static str,
        label: String,
        field: &'static str,
    },

    #[error("citation '{label}' has unknown entry type '{entry_type}'")]
    UnknownCitationType { label: String, entry_type: String },

    #[error("section '{label}' has unknown level '{level}'")]
    UnknownSectionLevel { label: String, level: String },
}

/// Format one entry.
///
/// Returns `Ok(None)` when the variant is not displayed by this source.
pub fn format_entry(entry: &StructuredEntry) -> Result<Option<CandidateRecord>, FormatError> {
    let Some(code) = CategoryCode::from_variant(entry.variant()) else {
        trace!("Skipping '{}' with unmapped variant '{}'", entry.label, entry.variant());
        return Ok(None);
    };

    let record = match code {
        CategoryCode::Glossary => format_glossary(entry)?,
        CategoryCode::Citation => format_citation(entry)?,
        CategoryCode::Section => format_section(entry)?,
        CategoryCode::Label => format_label(entry),
    };
    Ok(Some(record))
}

/// Format a batch, skipping entries that are unmapped or malformed
pub fn format_entries(entries: &[StructuredEntry]) -> Vec<CandidateRecord> {
    entries
        .iter()
        .filter_map(|entry| match format_entry(entry) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping completion entry: {}", e);
                None
            }
        })
        .collect()
}

fn format_glossary(entry: &StructuredEntry) -> Result<CandidateRecord, FormatError> {
    let fields = first_map(entry, "Glossaryentry")?;
    let description = map_str(fields, entry, "Glossaryentry", "description")?;
    let symbol = map_str(fields, entry, "Glossaryentry", "symbol")?;

    Ok(CandidateRecord::new(
        CategoryCode::Glossary,
        &entry.label,
        entry.label.clone(),
        format!("{}   ({})", description, symbol),
        entry.label.clone(),
    ))
}

fn format_citation(entry: &StructuredEntry) -> Result<CandidateRecord, FormatError> {
    let fields = first_map(entry, "Citation")?;
    let entry_type = entry.field_str(1).ok_or_else(|| missing(entry, "Citation", "type"))?;
    let code = CitationType::from_name(entry_type)
        .ok_or_else(|| FormatError::UnknownCitationType {
            label: entry.label.clone(),
            entry_type: entry_type.to_string(),
        })?
        .code();
    let authortext = map_str(fields, entry, "Citation", "authortext")?;
    let title = map_str(fields, entry, "Citation", "title")?;

    Ok(CandidateRecord::new(
        CategoryCode::Citation,
        &entry.label,
        format!("[{}] {}", code, authortext),
        title.to_string(),
        entry.label.clone(),
    ))
}

fn format_section(entry: &StructuredEntry) -> Result<CandidateRecord, FormatError> {
    let level_name = entry.field_str(0).ok_or_else(|| missing(entry, "Section", "level"))?;
    let level = SectionLevel::from_name(level_name).ok_or_else(|| FormatError::UnknownSectionLevel {
        label: entry.label.clone(),
        level: level_name.to_string(),
    })?;

    Ok(CandidateRecord::new(
        CategoryCode::Section,
        &entry.label,
        format!("{} {}", level.marker(), entry.label),
        String::new(),
        String::new(),
    ))
}

fn format_label(entry: &StructuredEntry) -> CandidateRecord {
    CandidateRecord::new(
        CategoryCode::Label,
        &entry.label,
        format!("[lbl] {}", entry.label),
        String::new(),
        String::new(),
    )
}

fn first_map<'a>(
    entry: &'a StructuredEntry,
    variant: &'static str,
) -> Result<&'a Map<String, Value>, FormatError> {
    entry.field_map(0).ok_or_else(|| missing(entry, variant, "fields"))
}

fn map_str<'a>(
    fields: &'a Map<String, Value>,
    entry: &StructuredEntry,
    variant: &'static str,
    key: &'static str,
) -> Result<&'a str, FormatError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(entry, variant, key))
}

fn missing(entry: &StructuredEntry, variant: &'static str, field: &'static str) -> FormatError {
    FormatError::MissingField {
        variant,
        label: entry.label.clone(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn glossary(label: &str, description: &str, symbol: &str) -> StructuredEntry {
        StructuredEntry::new(
            label,
            "Glossaryentry",
            vec![json!({"description": description, "symbol": symbol, "name": label})],
        )
    }

    fn citation(label: &str, entry_type: &str, authortext: &str, title: &str) -> StructuredEntry {
        StructuredEntry::new(
            label,
            "Citation",
            vec![json!({"authortext": authortext, "title": title}), json!(entry_type)],
        )
    }

    #[test]
    fn test_format_glossary() {
        let record = format_entry(&glossary("L", "D", "S")).unwrap().unwrap();
        assert_eq!(record.kind, 'g');
        assert_eq!(record.word, "L");
        assert_eq!(record.abbr, "L");
        assert_eq!(record.menu, "D   (S)");
        assert_eq!(record.sort_key, "L");
        assert!(record.allow_duplicates);
    }

    #[test]
    fn test_format_citation() {
        let record = format_entry(&citation("cite1", "article", "Smith", "T")).unwrap().unwrap();
        assert_eq!(record.kind, 'c');
        assert_eq!(record.word, "cite1");
        assert_eq!(record.abbr, "[a] Smith");
        assert_eq!(record.menu, "T");
        assert_eq!(record.sort_key, "cite1");
    }

    #[test]
    fn test_format_section() {
        let entry = StructuredEntry::new("Introduction", "Section", vec![json!("subsection")]);
        let record = format_entry(&entry).unwrap().unwrap();
        assert_eq!(record.kind, 's');
        assert_eq!(record.word, "Introduction");
        assert_eq!(record.abbr, "### Introduction");
        assert_eq!(record.menu, "");
        assert_eq!(record.sort_key, "");

        let part = StructuredEntry::new("Foundations", "Section", vec![json!("part")]);
        assert_eq!(format_entry(&part).unwrap().unwrap().abbr, " Foundations");
    }

    #[test]
    fn test_format_label() {
        let entry = StructuredEntry::new("fig:plot", "Label", vec![json!(0)]);
        let record = format_entry(&entry).unwrap().unwrap();
        assert_eq!(record.kind, 'l');
        assert_eq!(record.word, "fig:plot");
        assert_eq!(record.abbr, "[lbl] fig:plot");
        assert_eq!(record.menu, "");
        assert_eq!(record.sort_key, "");
    }

    #[test]
    fn test_unmapped_variant_is_skipped() {
        let entry = StructuredEntry::new("chapter1.tex", "Include", vec![]);
        assert_eq!(format_entry(&entry), Ok(None));

        let entries = vec![glossary("a", "d", "s"), entry, glossary("b", "d", "s")];
        assert_eq!(format_entries(&entries).len(), entries.len() - 1);
    }

    #[test]
    fn test_unknown_citation_type_is_an_error() {
        let entry = citation("web1", "online", "Doe", "Site");
        assert_eq!(
            format_entry(&entry),
            Err(FormatError::UnknownCitationType {
                label: "web1".to_string(),
                entry_type: "online".to_string(),
            })
        );

        let entries = vec![entry, citation("ok", "book", "Doe", "Book")];
        let records = format_entries(&entries);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].abbr, "[B] Doe");
    }

    #[test]
    fn test_missing_fields_are_errors() {
        let no_symbol = StructuredEntry::new("g", "Glossaryentry", vec![json!({"description": "d"})]);
        assert!(matches!(
            format_entry(&no_symbol),
            Err(FormatError::MissingField { field: "symbol", .. })
        ));

        let no_type = StructuredEntry::new("c", "Citation", vec![json!({"authortext": "a", "title": "t"})]);
        assert!(matches!(
            format_entry(&no_type),
            Err(FormatError::MissingField { field: "type", .. })
        ));

        let bad_level = StructuredEntry::new("s", "Section", vec![json!("appendix")]);
        assert!(matches!(
            format_entry(&bad_level),
            Err(FormatError::UnknownSectionLevel { .. })
        ));

        let no_fields = StructuredEntry::new("g", "Glossaryentry", vec![]);
        assert!(format_entry(&no_fields).is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let record = format_entry(&glossary("L", "D", "S")).unwrap().unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"kind": "g", "word": "L", "abbr": "L", "menu": "D   (S)", "dup": true, "sort": "L"})
        );
    }
}
