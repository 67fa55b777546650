use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry reported by the document analyzer.
///
/// Mirrors the analyzer's JSON shape:
/// `{"label": "...", "attributes": {"variant": "...", "fields": [...]}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredEntry {
    pub label: String,
    pub attributes: EntryAttributes,
}

/// Variant tag plus the variant-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryAttributes {
    pub variant: String,
    #[serde(default)]
    pub fields: Vec<Value>,
}

impl StructuredEntry {
    pub fn new<L: Into<String>, V: Into<String>>(label: L, variant: V, fields: Vec<Value>) -> Self {
        StructuredEntry {
            label: label.into(),
            attributes: EntryAttributes {
                variant: variant.into(),
                fields,
            },
        }
    }

    pub fn variant(&self) -> &str {
        &self.attributes.variant
    }

    pub fn fields(&self) -> &[Value] {
        &self.attributes.fields
    }

    /// Field at `index` when it is a key/value map
    pub fn field_map(&self, index: usize) -> Option<&Map<String, Value>> {
        self.fields().get(index).and_then(Value::as_object)
    }

    /// Field at `index` when it is a plain string
    pub fn field_str(&self, index: usize) -> Option<&str> {
        self.fields().get(index).and_then(Value::as_str)
    }
}
