//! Process-based analyzer backend
//!
//! Runs the external analyzer as
//! `<executable> --json -a <tags> -i <document>` and parses its stdout as a
//! JSON array of entries.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use encoding_rs::Encoding;
use tracing::{debug, trace};

use super::provider::{AnalyzerError, AnalyzerGateway};
use crate::completion::rules::CategorySet;
use crate::config::CompletionConfig;
use crate::models::StructuredEntry;

/// Analyzer backend that spawns the analyzer executable once per request
#[derive(Debug, Clone)]
pub struct ProcessAnalyzer {
    executable: Option<PathBuf>,
    encoding: String,
}

impl ProcessAnalyzer {
    pub fn new(executable: Option<PathBuf>, encoding: impl Into<String>) -> Self {
        Self {
            executable,
            encoding: encoding.into(),
        }
    }

    pub fn from_config(config: &CompletionConfig) -> Self {
        Self::new(config.executable.clone(), config.encoding.clone())
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Arguments passed to the analyzer, with empty elements removed
    pub fn arguments(&self, categories: &CategorySet, document: &Path) -> Vec<OsString> {
        [
            OsString::from("--json"),
            OsString::from("-a"),
            OsString::from(categories.to_tags()),
            OsString::from("-i"),
            document.as_os_str().to_os_string(),
        ]
        .into_iter()
        .filter(|arg| !arg.is_empty())
        .collect()
    }

    /// Decode raw analyzer output with the configured encoding
    ///
    /// Latin-1 labels decode as true ISO-8859-1, one byte per code point.
    /// WHATWG would map them to windows-1252, which differs in 0x80..=0x9F.
    /// Every other label is resolved by `encoding_rs`.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, AnalyzerError> {
        let label = self.encoding.trim();
        if is_latin1_label(label) {
            return Ok(encoding_rs::mem::decode_latin1(bytes).into_owned());
        }
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| AnalyzerError::UnknownEncoding(self.encoding.clone()))?;
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or(AnalyzerError::Decode {
                encoding: encoding.name(),
            })
    }
}

const LATIN1_LABELS: &[&str] = &[
    "latin1",
    "latin-1",
    "latin_1",
    "l1",
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859_1",
    "8859",
];

fn is_latin1_label(label: &str) -> bool {
    LATIN1_LABELS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(label))
}

impl AnalyzerGateway for ProcessAnalyzer {
    fn fetch(
        &self,
        categories: &CategorySet,
        document: &Path,
    ) -> Result<Vec<StructuredEntry>, AnalyzerError> {
        let executable = self
            .executable
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(AnalyzerError::NotConfigured)?;
        let args = self.arguments(categories, document);

        debug!("Running analyzer {} {:?}", executable.display(), args);

        let output = Command::new(executable)
            .args(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| AnalyzerError::Spawn {
                executable: executable.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(AnalyzerError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = self.decode(&output.stdout)?;
        let entries: Vec<StructuredEntry> = serde_json::from_str(&text)?;
        trace!("Analyzer returned {} entries", entries.len());
        Ok(entries)
    }

    fn backend_name(&self) -> &'static str {
        "texparser process"
    }
}
