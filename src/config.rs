//! Completion configuration
//!
//! Resolution order for every setting:
//! 1. Explicit option (command-line flag)
//! 2. Environment variable
//! 3. Built-in default
//!
//! Blank values count as unset at every level.

use std::path::PathBuf;

use tracing::debug;

/// Environment variable naming the analyzer executable
pub const EXECUTABLE_ENV: &str = "TEXPARSER_PATH";

/// Environment variable naming the text encoding of analyzer output
pub const ENCODING_ENV: &str = "TEX_COMPLETION_ENCODING";

/// Environment variable naming the main document
pub const MAIN_FILE_ENV: &str = "TEX_COMPLETION_MAINFILE";

pub const DEFAULT_ENCODING: &str = "utf-8";

/// Settings consumed by a completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Encoding label used to decode analyzer output
    pub encoding: String,

    /// Analyzer executable; `None` disables completion entirely
    pub executable: Option<PathBuf>,

    /// Document handed to the analyzer
    pub main_file: PathBuf,
}

/// Explicitly supplied settings, typically from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub executable: Option<String>,
    pub encoding: Option<String>,
    pub main_file: Option<String>,
}

impl CompletionConfig {
    pub fn new(executable: Option<PathBuf>, main_file: PathBuf) -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            executable,
            main_file,
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Whether an analyzer is configured at all
    pub fn is_enabled(&self) -> bool {
        self.executable
            .as_ref()
            .is_some_and(|path| !path.as_os_str().is_empty())
    }

    /// Resolve configuration from overrides, then the process environment
    pub fn from_env_or_default(overrides: ConfigOverrides) -> Self {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve configuration from overrides, then `lookup`
    pub fn resolve<F>(overrides: ConfigOverrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, env_name: &str| {
            non_blank(explicit).or_else(|| non_blank(lookup(env_name)))
        };

        let executable = pick(overrides.executable, EXECUTABLE_ENV).map(PathBuf::from);
        let encoding = pick(overrides.encoding, ENCODING_ENV)
            .unwrap_or_else(|| DEFAULT_ENCODING.to_string());
        let main_file = pick(overrides.main_file, MAIN_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(fallback_main_file);

        let config = Self {
            encoding,
            executable,
            main_file,
        };
        debug!("Resolved completion config: {:?}", config);
        config
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Main document fallback: the current working directory
fn fallback_main_file() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        debug!("Cannot determine working directory ({}), using '.'", e);
        PathBuf::from(".")
    })
}
