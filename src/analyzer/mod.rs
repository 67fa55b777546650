//! External document analyzer backends

pub mod process;
pub mod provider;

pub use process::ProcessAnalyzer;
pub use provider::{AnalyzerError, AnalyzerGateway};

use crate::config::CompletionConfig;

/// Create the analyzer backend described by the configuration
pub fn create_gateway(config: &CompletionConfig) -> Box<dyn AnalyzerGateway> {
    match config.executable.as_deref() {
        Some(executable) => {
            tracing::info!("Using analyzer executable {}", executable.display());
        }
        None => {
            tracing::info!("No analyzer executable configured, completion disabled");
        }
    }
    Box::new(ProcessAnalyzer::from_config(config))
}
