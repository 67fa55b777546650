pub mod analyzer;
pub mod completion;
pub mod config;
pub mod logging;
pub mod models;
pub mod serde_helpers;
