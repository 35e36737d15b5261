use crate::config::ConfigError;
use crate::roster::RosterImportError;

/// Top-level error for embedding callers. The pipeline core itself never
/// fails on malformed data; only configuration and ingest transport do.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("roster import error: {0}")]
    Import(#[from] RosterImportError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
