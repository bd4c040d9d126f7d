//! NMS source errors

use thiserror::Error;

/// Errors that can occur when reading inventory from the NMS
#[derive(Debug, Error)]
pub enum SourceError {
    /// Device group, device or interface id unknown to the NMS
    #[error("Not found: {0}")]
    NotFound(String),

    /// Snapshot file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot document is not valid
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
