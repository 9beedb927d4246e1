// Tue Aug 04 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse process manifest: {0}")]
    Parse(#[from] serde_json::Error),
}
