// Mon Aug 03 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Unknown structure: {0}")]
    UnknownStruct(String),
    #[error("Structure {0} has no field {1}")]
    UnknownField(String, String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse layout profile: {0}")]
    Parse(#[from] serde_json::Error),
}
