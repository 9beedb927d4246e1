// Mon Aug 03 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Address 0x{0:x} is not available in the snapshot")]
    Unavailable(u64),
    #[error("Invalid region map: {0}")]
    Map(String),
    #[error("Region at 0x{0:x} extends past the end of the snapshot file")]
    Truncated(u64),
}

impl MemoryError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, MemoryError::Unavailable(_))
    }
}
