// Tue Aug 04 2026 - Alex

use crate::layout::LayoutError;
use crate::memory::MemoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Heap handle array at {address} for pid {pid} is unreadable: {source}")]
    HeapHandles {
        pid: u32,
        address: crate::memory::Address,
        source: MemoryError,
    },
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}
