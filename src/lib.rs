// Mon Aug 03 2026 - Alex

pub mod config;
pub mod heap;
pub mod layout;
pub mod memory;
pub mod output;
pub mod process;
pub mod utils;

pub use config::Config;
pub use heap::{ChunkRecord, HeapEnumerator};
pub use layout::TypeCatalog;
pub use memory::{Address, MemoryReader, SnapshotMemory, SparseMemory};
pub use output::JsonExporter;
pub use process::{ManifestProcessSource, ProcessContext, ProcessSource};
