// Tue Aug 04 2026 - Alex

pub mod context;
pub mod error;
pub mod source;

pub use context::ProcessContext;
pub use error::ProcessError;
pub use source::{ManifestProcessSource, ProcessSource};
