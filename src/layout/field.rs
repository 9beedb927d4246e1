// Mon Aug 03 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    name: String,
    offset: u64,
    size: usize,
}

impl FieldLayout {
    pub fn new(name: impl Into<String>, offset: u64, size: usize) -> Self {
        Self { name: name.into(), offset, size }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ 0x{:x} ({} bytes)", self.name, self.offset, self.size)
    }
}
