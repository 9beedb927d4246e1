// Tue Aug 04 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

// One entry of the process inventory: everything the heap walk needs to know
// about a process, resolved ahead of time from its environment block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessContext {
    pid: u32,
    name: String,
    heap_handles: Address,
    heap_count: u32,
}

impl ProcessContext {
    pub fn new(pid: u32, name: impl Into<String>, heap_handles: Address, heap_count: u32) -> Self {
        Self {
            pid,
            name: name.into(),
            heap_handles,
            heap_count,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn heap_handles(&self) -> Address {
        self.heap_handles
    }

    pub fn heap_count(&self) -> u32 {
        self.heap_count
    }
}

impl fmt::Display for ProcessContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pid {})", self.name, self.pid)
    }
}
