// Wed Aug 05 2026 - Alex

use crate::memory::Address;
use serde::Serialize;

pub const EXPORT_DISABLED: &str = "Disabled";
pub const EXPORT_FAILED: &str = "Failed";

// One emitted chunk, in presentation order. The field set mirrors the
// columns of the rendered table.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkRecord {
    pub pid: u32,
    pub process_name: String,
    pub heap: Address,
    pub segment: Address,
    pub chunk: Address,
    pub encoded: bool,
    pub byte_len: u64,
    pub status: String,
    pub payload: String,
    pub file_output: String,
}

impl ChunkRecord {
    pub fn encoded_label(&self) -> &'static str {
        if self.encoded {
            "Enabled"
        } else {
            "Disabled"
        }
    }

    pub fn row(&self) -> Vec<String> {
        vec![
            self.pid.to_string(),
            self.process_name.clone(),
            self.heap.to_string(),
            self.segment.to_string(),
            self.chunk.to_string(),
            self.encoded_label().to_string(),
            format!("0x{:x}", self.byte_len),
            self.status.clone(),
            self.payload.clone(),
            self.file_output.clone(),
        ]
    }

    pub fn columns() -> &'static [&'static str] {
        &[
            "PID",
            "Process Name",
            "Heap Address",
            "Segment Address",
            "Chunk Address",
            "Coded",
            "Chunk Size",
            "Chunk Status",
            "Payload",
            "File Output",
        ]
    }
}
