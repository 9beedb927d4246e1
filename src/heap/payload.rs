// Wed Aug 05 2026 - Alex

use crate::memory::Address;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const PREVIEW_LEN: usize = 40;
pub const PREVIEW_UNDECODABLE: &str = "Cannot decode";

// Turns a chunk's data region into a bounded printable preview and, on
// request, a dump file holding the full data bytes (header excluded).
pub struct PayloadExtractor {
    output_dir: PathBuf,
}

impl PayloadExtractor {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn preview(data: &[u8]) -> String {
        let slice = &data[..data.len().min(PREVIEW_LEN)];
        match std::str::from_utf8(slice) {
            Ok(text) => text
                .chars()
                .map(|c| if c.is_control() { '.' } else { c })
                .collect(),
            Err(_) => PREVIEW_UNDECODABLE.to_string(),
        }
    }

    pub fn file_name(pid: u32, process_name: &str, chunk: Address) -> String {
        format!("{}.{}.{}.dmp", pid, process_name, chunk)
    }

    pub fn export(
        &self,
        pid: u32,
        process_name: &str,
        chunk: Address,
        data: &[u8],
    ) -> Result<String, io::Error> {
        let file_name = Self::file_name(pid, process_name, chunk);
        fs::write(self.output_dir.join(&file_name), data)?;
        Ok(file_name)
    }
}
