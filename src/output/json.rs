// Wed Aug 05 2026 - Alex

use crate::heap::ChunkRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn serialize(&self, records: &[ChunkRecord]) -> Result<String, JsonError> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(records)?)
        } else {
            Ok(serde_json::to_string(records)?)
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        records: &[ChunkRecord],
        path: P,
    ) -> Result<(), JsonError> {
        let json = self.serialize(records)?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Address;

    #[test]
    fn test_addresses_serialize_as_hex_strings() {
        let record = ChunkRecord {
            pid: 4242,
            process_name: "notepad.exe".to_string(),
            heap: Address::new(0x10000),
            segment: Address::new(0x20000),
            chunk: Address::new(0x20020),
            encoded: false,
            byte_len: 0x30,
            status: "[BUSY]".to_string(),
            payload: "AB.C".to_string(),
            file_output: "Disabled".to_string(),
        };

        let json = JsonExporter::new().with_pretty(false).serialize(&[record]).unwrap();
        assert!(json.contains("\"chunk\":\"0x20020\""));
        assert!(json.contains("\"byte_len\":48"));
    }
}
