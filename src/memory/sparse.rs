// Mon Aug 03 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader};
use std::collections::BTreeMap;

// Keyed by region start address; regions never overlap.
#[derive(Debug, Clone, Default)]
pub struct SparseMemory {
    regions: BTreeMap<u64, Vec<u8>>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_zeroed(&mut self, addr: Address, len: usize) {
        self.regions.insert(addr.as_u64(), vec![0u8; len]);
    }

    pub fn write_bytes(&mut self, addr: Address, data: &[u8]) {
        let containing = self.containing_region(addr, data.len()).map(|(start, _)| start);
        if let Some(start) = containing {
            if let Some(region) = self.regions.get_mut(&start) {
                let offset = (addr.as_u64() - start) as usize;
                region[offset..offset + data.len()].copy_from_slice(data);
            }
            return;
        }
        self.regions.insert(addr.as_u64(), data.to_vec());
    }

    pub fn write_u16(&mut self, addr: Address, value: u16) {
        self.write_bytes(addr, &value.to_le_bytes());
    }

    pub fn write_u32(&mut self, addr: Address, value: u32) {
        self.write_bytes(addr, &value.to_le_bytes());
    }

    pub fn write_u64(&mut self, addr: Address, value: u64) {
        self.write_bytes(addr, &value.to_le_bytes());
    }

    pub fn write_ptr(&mut self, addr: Address, value: Address) {
        self.write_u64(addr, value.as_u64());
    }

    fn containing_region(&self, addr: Address, len: usize) -> Option<(u64, &Vec<u8>)> {
        let (start, region) = self.regions.range(..=addr.as_u64()).next_back()?;
        if addr.as_u64() + len as u64 <= start + region.len() as u64 {
            Some((*start, region))
        } else {
            None
        }
    }

}

impl MemoryReader for SparseMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        if len == 0 {
            return Ok(Vec::new());
        }
        match self.containing_region(addr, len) {
            Some((start, region)) => {
                let offset = (addr.as_u64() - start) as usize;
                Ok(region[offset..offset + len].to_vec())
            }
            None => Err(MemoryError::Unavailable(addr.as_u64())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_back_written_values() {
        let mut mem = SparseMemory::new();
        mem.map_zeroed(Address::new(0x1000), 0x100);
        mem.write_u16(Address::new(0x1008), 0xbeef);
        mem.write_u64(Address::new(0x1010), 0x1122334455667788);

        assert_eq!(mem.read_u16(Address::new(0x1008)).unwrap(), 0xbeef);
        assert_eq!(mem.read_u64(Address::new(0x1010)).unwrap(), 0x1122334455667788);
        assert_eq!(mem.read_u8(Address::new(0x1000)).unwrap(), 0);
    }

    #[test]
    fn test_gap_reads_are_unavailable() {
        let mut mem = SparseMemory::new();
        mem.map_zeroed(Address::new(0x1000), 0x10);

        let err = mem.read_bytes(Address::new(0x2000), 4).unwrap_err();
        assert!(err.is_unavailable());

        // A read that starts inside but runs off the end is unavailable too.
        let err = mem.read_bytes(Address::new(0x1008), 0x10).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_zero_length_read() {
        let mem = SparseMemory::new();
        assert!(mem.read_bytes(Address::new(0xdead), 0).unwrap().is_empty());
    }
}
