// Mon Aug 03 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryReader};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionMapping {
    pub virtual_start: Address,
    pub file_offset: u64,
    pub size: u64,
}

impl RegionMapping {
    fn range(&self) -> MemoryRange {
        MemoryRange::from_start_size(self.virtual_start, self.size)
    }
}

#[derive(Debug)]
pub struct SnapshotMemory {
    mmap: Arc<Mmap>,
    regions: Vec<RegionMapping>,
}

impl SnapshotMemory {
    // The whole file mapped contiguously at one base address.
    pub fn load<P: AsRef<Path>>(path: P, base: Address) -> Result<Self, MemoryError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file) }?;
        let regions = vec![RegionMapping {
            virtual_start: base,
            file_offset: 0,
            size: mmap.len() as u64,
        }];
        Ok(Self { mmap: Arc::new(mmap), regions })
    }

    // Region map sidecar: a JSON array of virtual-range to file-offset mappings.
    // Addresses outside every region read as unavailable, the same signal a
    // paged-out range produces.
    pub fn load_mapped<P: AsRef<Path>, Q: AsRef<Path>>(
        path: P,
        map_path: Q,
    ) -> Result<Self, MemoryError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file) }?;

        let map_file = File::open(map_path)?;
        let mut regions: Vec<RegionMapping> = serde_json::from_reader(map_file)
            .map_err(|e| MemoryError::Map(e.to_string()))?;
        regions.sort_by_key(|r| r.virtual_start.as_u64());

        for region in &regions {
            if region.file_offset + region.size > mmap.len() as u64 {
                return Err(MemoryError::Truncated(region.virtual_start.as_u64()));
            }
        }

        Ok(Self { mmap: Arc::new(mmap), regions })
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn resolve(&self, addr: Address, len: usize) -> Result<usize, MemoryError> {
        let idx = self
            .regions
            .partition_point(|r| r.virtual_start.as_u64() <= addr.as_u64());
        if idx == 0 {
            return Err(MemoryError::Unavailable(addr.as_u64()));
        }
        let region = &self.regions[idx - 1];
        if !region.range().contains_span(addr, len as u64) {
            return Err(MemoryError::Unavailable(addr.as_u64()));
        }
        let offset = region.file_offset + (addr.as_u64() - region.virtual_start.as_u64());
        Ok(offset as usize)
    }
}

impl MemoryReader for SnapshotMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        if len == 0 {
            return Ok(Vec::new());
        }
        let offset = self.resolve(addr, len)?;
        Ok(self.mmap[offset..offset + len].to_vec())
    }
}
