// Tue Aug 04 2026 - Alex

use crate::heap::flags::ChunkFlags;
use crate::heap::heap::EncodingKey;
use crate::layout::{LayoutError, TypeCatalog};
use crate::memory::{Address, MemoryError, MemoryReader};

#[derive(Debug, Clone, Copy)]
pub struct ChunkHeader {
    pub address: Address,
    pub raw_size: u16,
    pub raw_flags: u8,
    pub size: u16,
    pub flags: ChunkFlags,
    pub byte_len: u64,
    pub encoded: bool,
}

impl ChunkHeader {
    pub fn data_address(&self, granularity: u64) -> Address {
        self.address + granularity
    }

    pub fn data_len(&self, granularity: u64) -> u64 {
        self.byte_len.saturating_sub(granularity)
    }
}

// Decodes fixed-size chunk headers for one heap. The encoding key is applied
// to the size and flags words only; a byte length of zero is a valid outcome
// the caller must handle.
pub struct HeapEntryDecoder {
    key: EncodingKey,
    granularity: u64,
    size_offset: usize,
    flags_offset: usize,
}

impl HeapEntryDecoder {
    pub fn new(catalog: &TypeCatalog, key: EncodingKey) -> Result<Self, LayoutError> {
        let entry = catalog.layout("_HEAP_ENTRY")?;
        Ok(Self {
            key,
            granularity: entry.size() as u64,
            size_offset: entry.field("Size")?.offset() as usize,
            flags_offset: entry.field("Flags")?.offset() as usize,
        })
    }

    pub fn granularity(&self) -> u64 {
        self.granularity
    }

    pub fn decode_at(
        &self,
        memory: &dyn MemoryReader,
        addr: Address,
    ) -> Result<ChunkHeader, MemoryError> {
        let bytes = memory.read_bytes(addr, self.granularity as usize)?;
        let raw_size = u16::from_le_bytes([bytes[self.size_offset], bytes[self.size_offset + 1]]);
        let raw_flags = bytes[self.flags_offset];

        let (size, flags) = self.key.apply(raw_size, raw_flags);

        Ok(ChunkHeader {
            address: addr,
            raw_size,
            raw_flags,
            size,
            flags: ChunkFlags::from_raw(flags),
            byte_len: size as u64 * self.granularity,
            encoded: self.key.is_active(),
        })
    }
}
