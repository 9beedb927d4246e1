// Tue Aug 04 2026 - Alex

use crate::heap::entry::{ChunkHeader, HeapEntryDecoder};
use crate::memory::{Address, MemoryReader};

#[derive(Debug, Clone)]
pub struct DecodedChunk {
    pub header: ChunkHeader,
    pub data: Vec<u8>,
}

// Walks consecutive chunks of one segment, advancing by each decoded chunk's
// own byte length. The first unavailable read is the implicit segment end;
// zero-length headers are stepped over one granularity unit at a time.
pub struct ChunkWalker<'a> {
    memory: &'a dyn MemoryReader,
    decoder: &'a HeapEntryDecoder,
    cursor: Address,
}

impl<'a> ChunkWalker<'a> {
    pub fn new(
        memory: &'a dyn MemoryReader,
        decoder: &'a HeapEntryDecoder,
        segment_base: Address,
    ) -> Self {
        Self {
            memory,
            decoder,
            cursor: segment_base,
        }
    }

    pub fn cursor(&self) -> Address {
        self.cursor
    }
}

impl Iterator for ChunkWalker<'_> {
    type Item = DecodedChunk;

    fn next(&mut self) -> Option<DecodedChunk> {
        let granularity = self.decoder.granularity();
        loop {
            let header = match self.decoder.decode_at(self.memory, self.cursor) {
                Ok(header) => header,
                // Ordinary end of segment, not an error.
                Err(_) => return None,
            };

            if header.byte_len == 0 {
                self.cursor = self.cursor + granularity;
                continue;
            }

            let data = match self
                .memory
                .read_bytes(header.data_address(granularity), header.data_len(granularity) as usize)
            {
                Ok(data) => data,
                Err(_) => return None,
            };

            self.cursor = self.cursor + header.byte_len;
            return Some(DecodedChunk { header, data });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::heap::EncodingKey;
    use crate::layout::TypeCatalog;
    use crate::memory::SparseMemory;

    fn decoder() -> HeapEntryDecoder {
        HeapEntryDecoder::new(TypeCatalog::windows_10_x64(), EncodingKey::Disabled).unwrap()
    }

    fn write_header(mem: &mut SparseMemory, addr: Address, size: u16, flags: u8) {
        mem.write_u16(addr + 0x8, size);
        mem.write_bytes(addr + 0xa, &[flags]);
    }

    #[test]
    fn test_two_chunks_then_end() {
        let base = Address::new(0x20000);
        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x50);
        write_header(&mut mem, base, 0x2, 0x01);
        write_header(&mut mem, base + 0x20, 0x3, 0x01);

        let decoder = decoder();
        let chunks: Vec<_> = ChunkWalker::new(&mem, &decoder, base).collect();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].header.address, base);
        assert_eq!(chunks[0].header.byte_len, 0x20);
        assert_eq!(chunks[0].data.len(), 0x10);
        assert_eq!(chunks[1].header.address, base + 0x20);
        assert_eq!(chunks[1].header.byte_len, 0x30);
        assert_eq!(chunks[1].data.len(), 0x20);

        for chunk in &chunks {
            assert!(chunk.header.byte_len > 0);
            assert_eq!(chunk.header.byte_len % decoder.granularity(), 0);
        }
    }

    #[test]
    fn test_zero_length_header_is_skipped_without_a_record() {
        let base = Address::new(0x20000);
        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x40);
        // Zero-size header at the segment start, a valid chunk one
        // granularity unit later.
        write_header(&mut mem, base, 0x0, 0x00);
        write_header(&mut mem, base + 0x10, 0x2, 0x01);

        let decoder = decoder();
        let chunks: Vec<_> = ChunkWalker::new(&mem, &decoder, base).collect();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].header.address, base + 0x10);
        assert_eq!(chunks[0].header.byte_len, 0x20);
    }

    #[test]
    fn test_cursor_is_monotonic() {
        let base = Address::new(0x20000);
        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x100);
        write_header(&mut mem, base, 0x2, 0x01);
        write_header(&mut mem, base + 0x20, 0x0, 0x00);
        write_header(&mut mem, base + 0x40, 0x4, 0x10);

        let decoder = decoder();
        let mut walker = ChunkWalker::new(&mem, &decoder, base);
        let mut last = walker.cursor();
        while let Some(chunk) = walker.next() {
            assert!(chunk.header.address.as_u64() >= last.as_u64());
            assert!(chunk.header.address.is_aligned(decoder.granularity()));
            assert!(walker.cursor().as_u64() > last.as_u64());
            last = walker.cursor();
        }
    }

    #[test]
    fn test_truncated_data_region_ends_segment() {
        let base = Address::new(0x20000);
        let mut mem = SparseMemory::new();
        // Only the header is mapped; the data region runs into a hole.
        mem.map_zeroed(base, 0x10);
        write_header(&mut mem, base, 0x4, 0x01);

        let decoder = decoder();
        let chunks: Vec<_> = ChunkWalker::new(&mem, &decoder, base).collect();
        assert!(chunks.is_empty());
    }
}
