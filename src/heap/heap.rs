// Tue Aug 04 2026 - Alex

use crate::heap::ScanError;
use crate::layout::TypeCatalog;
use crate::memory::{Address, MemoryReader};

// EncodeFlagMask value that marks the heap's chunk headers as XOR-obfuscated.
pub const ENCODING_ENABLED_MASK: u32 = 0x0010_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingKey {
    Disabled,
    Xor { size: u16, flags: u8 },
}

impl EncodingKey {
    pub fn is_active(&self) -> bool {
        matches!(self, EncodingKey::Xor { .. })
    }

    pub fn apply(&self, raw_size: u16, raw_flags: u8) -> (u16, u8) {
        match *self {
            EncodingKey::Disabled => (raw_size, raw_flags),
            EncodingKey::Xor { size, flags } => (raw_size ^ size, raw_flags ^ flags),
        }
    }
}

// A heap reconstructed from the snapshot for the duration of one traversal.
#[derive(Debug, Clone)]
pub struct Heap {
    base: Address,
    key: EncodingKey,
    segment_list_head: Address,
    segment_list_tail: Address,
}

impl Heap {
    pub fn read(
        memory: &dyn MemoryReader,
        catalog: &TypeCatalog,
        base: Address,
    ) -> Result<Self, ScanError> {
        let heap = catalog.layout("_HEAP")?;
        let entry = catalog.layout("_HEAP_ENTRY")?;
        let list = catalog.layout("_LIST_ENTRY")?;

        let encode_mask = memory.read_u32(base + heap.offset_of("EncodeFlagMask")?)?;
        let key = if encode_mask == ENCODING_ENABLED_MASK {
            let encoding = base + heap.offset_of("Encoding")?;
            EncodingKey::Xor {
                size: memory.read_u16(encoding + entry.offset_of("Size")?)?,
                flags: memory.read_u8(encoding + entry.offset_of("Flags")?)?,
            }
        } else {
            EncodingKey::Disabled
        };

        let segment_list = base + heap.offset_of("SegmentList")?;
        let segment_list_head = memory.read_ptr(segment_list + list.offset_of("Flink")?)?;
        let segment_list_tail = memory.read_ptr(segment_list + list.offset_of("Blink")?)?;

        Ok(Self {
            base,
            key,
            segment_list_head,
            segment_list_tail,
        })
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn key(&self) -> EncodingKey {
        self.key
    }

    pub fn segment_list_head(&self) -> Address {
        self.segment_list_head
    }

    pub fn segment_list_tail(&self) -> Address {
        self.segment_list_tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::SparseMemory;

    #[test]
    fn test_read_heap_with_encoding_disabled() {
        let catalog = TypeCatalog::windows_10_x64();
        let base = Address::new(0x10000);

        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x2c0);
        mem.write_ptr(base + 0x120, Address::new(0x20018));
        mem.write_ptr(base + 0x128, Address::new(0x20018));

        let heap = Heap::read(&mem, catalog, base).unwrap();
        assert_eq!(heap.key(), EncodingKey::Disabled);
        assert_eq!(heap.segment_list_head(), Address::new(0x20018));
        assert_eq!(heap.segment_list_tail(), Address::new(0x20018));
    }

    #[test]
    fn test_read_heap_with_encoding_enabled() {
        let catalog = TypeCatalog::windows_10_x64();
        let base = Address::new(0x10000);

        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x2c0);
        mem.write_u32(base + 0x7c, ENCODING_ENABLED_MASK);
        mem.write_u16(base + 0x88, 0xbeef);
        mem.write_bytes(base + 0x8a, &[0x5a]);

        let heap = Heap::read(&mem, catalog, base).unwrap();
        assert_eq!(heap.key(), EncodingKey::Xor { size: 0xbeef, flags: 0x5a });
        assert!(heap.key().is_active());
    }

    #[test]
    fn test_other_mask_values_leave_encoding_off() {
        // Only the exact sentinel bit pattern activates decoding.
        let catalog = TypeCatalog::windows_10_x64();
        let base = Address::new(0x10000);

        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x2c0);
        mem.write_u32(base + 0x7c, 0x1);

        let heap = Heap::read(&mem, catalog, base).unwrap();
        assert_eq!(heap.key(), EncodingKey::Disabled);
    }

    #[test]
    fn test_unmapped_heap_fails() {
        let catalog = TypeCatalog::windows_10_x64();
        let mem = SparseMemory::new();
        assert!(Heap::read(&mem, catalog, Address::new(0x10000)).is_err());
    }
}
