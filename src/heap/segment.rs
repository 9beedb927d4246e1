// Tue Aug 04 2026 - Alex

use crate::heap::heap::Heap;
use crate::layout::{LayoutError, TypeCatalog};
use crate::memory::{Address, MemoryError, MemoryReader};

// Upper bound on nodes followed per heap. A healthy heap has a handful of
// segments; anything near this count is a corrupted or adversarial list.
pub const MAX_SEGMENTS: usize = 64;

struct ListLinks {
    flink: Address,
    blink: Address,
}

// Walks the circular doubly-linked segment list of one heap, yielding each
// segment's base address. The list node is embedded in the segment record at
// a fixed offset, so node address minus that offset is the segment base.
pub struct SegmentWalker<'a> {
    memory: &'a dyn MemoryReader,
    heap_base: Address,
    head: Address,
    tail: Address,
    link_offset: u64,
    flink_offset: u64,
    blink_offset: u64,
    node: Address,
    visited: usize,
    done: bool,
}

impl<'a> SegmentWalker<'a> {
    pub fn new(
        memory: &'a dyn MemoryReader,
        catalog: &TypeCatalog,
        heap: &Heap,
    ) -> Result<Self, LayoutError> {
        let list = catalog.layout("_LIST_ENTRY")?;
        let head = heap.segment_list_head();
        Ok(Self {
            memory,
            heap_base: heap.base(),
            head,
            tail: heap.segment_list_tail(),
            link_offset: catalog.layout("_HEAP_SEGMENT")?.offset_of("SegmentListEntry")?,
            flink_offset: list.offset_of("Flink")?,
            blink_offset: list.offset_of("Blink")?,
            node: head,
            visited: 0,
            done: false,
        })
    }

    fn read_links(&self, node: Address) -> Result<ListLinks, MemoryError> {
        Ok(ListLinks {
            flink: self.memory.read_ptr(node + self.flink_offset)?,
            blink: self.memory.read_ptr(node + self.blink_offset)?,
        })
    }
}

impl Iterator for SegmentWalker<'_> {
    type Item = Address;

    fn next(&mut self) -> Option<Address> {
        if self.done {
            return None;
        }
        if self.visited >= MAX_SEGMENTS {
            log::warn!(
                "segment list of heap {} exceeded {} nodes, stopping",
                self.heap_base,
                MAX_SEGMENTS
            );
            self.done = true;
            return None;
        }

        let node = self.node;
        let base = node - self.link_offset;
        self.visited += 1;

        // Closing the loop: the tail captured at entry is the last node. The
        // counter above, not pointer equality, is what lets a single-segment
        // heap (head == tail from the start) still emit its one segment.
        if node == self.tail {
            self.done = true;
            return Some(base);
        }

        // Both links are re-read fresh from memory at every step; a node
        // whose links went null or wrapped back to the head ends the walk.
        match self.read_links(node) {
            Ok(links) => {
                if links.flink.is_null() || links.blink.is_null() || links.flink == self.head {
                    self.done = true;
                } else {
                    self.node = links.flink;
                }
            }
            Err(e) => {
                log::debug!("segment list of heap {} unreadable at {}: {}", self.heap_base, node, e);
                self.done = true;
            }
        }

        Some(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::SparseMemory;

    const LINK: u64 = 0x18;

    // Builds a heap whose segment list threads through the given node
    // addresses, with the sentinel living inside the heap record.
    fn build_heap(mem: &mut SparseMemory, base: Address, nodes: &[Address]) -> Heap {
        let sentinel = base + 0x120;
        mem.map_zeroed(base, 0x2c0);
        mem.write_ptr(sentinel, nodes[0]);
        mem.write_ptr(sentinel + 8, *nodes.last().unwrap());

        for (i, &node) in nodes.iter().enumerate() {
            mem.map_zeroed(node - LINK, 0x78);
            let flink = nodes.get(i + 1).copied().unwrap_or(sentinel);
            let blink = if i == 0 { sentinel } else { nodes[i - 1] };
            mem.write_ptr(node, flink);
            mem.write_ptr(node + 8, blink);
        }

        Heap::read(mem, TypeCatalog::windows_10_x64(), base).unwrap()
    }

    fn walk(mem: &SparseMemory, heap: &Heap) -> Vec<Address> {
        SegmentWalker::new(mem, TypeCatalog::windows_10_x64(), heap)
            .unwrap()
            .collect()
    }

    #[test]
    fn test_single_segment_head_equals_tail() {
        let mut mem = SparseMemory::new();
        let heap = build_heap(&mut mem, Address::new(0x10000), &[Address::new(0x20018)]);

        let segments = walk(&mem, &heap);
        assert_eq!(segments, vec![Address::new(0x20000)]);
    }

    #[test]
    fn test_two_segments() {
        let mut mem = SparseMemory::new();
        let heap = build_heap(
            &mut mem,
            Address::new(0x10000),
            &[Address::new(0x20018), Address::new(0x30018)],
        );

        let segments = walk(&mem, &heap);
        assert_eq!(segments, vec![Address::new(0x20000), Address::new(0x30000)]);
    }

    #[test]
    fn test_five_segments() {
        let nodes: Vec<Address> = (0..5).map(|i| Address::new(0x20018 + i * 0x10000)).collect();
        let mut mem = SparseMemory::new();
        let heap = build_heap(&mut mem, Address::new(0x10000), &nodes);

        let segments = walk(&mem, &heap);
        assert_eq!(segments.len(), 5);
        for (segment, node) in segments.iter().zip(&nodes) {
            assert_eq!(*segment, *node - LINK);
        }
    }

    #[test]
    fn test_corrupted_list_terminates_within_bound() {
        // Two nodes pointing at each other; the tail is never reached and
        // the chain never returns to the head.
        let n1 = Address::new(0x20018);
        let n2 = Address::new(0x30018);
        let base = Address::new(0x10000);

        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x2c0);
        mem.write_ptr(base + 0x120, n1);
        mem.write_ptr(base + 0x128, Address::new(0xdead0000));
        for (node, next) in [(n1, n2), (n2, n1)] {
            mem.map_zeroed(node - LINK, 0x78);
            mem.write_ptr(node, next);
            mem.write_ptr(node + 8, next);
        }

        // n2's forward link returns to the head, which closes the walk; lift
        // that by pointing it into a third node that loops with n2.
        let n3 = Address::new(0x40018);
        mem.write_ptr(n2, n3);
        mem.map_zeroed(n3 - LINK, 0x78);
        mem.write_ptr(n3, n2);
        mem.write_ptr(n3 + 8, n2);

        let heap = Heap::read(&mem, TypeCatalog::windows_10_x64(), base).unwrap();
        let segments = walk(&mem, &heap);
        assert!(segments.len() <= MAX_SEGMENTS);
        assert!(!segments.is_empty());
    }

    #[test]
    fn test_unmapped_node_stops_walk() {
        // Head node is mapped, its forward link leads into unmapped space.
        let n1 = Address::new(0x20018);
        let base = Address::new(0x10000);

        let mut mem = SparseMemory::new();
        mem.map_zeroed(base, 0x2c0);
        mem.write_ptr(base + 0x120, n1);
        mem.write_ptr(base + 0x128, Address::new(0xdead0000));
        mem.map_zeroed(n1 - LINK, 0x78);
        mem.write_ptr(n1, Address::new(0x50018));
        mem.write_ptr(n1 + 8, Address::new(0x60018));

        let heap = Heap::read(&mem, TypeCatalog::windows_10_x64(), base).unwrap();
        let segments = walk(&mem, &heap);
        // The mapped node is emitted, the unreadable successor ends the walk.
        assert_eq!(segments, vec![Address::new(0x20000), Address::new(0x50000)]);
    }
}
