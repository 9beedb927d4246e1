// Wed Aug 05 2026 - Alex

use crate::config::Config;
use crate::heap::chunk::{ChunkWalker, DecodedChunk};
use crate::heap::entry::HeapEntryDecoder;
use crate::heap::heap::Heap;
use crate::heap::payload::PayloadExtractor;
use crate::heap::record::{ChunkRecord, EXPORT_DISABLED, EXPORT_FAILED};
use crate::heap::segment::SegmentWalker;
use crate::heap::ScanError;
use crate::layout::TypeCatalog;
use crate::memory::{Address, MemoryReader};
use crate::process::ProcessContext;
use std::sync::Arc;

enum ScanOutcome {
    Completed,
    TargetFound,
}

// Drives the whole traversal for a set of processes: heap handle array, then
// per heap the segment list, then per segment the chunk run. Failures are
// contained at the boundary they occur at; only the targeted-dump hit stops
// the enumeration early.
pub struct HeapEnumerator {
    memory: Arc<dyn MemoryReader>,
    catalog: Arc<TypeCatalog>,
    config: Config,
}

impl HeapEnumerator {
    pub fn new(memory: Arc<dyn MemoryReader>, catalog: Arc<TypeCatalog>, config: Config) -> Self {
        Self { memory, catalog, config }
    }

    pub fn run(&self, processes: &[ProcessContext]) -> Vec<ChunkRecord> {
        let extractor = PayloadExtractor::new(&self.config.output_dir);
        let mut records = Vec::new();

        for process in processes {
            match self.scan_process(process, &extractor, &mut records) {
                Ok(ScanOutcome::Completed) => {}
                Ok(ScanOutcome::TargetFound) => break,
                Err(e) => {
                    log::debug!("skipping {}: {}", process, e);
                }
            }
        }

        records
    }

    fn scan_process(
        &self,
        process: &ProcessContext,
        extractor: &PayloadExtractor,
        records: &mut Vec<ChunkRecord>,
    ) -> Result<ScanOutcome, ScanError> {
        let handles = self.read_heap_handles(process)?;
        log::debug!("{}: {} heap(s)", process, handles.len());

        for handle in handles {
            let heap = match Heap::read(&*self.memory, &self.catalog, handle) {
                Ok(heap) => heap,
                Err(e) => {
                    log::debug!("{}: heap at {} undecodable: {}", process, handle, e);
                    continue;
                }
            };

            let decoder = HeapEntryDecoder::new(&self.catalog, heap.key())?;
            let segments: Vec<Address> =
                SegmentWalker::new(&*self.memory, &self.catalog, &heap)?.collect();

            for segment in segments {
                for chunk in ChunkWalker::new(&*self.memory, &decoder, segment) {
                    if let ScanOutcome::TargetFound =
                        self.emit(process, &heap, segment, chunk, extractor, records)
                    {
                        return Ok(ScanOutcome::TargetFound);
                    }
                }
            }
        }

        Ok(ScanOutcome::Completed)
    }

    fn read_heap_handles(&self, process: &ProcessContext) -> Result<Vec<Address>, ScanError> {
        let array = process.heap_handles();
        let mut handles = Vec::with_capacity(process.heap_count() as usize);
        for index in 0..process.heap_count() as u64 {
            let handle = self
                .memory
                .read_ptr(array + index * 8)
                .map_err(|source| ScanError::HeapHandles {
                    pid: process.pid(),
                    address: array,
                    source,
                })?;
            if !handle.is_null() {
                handles.push(handle);
            }
        }
        Ok(handles)
    }

    fn emit(
        &self,
        process: &ProcessContext,
        heap: &Heap,
        segment: Address,
        chunk: DecodedChunk,
        extractor: &PayloadExtractor,
        records: &mut Vec<ChunkRecord>,
    ) -> ScanOutcome {
        let target = self.config.dump_target;
        let is_target = target == Some(chunk.header.address);

        // Point lookup: nothing is emitted until the target turns up.
        if target.is_some() && !is_target {
            return ScanOutcome::Completed;
        }

        let export = is_target || self.config.dump_all;
        let file_output = if export {
            match extractor.export(
                process.pid(),
                process.name(),
                chunk.header.address,
                &chunk.data,
            ) {
                Ok(name) => name,
                Err(e) => {
                    log::warn!(
                        "failed to write dump for chunk {}: {}",
                        chunk.header.address,
                        e
                    );
                    EXPORT_FAILED.to_string()
                }
            }
        } else {
            EXPORT_DISABLED.to_string()
        };

        records.push(ChunkRecord {
            pid: process.pid(),
            process_name: process.name().to_string(),
            heap: heap.base(),
            segment,
            chunk: chunk.header.address,
            encoded: chunk.header.encoded,
            byte_len: chunk.header.byte_len,
            status: chunk.header.flags.render(),
            payload: PayloadExtractor::preview(&chunk.data),
            file_output,
        });

        if is_target {
            ScanOutcome::TargetFound
        } else {
            ScanOutcome::Completed
        }
    }
}
