use std::fs::File;
use std::io::{Read, Seek, Write};

use log::{debug, info, trace};

use crate::backing_store::BackingStore;
use crate::error::{Result, VmError};
use crate::io::{ResultSink, Statistics};
use crate::memory::{FrameAllocator, PageTable, PhysicalMemory};
use crate::translation::{PhysicalAddress, Translation, VirtualAddress};

/// Demand-paging MMU. Owns every piece of simulated hardware for one run.
pub struct VmManager<R = File> {
    page_table: PageTable,
    frames: FrameAllocator,
    pm: PhysicalMemory,
    backing_store: BackingStore<R>,
    translations: usize,
}

impl<R: Read + Seek> VmManager<R> {
    pub fn new(backing_store: BackingStore<R>) -> Self {
        Self::with_allocator(backing_store, FrameAllocator::new())
    }

    /// Simulate a physical memory of only `frames` frames
    pub fn with_frame_capacity(backing_store: BackingStore<R>, frames: usize) -> Self {
        Self::with_allocator(backing_store, FrameAllocator::with_capacity(frames))
    }

    fn with_allocator(backing_store: BackingStore<R>, frames: FrameAllocator) -> Self {
        VmManager {
            page_table: PageTable::new(),
            frames,
            pm: PhysicalMemory::new(),
            backing_store,
            translations: 0,
        }
    }

    /// Translate one address, paging its frame in from the backing store if needed
    pub fn translate(&mut self, va: VirtualAddress) -> Result<Translation> {
        let (frame, page_fault) = match self.page_table.lookup(va.page_number) {
            Some(frame) => (frame, false),
            None => (self.handle_fault(va.page_number)?, true),
        };

        let value = self.pm.read_byte(frame, va.page_offset);
        let pa = PhysicalAddress::new(frame, va.page_offset, value);
        self.translations += 1;

        trace!("{} -> PA {} (frame {}) value {}", va, pa.address, frame, value);
        Ok(Translation { virtual_address: va, physical_address: pa, page_fault })
    }

    fn handle_fault(&mut self, page: u32) -> Result<u32> {
        self.page_table.record_fault();

        let frame = self.frames.allocate()?;
        let bytes = self.backing_store.read_page(page)?;
        self.pm.write_frame(frame, &bytes);
        self.page_table.install(page, frame);

        debug!("page fault: page {} loaded into frame {}", page, frame);
        Ok(frame)
    }

    /// Translate every address in order, streaming each record to `sink`.
    /// The statistics line is only written once all translations succeed.
    pub fn run<W: Write>(&mut self, addresses: &[VirtualAddress], sink: &mut ResultSink<W>) -> Result<Statistics> {
        if addresses.is_empty() {
            return Err(VmError::EmptyInput);
        }
        info!("translating {} addresses", addresses.len());

        for &va in addresses {
            let translation = self.translate(va)?;
            sink.write_translation(&translation)?;
        }

        let stats = self.statistics();
        sink.write_statistics(&stats)?;

        info!(
            "done: {} page faults, {} frames in use, {} pages read from backing store",
            stats.page_faults,
            self.frames.allocated(),
            self.backing_store.pages_read()
        );
        Ok(stats)
    }

    /// Translate a batch without producing output
    pub fn translate_batch(&mut self, addresses: &[VirtualAddress]) -> Result<Vec<Translation>> {
        addresses.iter().map(|&va| self.translate(va)).collect()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            page_faults: self.page_table.fault_count(),
            total_addresses: self.translations,
        }
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frame_allocator(&self) -> &FrameAllocator {
        &self.frames
    }
}
