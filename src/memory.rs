use crate::constants::*;
use crate::error::{Result, VmError};

/// Simulated RAM: MAX_FRAMES frames of FRAME_SIZE bytes each
pub struct PhysicalMemory {
    data: Box<[u8]>,
    loaded: Box<[bool]>,
}

impl PhysicalMemory {
    /// Create a new physical memory with every frame empty
    pub fn new() -> Self {
        PhysicalMemory {
            data: vec![0u8; PHYSICAL_MEMORY_SIZE].into_boxed_slice(),
            loaded: vec![false; MAX_FRAMES].into_boxed_slice(),
        }
    }

    /// Calculate the starting address of a frame
    #[inline]
    pub fn frame_to_address(frame: u32) -> usize {
        frame as usize * FRAME_SIZE
    }

    /// Copy a full page into a frame. Frames are only ever written once.
    pub fn write_frame(&mut self, frame: u32, page: &[u8; PAGE_SIZE]) {
        assert!((frame as usize) < MAX_FRAMES, "frame {} out of range", frame);
        debug_assert!(!self.loaded[frame as usize], "frame {} written twice", frame);

        let start = Self::frame_to_address(frame);
        self.data[start..start + FRAME_SIZE].copy_from_slice(page);
        self.loaded[frame as usize] = true;
    }

    /// Read the signed byte at `offset` within `frame`
    #[inline]
    pub fn read_byte(&self, frame: u32, offset: u32) -> i8 {
        debug_assert!(self.is_loaded(frame), "read from frame {} before it was loaded", frame);
        self.data[Self::frame_to_address(frame) + offset as usize] as i8
    }

    #[inline]
    pub fn is_loaded(&self, frame: u32) -> bool {
        self.loaded.get(frame as usize).copied().unwrap_or(false)
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-level page table; `None` means the page has not been paged in yet
pub struct PageTable {
    entries: [Option<u32>; PAGE_TABLE_SIZE],
    fault_count: u32,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable {
            entries: [None; PAGE_TABLE_SIZE],
            fault_count: 0,
        }
    }

    #[inline]
    pub fn lookup(&self, page: u32) -> Option<u32> {
        self.entries[page as usize]
    }

    /// Map `page` to `frame` for the rest of the run
    pub fn install(&mut self, page: u32, frame: u32) {
        debug_assert!(self.entries[page as usize].is_none(), "page {} is already mapped", page);
        self.entries[page as usize] = Some(frame);
    }

    pub fn record_fault(&mut self) {
        self.fault_count += 1;
    }

    pub fn fault_count(&self) -> u32 {
        self.fault_count
    }

    /// Number of pages currently resident
    pub fn mapped_pages(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out frames in increasing order; nothing is ever freed
#[derive(Debug)]
pub struct FrameAllocator {
    next_free_frame: u32,
    capacity: usize,
}

impl FrameAllocator {
    pub fn new() -> Self {
        Self::with_capacity(MAX_FRAMES)
    }

    /// Allocator limited to the first `capacity` frames
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity <= MAX_FRAMES, "capacity {} exceeds {} frames", capacity, MAX_FRAMES);
        FrameAllocator { next_free_frame: 0, capacity }
    }

    pub fn allocate(&mut self) -> Result<u32> {
        if self.next_free_frame as usize >= self.capacity {
            return Err(VmError::FrameExhausted { capacity: self.capacity });
        }
        let frame = self.next_free_frame;
        self.next_free_frame += 1;
        Ok(frame)
    }

    pub fn allocated(&self) -> usize {
        self.next_free_frame as usize
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FrameAllocator {
    fn default() -> Self {
        Self::new()
    }
}
