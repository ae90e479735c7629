use crate::constants::*;

/// Split a raw logical address into (page number, page offset)
#[inline]
pub fn split(address: u32) -> (u32, u32) {
    (address >> PAGE_NUMBER_OFFSET_BITS, address & PAGE_OFFSET_MASK)
}

/// Rebuild a physical address from a frame number and an offset within it
///
/// # Panics
/// If `frame_offset` does not fit in a frame or `frame_number` is not a valid frame.
#[inline]
pub fn combine(frame_number: u32, frame_offset: u32) -> u32 {
    assert!((frame_offset as usize) < FRAME_SIZE, "frame offset {} out of range", frame_offset);
    assert!((frame_number as usize) < MAX_FRAMES, "frame number {} out of range", frame_number);
    (frame_number << FRAME_NUMBER_OFFSET_BITS) | frame_offset
}

/// A logical address together with its decomposed page number and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub address: u32,
    pub page_number: u32,
    pub page_offset: u32,
}

impl VirtualAddress {
    /// Decompose a raw address. Range checking is the caller's job (see `io`).
    pub fn from_raw(address: u32) -> Self {
        debug_assert!(address <= MAX_VIRTUAL_ADDRESS, "address {} exceeds {}", address, MAX_VIRTUAL_ADDRESS);
        let (page_number, page_offset) = split(address);
        VirtualAddress { address, page_number, page_offset }
    }
}

impl std::fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VA({}) = (page={}, offset={})", self.address, self.page_number, self.page_offset)
    }
}

/// Where a virtual address landed in physical memory and the byte found there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalAddress {
    pub address: u32,
    pub frame_number: u32,
    pub frame_offset: u32,
    pub value: i8,
}

impl PhysicalAddress {
    pub fn new(frame_number: u32, frame_offset: u32, value: i8) -> Self {
        PhysicalAddress {
            address: combine(frame_number, frame_offset),
            frame_number,
            frame_offset,
            value,
        }
    }
}

/// One line of output: a completed translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub virtual_address: VirtualAddress,
    pub physical_address: PhysicalAddress,
    /// Whether this translation had to page the frame in
    pub page_fault: bool,
}

impl std::fmt::Display for Translation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Virtual address: {} Physical address: {} Value: {}",
            self.virtual_address.address, self.physical_address.address, self.physical_address.value
        )
    }
}
