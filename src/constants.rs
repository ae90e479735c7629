pub const PAGE_NUMBER_OFFSET_BITS: u32 = 8;
pub const FRAME_NUMBER_OFFSET_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << PAGE_NUMBER_OFFSET_BITS;
pub const FRAME_SIZE: usize = PAGE_SIZE;
pub const PAGE_TABLE_SIZE: usize = 256;

// one frame per representable page, so no replacement is ever needed
pub const MAX_FRAMES: usize = PAGE_TABLE_SIZE;
pub const PHYSICAL_MEMORY_SIZE: usize = MAX_FRAMES * FRAME_SIZE;

pub const PAGE_OFFSET_MASK: u32 = (1 << PAGE_NUMBER_OFFSET_BITS) - 1;

// 16-bit logical addresses: 8 bits page number, 8 bits offset
pub const MAX_VIRTUAL_ADDRESS: u32 = (PAGE_TABLE_SIZE * PAGE_SIZE - 1) as u32;

pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";
pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";
