pub const PAGE_SHIFT: u32 = 12;
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;
pub const OFFSET_MASK: usize = PAGE_SIZE - 1;

pub const NUM_FRAMES: usize = 16;
pub const FAST_MEMORY_SIZE: usize = NUM_FRAMES * PAGE_SIZE;

pub const PAGE_COUNT: usize = 1024;
pub const BACKING_STORE_SIZE: usize = PAGE_COUNT * PAGE_SIZE;
