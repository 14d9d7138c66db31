use crate::constants::*;
use crate::error::{PagingError, Result};

/// Geometry of the simulated hierarchy, fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    page_size: usize,
    num_frames: usize,
    page_count: usize,
}

impl PagerConfig {
    /// Validate and build a configuration
    pub fn new(page_size: usize, num_frames: usize, page_count: usize) -> Result<Self> {
        if page_size == 0 || !page_size.is_power_of_two() {
            return Err(PagingError::InvalidConfig(format!(
                "page size {} is not a power of two",
                page_size
            )));
        }
        if num_frames == 0 {
            return Err(PagingError::InvalidConfig(
                "fast memory needs at least one frame".to_string(),
            ));
        }
        if page_count == 0 {
            return Err(PagingError::InvalidConfig(
                "address space needs at least one page".to_string(),
            ));
        }
        if page_count.checked_mul(page_size).is_none() {
            return Err(PagingError::InvalidConfig(
                "backing store size overflows".to_string(),
            ));
        }
        if num_frames.checked_mul(page_size).is_none() {
            return Err(PagingError::InvalidConfig(
                "fast memory size overflows".to_string(),
            ));
        }

        Ok(PagerConfig { page_size, num_frames, page_count })
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[inline]
    pub fn page_shift(&self) -> u32 {
        self.page_size.trailing_zeros()
    }

    #[inline]
    pub fn offset_mask(&self) -> usize {
        self.page_size - 1
    }

    pub fn fast_memory_size(&self) -> usize {
        self.num_frames * self.page_size
    }

    /// Also the exclusive upper bound of valid virtual addresses
    pub fn backing_store_size(&self) -> usize {
        self.page_count * self.page_size
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        PagerConfig {
            page_size: PAGE_SIZE,
            num_frames: NUM_FRAMES,
            page_count: PAGE_COUNT,
        }
    }
}
