use crate::error::{PagingError, Result};

/// Slow store - holds every page of the address space, resident or not
pub struct BackingStore {
    data: Box<[u8]>,
    page_size: usize,
}

impl BackingStore {
    /// Create a backing store of `page_count` pages initialized to all zeros
    pub fn new(page_size: usize, page_count: usize) -> Self {
        BackingStore {
            data: vec![0u8; page_size * page_count].into_boxed_slice(),
            page_size,
        }
    }

    /// Wrap pre-seeded content; the length must cover exactly `page_count` pages
    pub fn from_bytes(bytes: Vec<u8>, page_size: usize, page_count: usize) -> Result<Self> {
        let expected = page_size * page_count;
        if bytes.len() != expected {
            return Err(PagingError::BackingStoreSize { expected, actual: bytes.len() });
        }
        Ok(BackingStore { data: bytes.into_boxed_slice(), page_size })
    }

    /// Read a byte from the store
    #[inline]
    pub fn read(&self, address: usize) -> u8 {
        self.data[address]
    }

    /// Write a byte to the store
    #[inline]
    pub fn write(&mut self, address: usize, value: u8) {
        self.data[address] = value;
    }

    /// Byte range owned by a page
    pub fn page(&self, page: usize) -> &[u8] {
        let start = page * self.page_size;
        &self.data[start..start + self.page_size]
    }

    pub fn page_mut(&mut self, page: usize) -> &mut [u8] {
        let start = page * self.page_size;
        &mut self.data[start..start + self.page_size]
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get direct access to the underlying data (for seeding and inspection)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Fast memory - `num_frames` frames, each holding one resident page
pub struct FastMemory {
    data: Box<[u8]>,
    page_size: usize,
}

impl FastMemory {
    /// Create a fast memory of `num_frames` frames initialized to all zeros
    pub fn new(page_size: usize, num_frames: usize) -> Self {
        FastMemory {
            data: vec![0u8; page_size * num_frames].into_boxed_slice(),
            page_size,
        }
    }

    /// Read a byte at a physical address
    #[inline]
    pub fn read(&self, address: usize) -> u8 {
        self.data[address]
    }

    /// Write a byte at a physical address
    #[inline]
    pub fn write(&mut self, address: usize, value: u8) {
        self.data[address] = value;
    }

    /// Calculate the starting address of a frame
    #[inline]
    pub fn frame_to_address(&self, frame: usize) -> usize {
        frame * self.page_size
    }

    pub fn frame(&self, frame: usize) -> &[u8] {
        let start = self.frame_to_address(frame);
        &self.data[start..start + self.page_size]
    }

    pub fn frame_mut(&mut self, frame: usize) -> &mut [u8] {
        let start = self.frame_to_address(frame);
        &mut self.data[start..start + self.page_size]
    }

    /// Copy a whole page from the backing store into a frame
    pub fn load_page(&mut self, frame: usize, store: &BackingStore, page: usize) {
        self.frame_mut(frame).copy_from_slice(store.page(page));
    }

    /// Copy a whole frame back into the backing store
    pub fn store_page(&self, frame: usize, store: &mut BackingStore, page: usize) {
        store.page_mut(page).copy_from_slice(self.frame(frame));
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
