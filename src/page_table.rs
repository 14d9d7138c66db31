/// Per-page bookkeeping.
///
/// A page is present exactly when it owns a frame, so presence is derived
/// from `frame` rather than stored separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTableEntry {
    frame: Option<usize>,
    dirty: bool,
    last_access: u64,
}

impl PageTableEntry {
    #[inline]
    pub fn is_present(&self) -> bool {
        self.frame.is_some()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn frame(&self) -> Option<usize> {
        self.frame
    }

    #[inline]
    pub fn last_access(&self) -> u64 {
        self.last_access
    }
}

/// Fixed-size table indexed by page number, allocated once
pub struct PageTable {
    entries: Box<[PageTableEntry]>,
    resident: usize,
}

impl PageTable {
    /// Create a table of `page_count` absent entries
    pub fn new(page_count: usize) -> Self {
        PageTable {
            entries: vec![PageTableEntry::default(); page_count].into_boxed_slice(),
            resident: 0,
        }
    }

    #[inline]
    pub fn entry(&self, page: usize) -> &PageTableEntry {
        &self.entries[page]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently holding a frame
    #[inline]
    pub fn resident(&self) -> usize {
        self.resident
    }

    pub fn touch(&mut self, page: usize, stamp: u64) {
        self.entries[page].last_access = stamp;
    }

    pub fn mark_dirty(&mut self, page: usize) {
        let entry = &mut self.entries[page];
        assert!(entry.is_present(), "page {} marked dirty while absent", page);
        entry.dirty = true;
    }

    pub fn mark_clean(&mut self, page: usize) {
        self.entries[page].dirty = false;
    }

    /// Absent -> Resident-Clean
    pub fn map(&mut self, page: usize, frame: usize) {
        let entry = &mut self.entries[page];
        assert!(!entry.is_present(), "page {} mapped twice", page);
        entry.frame = Some(frame);
        entry.dirty = false;
        self.resident += 1;
    }

    /// Resident -> Absent, returning the freed frame.
    /// The caller must have written back dirty content first.
    pub fn unmap(&mut self, page: usize) -> usize {
        let entry = &mut self.entries[page];
        assert!(!entry.dirty, "page {} unmapped while dirty", page);
        let frame = entry
            .frame
            .take()
            .unwrap_or_else(|| panic!("page {} unmapped while absent", page));
        self.resident -= 1;
        frame
    }

    /// Resident page with the smallest access stamp.
    /// Ties go to the lowest page number.
    pub fn lru_victim(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_present())
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(page, _)| page)
    }

    /// Iterate over `(page, frame)` for all resident pages in page order
    pub fn resident_pages(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(page, entry)| entry.frame.map(|frame| (page, frame)))
    }

    /// Pages that are resident and dirty
    pub fn dirty_pages(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_present() && entry.dirty)
            .map(|(page, _)| page)
            .collect()
    }
}
