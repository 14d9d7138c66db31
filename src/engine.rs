//! Demand-paging engine.
//!
//! Every byte access bumps a logical clock, stamps the page, pages it in on
//! a miss (evicting the least recently used resident page when all frames
//! are taken) and then reads or writes through fast memory. The backing
//! store is never used to satisfy an access directly.

use log::{debug, info, trace};

use crate::config::PagerConfig;
use crate::error::{PagingError, Result};
use crate::io::Access;
use crate::memory::{BackingStore, FastMemory};
use crate::page_table::PageTable;
use crate::translation::AddressTranslator;

/// Running counters, never reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingStats {
    pub accesses: u64,
    pub page_faults: u64,
    pub evictions: u64,
    pub write_backs: u64,
}

pub struct PagingEngine {
    config: PagerConfig,
    translator: AddressTranslator,
    table: PageTable,
    fast: FastMemory,
    store: BackingStore,
    clock: u64,
    next_free_frame: usize,
    stats: PagingStats,
}

impl PagingEngine {
    /// Engine over a zero-filled backing store
    pub fn new(config: PagerConfig) -> Self {
        let store = BackingStore::new(config.page_size(), config.page_count());
        Self::build(config, store)
    }

    /// Engine over pre-seeded content
    pub fn with_backing_store(config: PagerConfig, store: BackingStore) -> Result<Self> {
        if store.len() != config.backing_store_size() {
            return Err(PagingError::BackingStoreSize {
                expected: config.backing_store_size(),
                actual: store.len(),
            });
        }
        if store.page_size() != config.page_size() {
            return Err(PagingError::PageSizeMismatch {
                expected: config.page_size(),
                actual: store.page_size(),
            });
        }
        Ok(Self::build(config, store))
    }

    fn build(config: PagerConfig, store: BackingStore) -> Self {
        info!(
            "paging engine: {} pages of {} bytes, {} frames",
            config.page_count(),
            config.page_size(),
            config.num_frames()
        );
        PagingEngine {
            translator: AddressTranslator::new(&config),
            table: PageTable::new(config.page_count()),
            fast: FastMemory::new(config.page_size(), config.num_frames()),
            store,
            clock: 0,
            next_free_frame: 0,
            stats: PagingStats::default(),
            config,
        }
    }

    /// Read one byte of the virtual address space
    pub fn get_byte(&mut self, va: usize) -> Result<u8> {
        let page = self.record_access(va)?;
        let frame = self.ensure_resident(page);
        let pa = self.translator.translate(frame, va);
        Ok(self.fast.read(pa))
    }

    /// Write one byte of the virtual address space
    pub fn set_byte(&mut self, va: usize, value: u8) -> Result<()> {
        let page = self.record_access(va)?;
        let frame = self.ensure_resident(page);
        self.table.mark_dirty(page);
        let pa = self.translator.translate(frame, va);
        self.fast.write(pa, value);
        Ok(())
    }

    /// All frames are occupied
    pub fn is_memory_full(&self) -> bool {
        self.table.resident() == self.config.num_frames()
    }

    /// Write every dirty resident page back; pages stay resident
    pub fn flush(&mut self) {
        let dirty = self.table.dirty_pages();
        for &page in &dirty {
            self.write_back(page);
        }
        info!("flushed {} dirty pages", dirty.len());
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn page_table(&self) -> &PageTable {
        &self.table
    }

    pub fn resident_pages(&self) -> usize {
        self.table.resident()
    }

    /// Current value of the logical access clock
    pub fn access_count(&self) -> u64 {
        self.clock
    }

    pub fn stats(&self) -> PagingStats {
        self.stats
    }

    /// Raw backing content. Dirty resident pages are not reflected until
    /// they are evicted or flushed.
    pub fn backing_store(&self) -> &BackingStore {
        &self.store
    }

    /// Mutable backing content, for seeding before the first access.
    ///
    /// Changes to a page that is resident are not seen until it is paged in
    /// again, and are overwritten if the resident copy is dirty.
    pub fn backing_store_mut(&mut self) -> &mut BackingStore {
        &mut self.store
    }

    /// Flush and hand back the authoritative store
    pub fn into_backing_store(mut self) -> BackingStore {
        self.flush();
        self.store
    }

    fn record_access(&mut self, va: usize) -> Result<usize> {
        let limit = self.config.backing_store_size();
        if va >= limit {
            return Err(PagingError::OutOfRange { address: va, limit });
        }

        self.clock += 1;
        self.stats.accesses += 1;
        let page = self.translator.page_number(va);
        self.table.touch(page, self.clock);
        trace!("access #{} {}", self.clock, self.translator.decompose(va));
        Ok(page)
    }

    fn ensure_resident(&mut self, page: usize) -> usize {
        let resident = self.table.entry(page).frame();
        resident.unwrap_or_else(|| self.page_in(page))
    }

    fn page_in(&mut self, page: usize) -> usize {
        let frame = self.allocate_frame();
        self.fast.load_page(frame, &self.store, page);
        self.table.map(page, frame);
        self.stats.page_faults += 1;
        debug!("page fault: page {} loaded into frame {}", page, frame);
        frame
    }

    fn allocate_frame(&mut self) -> usize {
        if self.is_memory_full() {
            return self.evict();
        }
        let frame = self.next_free_frame;
        assert!(
            frame < self.config.num_frames(),
            "frame pool exhausted with {} resident pages",
            self.table.resident()
        );
        self.next_free_frame += 1;
        frame
    }

    /// Evict the LRU page and return its frame
    fn evict(&mut self) -> usize {
        let victim = self
            .table
            .lru_victim()
            .unwrap_or_else(|| panic!("memory reported full but no page is resident"));
        if self.table.entry(victim).is_dirty() {
            self.write_back(victim);
        }
        let frame = self.table.unmap(victim);
        self.stats.evictions += 1;
        debug!("evicted page {} from frame {}", victim, frame);
        frame
    }

    fn write_back(&mut self, page: usize) {
        let frame = self
            .table
            .entry(page)
            .frame()
            .unwrap_or_else(|| panic!("write-back of absent page {}", page));
        self.fast.store_page(frame, &mut self.store, page);
        self.table.mark_clean(page);
        self.stats.write_backs += 1;
        debug!("wrote back page {} from frame {}", page, frame);
    }
}

/// Replay a trace, collecting the value of every read in order
pub fn replay(engine: &mut PagingEngine, accesses: &[Access]) -> Result<Vec<u8>> {
    let mut reads = Vec::new();
    for access in accesses {
        match *access {
            Access::Read(va) => reads.push(engine.get_byte(va)?),
            Access::Write(va, value) => engine.set_byte(va, value)?,
        }
    }
    Ok(reads)
}
