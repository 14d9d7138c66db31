use crate::config::PagerConfig;

/// Represents the decomposed components of a Virtual Address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub va: usize,
    pub page: usize,
    pub offset: usize,
}

impl std::fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VA({}) = (page={}, offset={})", self.va, self.page, self.offset)
    }
}

/// Splits virtual addresses and composes physical ones
#[derive(Debug, Clone, Copy)]
pub struct AddressTranslator {
    page_shift: u32,
    offset_mask: usize,
    fast_memory_size: usize,
}

impl AddressTranslator {
    pub fn new(config: &PagerConfig) -> Self {
        AddressTranslator {
            page_shift: config.page_shift(),
            offset_mask: config.offset_mask(),
            fast_memory_size: config.fast_memory_size(),
        }
    }

    #[inline]
    pub fn page_number(&self, va: usize) -> usize {
        va >> self.page_shift
    }

    #[inline]
    pub fn offset_of(&self, va: usize) -> usize {
        va & self.offset_mask
    }

    /// Decompose a raw VA into its components
    pub fn decompose(&self, va: usize) -> VirtualAddress {
        VirtualAddress {
            va,
            page: self.page_number(va),
            offset: self.offset_of(va),
        }
    }

    /// Physical address of `va` inside the frame its page occupies.
    ///
    /// Callers must page in first; an address outside fast memory is a bug.
    pub fn translate(&self, frame: usize, va: usize) -> usize {
        let pa = (frame << self.page_shift) | self.offset_of(va);
        assert!(
            pa < self.fast_memory_size,
            "frame {} yields physical address {} beyond fast memory ({} bytes)",
            frame,
            pa,
            self.fast_memory_size
        );
        pa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_translator() -> AddressTranslator {
        AddressTranslator::new(&PagerConfig::default())
    }

    #[test]
    fn test_decomposition_high_address() {
        // 4192425 = 1023 * 4096 + 2217
        let va = default_translator().decompose(4_192_425);
        assert_eq!(va.page, 1023);
        assert_eq!(va.offset, 2217);
    }

    #[test]
    fn test_decomposition_edge_cases() {
        let t = default_translator();

        let va = t.decompose(0);
        assert_eq!((va.page, va.offset), (0, 0));

        let va = t.decompose(4095);
        assert_eq!((va.page, va.offset), (0, 4095));

        let va = t.decompose(4096);
        assert_eq!((va.page, va.offset), (1, 0));

        let va = t.decompose(4_194_303);
        assert_eq!((va.page, va.offset), (1023, 4095));
    }

    #[test]
    fn test_reconstruction() {
        let t = default_translator();
        for &original in &[0usize, 7, 28_658, 1_048_576, 4_192_425] {
            let va = t.decompose(original);
            assert_eq!((va.page << 12) | va.offset, original, "Failed for VA={}", original);
        }
    }

    #[test]
    fn test_translate_keeps_offset() {
        let t = default_translator();
        assert_eq!(t.translate(0, 4_192_425), 2217);
        assert_eq!(t.translate(3, 4_192_425), 3 * 4096 + 2217);
        assert_eq!(t.translate(15, 4095), 65_535);
    }

    #[test]
    #[should_panic(expected = "beyond fast memory")]
    fn test_translate_rejects_frame_outside_fast_memory() {
        default_translator().translate(16, 0);
    }

    #[test]
    fn test_small_geometry() {
        let t = AddressTranslator::new(&PagerConfig::new(16, 2, 8).unwrap());
        assert_eq!(t.page_number(37), 2);
        assert_eq!(t.offset_of(37), 5);
        assert_eq!(t.translate(1, 37), 21);
    }

    #[test]
    fn test_display() {
        let va = default_translator().decompose(4_192_425);
        let display = format!("{}", va);
        assert!(display.contains("4192425"));
        assert!(display.contains("page=1023"));
        assert!(display.contains("offset=2217"));
    }
}
