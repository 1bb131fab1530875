//! Pool configuration parameters.

/// Configuration for the page pool backing a [`PageVec`](crate::PageVec).
///
/// Controls page sizing. Immutable once the pool is created.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Target size of one backing page in bytes.
    ///
    /// Default: 4096. The slot budget of a regular page is derived from
    /// this and the element size; a page always holds at least one slot,
    /// so elements larger than `page_bytes` still work (one per page).
    pub page_bytes: usize,
}

impl PoolConfig {
    /// Default page size in bytes.
    pub const DEFAULT_PAGE_BYTES: usize = 4096;

    /// Nominal slot budget per page for zero-sized element types.
    ///
    /// ZST pages occupy no memory, so the budget only affects how often
    /// the pool opens a (free) new page header.
    pub const ZST_SLOTS_PER_PAGE: usize = 4096;

    /// Create a config with an explicit page size in bytes.
    pub fn new(page_bytes: usize) -> Self {
        Self { page_bytes }
    }

    /// Slot budget of a regular page for elements of type `T`.
    ///
    /// `max(1, page_bytes / size_of::<T>())`; zero-sized types get the
    /// nominal [`ZST_SLOTS_PER_PAGE`](Self::ZST_SLOTS_PER_PAGE) budget.
    pub fn slots_for<T>(&self) -> usize {
        let elem = std::mem::size_of::<T>();
        if elem == 0 {
            Self::ZST_SLOTS_PER_PAGE
        } else {
            (self.page_bytes / elem).max(1)
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_holds_1024_f32() {
        let config = PoolConfig::default();
        assert_eq!(config.slots_for::<f32>(), 1024);
    }

    #[test]
    fn oversized_element_gets_one_slot() {
        let config = PoolConfig::new(16);
        assert_eq!(config.slots_for::<[u8; 64]>(), 1);
    }

    #[test]
    fn zst_gets_nominal_budget() {
        let config = PoolConfig::default();
        assert_eq!(config.slots_for::<()>(), PoolConfig::ZST_SLOTS_PER_PAGE);
    }
}
