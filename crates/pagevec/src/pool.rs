//! Backing pages and the slot pool built on them.
//!
//! A page is a fixed-capacity `Vec<T>` buffer allocated once at page
//! creation. The pool only pushes while the page is below its slot budget,
//! so the heap buffer never reallocates and element addresses within a page
//! are stable for the page's whole life. Growing the page *table* moves the
//! page headers, not the heap buffers they own.
//!
//! Logical slots are numbered `0..` in allocation order across all pages.
//! Each page records the logical index of its first slot; slot → address
//! translation is a binary search over those indices plus an offset within
//! the page.

use std::mem::MaybeUninit;

use smallvec::SmallVec;

use crate::config::PoolConfig;
use crate::raw;

/// A single backing page: a fixed-capacity buffer that never reallocates.
struct Page<T> {
    /// Element storage. Pushes stay strictly within the initial capacity.
    slots: Vec<T>,
    /// Slot budget. `Vec::with_capacity` may round up; this is the policy
    /// limit the pool enforces, so page arithmetic stays predictable.
    cap: usize,
    /// Logical index of this page's first slot.
    first_slot: usize,
}

impl<T> Page<T> {
    fn new(first_slot: usize, cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
            cap,
            first_slot,
        }
    }

    fn remaining(&self) -> usize {
        self.cap - self.slots.len()
    }

    fn memory_bytes(&self) -> usize {
        self.cap * std::mem::size_of::<T>()
    }
}

/// A pool of append-only pages handing out address-stable element slots.
///
/// Once `alloc` (or `alloc_slice`, or a `reserve_uninit`/`commit` pair)
/// has placed an element, that element's address never changes until
/// [`free_all`](Self::free_all) or drop. There is no per-slot free.
///
/// A page that lacks room for a requested run is *sealed*: the run goes
/// entirely into a fresh page and the old page's unused tail is wasted
/// (internal fragmentation, traded for the no-straddling guarantee).
pub struct PagePool<T> {
    /// Page table. Inline up to four pages — the common case for
    /// short-lived vectors never touches the heap for headers.
    pages: SmallVec<[Page<T>; 4]>,
    /// Slot budget of a regular page. Oversized runs get bigger pages.
    slots_per_page: usize,
}

impl<T> PagePool<T> {
    /// Create an empty pool. No page is allocated until the first request.
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            pages: SmallVec::new(),
            slots_per_page: config.slots_for::<T>(),
        }
    }

    /// Number of committed slots (O(1): derived from the last page).
    pub fn len(&self) -> usize {
        self.pages
            .last()
            .map_or(0, |p| p.first_slot + p.slots.len())
    }

    /// Whether the pool holds no committed slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Place one element and return its logical slot index.
    ///
    /// May open a new page; previously placed elements never move.
    pub fn alloc(&mut self, value: T) -> usize {
        let slot = self.len();
        self.writable_page(1).slots.push(value);
        slot
    }

    /// Place a contiguous run of elements and return the first slot index.
    ///
    /// The run always lands in a single page: if the current page lacks
    /// room it is sealed and a fresh page sized
    /// `max(slots_per_page, run.len())` is opened. The run is therefore
    /// internally contiguous in memory, but not necessarily contiguous
    /// with earlier slots.
    pub fn alloc_slice(&mut self, run: &[T]) -> usize
    where
        T: Clone,
    {
        let slot = self.len();
        if !run.is_empty() {
            self.writable_page(run.len()).slots.extend_from_slice(run);
        }
        slot
    }

    /// Reserve `n` spare slots in a single page and expose them for
    /// initialisation.
    ///
    /// The slots are not committed: `len()` is unchanged and the returned
    /// region is invisible to [`get`](Self::get) until a matching
    /// [`commit`](Self::commit). An abandoned reservation is simply
    /// overwritten by the next request.
    pub fn reserve_uninit(&mut self, n: usize) -> &mut [MaybeUninit<T>] {
        if n == 0 {
            return &mut [];
        }
        let page = self.writable_page(n);
        &mut page.slots.spare_capacity_mut()[..n]
    }

    /// Mark the first `n` slots of the current reservation live.
    ///
    /// # Safety
    ///
    /// The caller must have obtained at least `n` slots from an immediately
    /// preceding [`reserve_uninit`](Self::reserve_uninit) on this pool,
    /// fully initialised the first `n` of them, and performed no other
    /// mutation of the pool in between.
    #[allow(unsafe_code)]
    pub unsafe fn commit(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let page = self
            .pages
            .last_mut()
            .expect("commit without a prior reserve_uninit");
        debug_assert!(n <= page.remaining());
        // SAFETY: forwarding the documented caller contract — the first
        // `n` spare slots of the current page were initialised by the
        // caller and fit within the page's capacity.
        unsafe { raw::set_live(&mut page.slots, n) };
    }

    /// Shared access to the element at a logical slot.
    ///
    /// O(log pages): binary search over per-page first-slot indices, then
    /// an offset within the page. Returns `None` for uncommitted slots.
    pub fn get(&self, slot: usize) -> Option<&T> {
        let page = self.page_of(slot)?;
        page.slots.get(slot - page.first_slot)
    }

    /// Mutable access to the element at a logical slot.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        let idx = self.page_index_of(slot)?;
        let page = &mut self.pages[idx];
        page.slots.get_mut(slot - page.first_slot)
    }

    /// Release every page, dropping all elements.
    ///
    /// All slot indices are invalidated; the pool is reusable afterwards.
    pub fn free_all(&mut self) {
        self.pages.clear();
    }

    /// Number of backing pages currently allocated.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total backing memory across all pages in bytes (live and wasted).
    pub fn memory_bytes(&self) -> usize {
        self.pages.iter().map(Page::memory_bytes).sum()
    }

    /// Slot budget of a regular page.
    pub fn slots_per_page(&self) -> usize {
        self.slots_per_page
    }

    fn page_index_of(&self, slot: usize) -> Option<usize> {
        self.pages
            .partition_point(|p| p.first_slot <= slot)
            .checked_sub(1)
    }

    fn page_of(&self, slot: usize) -> Option<&Page<T>> {
        Some(&self.pages[self.page_index_of(slot)?])
    }

    /// The page the next run of `need` slots goes into, opening one if the
    /// current page lacks room. Runs never straddle pages.
    fn writable_page(&mut self, need: usize) -> &mut Page<T> {
        let next_slot = self.len();
        next_slot
            .checked_add(need)
            .expect("slot count overflows usize");
        let fits = self.pages.last().is_some_and(|p| p.remaining() >= need);
        if !fits {
            let cap = self.slots_per_page.max(need);
            self.pages.push(Page::new(next_slot, cap));
        }
        self.pages
            .last_mut()
            .expect("page table is non-empty after push")
    }
}
