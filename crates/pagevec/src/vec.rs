//! The append-only paged vector.

use std::fmt;
use std::mem::MaybeUninit;
use std::ops::{Index, IndexMut};

use crate::config::PoolConfig;
use crate::pool::PagePool;

/// An append-only ordered sequence whose elements never move.
///
/// Elements are allocated from an owned [`PagePool`]; once appended, an
/// element occupies the same memory until [`clear`](Self::clear) or drop,
/// no matter how many later appends grow the vector or how many new pages
/// that opens. Re-reading `&v[i]` across appends always yields the same
/// address.
///
/// Deliberately absent: removal, insertion at a position, compaction,
/// shrinking, and iteration. Removal would force compaction, and moving
/// the surviving elements is exactly what the address guarantee forbids.
///
/// Single-threaded by design: `&mut self` on every mutating operation is
/// the whole concurrency story.
///
/// # Example
///
/// ```rust
/// use pagevec::PageVec;
///
/// let mut v = PageVec::new();
/// v.push("a".to_string());
/// v.extend_from_slice(&["b".to_string(), "c".to_string()]);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v[1], "b");
/// ```
pub struct PageVec<T> {
    pool: PagePool<T>,
}

impl<T> PageVec<T> {
    /// Create an empty vector with the default page size.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create an empty vector with explicit page sizing.
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            pool: PagePool::new(&config),
        }
    }

    /// Append one element.
    ///
    /// May open a new backing page; the addresses of existing elements are
    /// unaffected. Allocation failure is fatal (global allocator semantics).
    pub fn push(&mut self, value: T) {
        self.pool.alloc(value);
    }

    /// Append a contiguous run of elements in a single pool request.
    ///
    /// Observably equivalent to pushing each element in order. The run
    /// lands in a single page (sealing the current page if it lacks room,
    /// see [`PagePool::alloc_slice`]), so it is internally contiguous in
    /// memory — but not guaranteed contiguous with earlier elements.
    pub fn extend_from_slice(&mut self, run: &[T])
    where
        T: Clone,
    {
        self.pool.alloc_slice(run);
    }

    /// Shared access to the element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.pool.get(index)
    }

    /// Mutable access to the element at `index`, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.pool.get_mut(index)
    }

    /// Shared access to the most recently appended element.
    pub fn last(&self) -> Option<&T> {
        self.get(self.len().checked_sub(1)?)
    }

    /// Mutable access to the most recently appended element.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        let index = self.len().checked_sub(1)?;
        self.get_mut(index)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Whether the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Reserve `n` uncommitted slots in a single page and expose them for
    /// initialisation.
    ///
    /// First half of the two-phase append escape hatch: write into the
    /// returned region, then call [`commit`](Self::commit) to make the
    /// elements visible. Until then `len()` is unchanged and the slots are
    /// unreachable; a reservation abandoned without commit is simply
    /// overwritten by the next append.
    pub fn reserve_uninit(&mut self, n: usize) -> &mut [MaybeUninit<T>] {
        self.pool.reserve_uninit(n)
    }

    /// Make the first `n` slots of the current reservation visible.
    ///
    /// # Safety
    ///
    /// The caller must have obtained at least `n` slots from an immediately
    /// preceding [`reserve_uninit`](Self::reserve_uninit), fully initialised
    /// the first `n` of them, and not mutated the vector in between.
    #[allow(unsafe_code)]
    pub unsafe fn commit(&mut self, n: usize) {
        // SAFETY: same contract, forwarded to the pool.
        unsafe { self.pool.commit(n) };
    }

    /// Drop all elements and release every backing page (full reset).
    ///
    /// All element addresses are invalidated; the vector is reusable.
    pub fn clear(&mut self) {
        self.pool.free_all();
    }

    /// Number of backing pages currently allocated.
    pub fn page_count(&self) -> usize {
        self.pool.page_count()
    }

    /// Total backing memory in bytes, including sealed pages' wasted tails.
    pub fn memory_bytes(&self) -> usize {
        self.pool.memory_bytes()
    }
}

impl<T> Default for PageVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PageVec<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(el) => el,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }
}

impl<T> IndexMut<usize> for PageVec<T> {
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(el) => el,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PageVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len()).map(|i| &self[i]))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Sixteen-byte pages: small enough that every test crosses pages.
    fn tiny() -> PoolConfig {
        PoolConfig::new(16)
    }

    fn addr<T>(el: &T) -> usize {
        el as *const T as usize
    }

    // ── Append and access ───────────────────────────────────────

    #[test]
    fn push_then_read_back() {
        let mut v = PageVec::new();
        v.push(1);
        v.push(2);
        v.push(3);
        assert_eq!(v.len(), 3);
        assert_eq!(v[0], 1);
        assert_eq!(v[1], 2);
        assert_eq!(v[2], 3);
        assert_eq!(v.last(), Some(&3));
    }

    #[test]
    fn empty_vector_has_nothing() {
        let v: PageVec<u32> = PageVec::new();
        assert!(v.is_empty());
        assert_eq!(v.get(0), None);
        assert_eq!(v.last(), None);
        assert_eq!(v.page_count(), 0);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut v = PageVec::with_config(tiny());
        v.push(1u32);
        *v.get_mut(0).unwrap() = 99;
        assert_eq!(v[0], 99);
        v[0] += 1;
        assert_eq!(v[0], 100);
    }

    #[test]
    fn last_mut_targets_newest_element() {
        let mut v = PageVec::with_config(tiny());
        v.extend_from_slice(&[1u32, 2, 3]);
        *v.last_mut().unwrap() = 30;
        assert_eq!(v[2], 30);
    }

    #[test]
    fn extend_with_empty_run_is_noop() {
        let mut v: PageVec<u32> = PageVec::with_config(tiny());
        v.extend_from_slice(&[]);
        assert!(v.is_empty());
        assert_eq!(v.page_count(), 0);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the len is 2 but the index is 2")]
    fn index_past_end_panics() {
        let mut v = PageVec::new();
        v.push(1);
        v.push(2);
        let _ = v[2];
    }

    #[test]
    fn clear_resets_and_allows_reuse() {
        let mut v = PageVec::with_config(tiny());
        for i in 0..20u32 {
            v.push(i);
        }
        assert!(v.page_count() > 1);
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.memory_bytes(), 0);
        v.push(7);
        assert_eq!(v[0], 7);
    }

    #[test]
    fn debug_lists_elements_in_order() {
        let mut v = PageVec::new();
        v.extend_from_slice(&[1, 2, 3]);
        assert_eq!(format!("{v:?}"), "[1, 2, 3]");
    }

    // ── Two-phase reserve/commit ────────────────────────────────

    #[test]
    #[allow(unsafe_code)]
    fn reserve_commit_makes_elements_visible() {
        let mut v = PageVec::with_config(tiny());
        v.push(7u32);
        let spare = v.reserve_uninit(3);
        for (i, slot) in spare.iter_mut().enumerate() {
            slot.write(100 + i as u32);
        }
        // SAFETY: all three reserved slots were written above.
        unsafe { v.commit(3) };
        assert_eq!(v.len(), 4);
        assert_eq!(v[1], 100);
        assert_eq!(v[2], 101);
        assert_eq!(v[3], 102);
    }

    #[test]
    fn uncommitted_reservation_stays_invisible() {
        let mut v: PageVec<u32> = PageVec::with_config(tiny());
        v.reserve_uninit(4);
        assert!(v.is_empty());
        assert_eq!(v.get(0), None);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn pushes_read_back_in_order(values in proptest::collection::vec(any::<i32>(), 0..200)) {
            let mut v = PageVec::with_config(tiny());
            for &x in &values {
                v.push(x);
            }
            prop_assert_eq!(v.len(), values.len());
            for (i, &x) in values.iter().enumerate() {
                prop_assert_eq!(v[i], x);
            }
        }

        #[test]
        fn bulk_appends_equal_pushes(
            values in proptest::collection::vec(any::<i32>(), 0..200),
            chunk in 1usize..17,
        ) {
            let mut bulk = PageVec::with_config(tiny());
            for run in values.chunks(chunk) {
                bulk.extend_from_slice(run);
            }
            let mut singles = PageVec::with_config(tiny());
            for &x in &values {
                singles.push(x);
            }
            prop_assert_eq!(bulk.len(), singles.len());
            for i in 0..bulk.len() {
                prop_assert_eq!(bulk[i], singles[i]);
            }
        }

        #[test]
        fn addresses_survive_later_appends(before in 1usize..100, after in 1usize..100) {
            let mut v = PageVec::with_config(tiny());
            for i in 0..before {
                v.push(i as u64);
            }
            let addrs: Vec<usize> = (0..before).map(|i| addr(&v[i])).collect();
            for i in 0..after {
                v.push((before + i) as u64);
            }
            for (i, &a) in addrs.iter().enumerate() {
                prop_assert_eq!(addr(&v[i]), a);
            }
        }

        #[test]
        fn length_counts_every_append(
            runs in proptest::collection::vec(
                proptest::collection::vec(any::<u8>(), 0..20),
                0..20,
            ),
        ) {
            let mut v = PageVec::with_config(tiny());
            let mut expected = 0;
            for run in &runs {
                // Alternate the two append forms on run parity.
                if run.len() % 2 == 0 {
                    v.extend_from_slice(run);
                } else {
                    for &x in run {
                        v.push(x);
                    }
                }
                expected += run.len();
            }
            prop_assert_eq!(v.len(), expected);
            prop_assert_eq!(v.is_empty(), expected == 0);
        }
    }
}
