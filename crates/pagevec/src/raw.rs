//! Bounded unsafe primitives for the page pool.
//!
//! The single module in the crate permitted to contain `unsafe` code. It
//! holds the one operation safe Rust cannot express: marking freshly
//! initialised spare capacity of a page live, for the two-phase
//! reserve/commit escape hatch.

#![allow(unsafe_code)]

/// Mark the first `n` spare slots of `slots` as live elements.
///
/// # Safety
///
/// The caller must guarantee that:
///
/// - `n <= slots.capacity() - slots.len()`, and
/// - the first `n` slots of `slots.spare_capacity_mut()` hold fully
///   initialised `T` values, written since the last mutation of `slots`.
pub(crate) unsafe fn set_live<T>(slots: &mut Vec<T>, n: usize) {
    debug_assert!(n <= slots.capacity() - slots.len());
    let new_len = slots.len() + n;
    // SAFETY: the caller guarantees the first `n` spare slots hold valid
    // `T` values and that `new_len` stays within the allocated capacity.
    unsafe { slots.set_len(new_len) };
}
