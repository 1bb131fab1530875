//! Append-only paged vector with address-stable elements.
//!
//! [`PageVec`] is an ordered sequence that allocates its elements from an
//! owned [`PagePool`]: storage grows in fixed-capacity pages that are never
//! reallocated or moved, so the address of an element never changes between
//! the append that created it and the vector's teardown. The price is that
//! the container is append-only — no removal, no insertion at a position,
//! no compaction (moving survivors is exactly what would break the address
//! guarantee).
//!
//! # Architecture
//!
//! ```text
//! PageVec<T> (public surface: push / extend / get / last / reserve+commit)
//! └── PagePool<T> (slot allocation, logical index → page translation)
//!     └── Page<T>[] (fixed-capacity Vec<T> buffers, allocated once)
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use pagevec::PageVec;
//!
//! let mut v = PageVec::new();
//! v.push(1);
//! v.extend_from_slice(&[2, 3]);
//! assert_eq!(v.len(), 3);
//! assert_eq!(v[0], 1);
//! assert_eq!(v.last(), Some(&3));
//! ```
//!
//! # Unsafe policy
//!
//! The crate denies `unsafe_code` except in `raw.rs`, the one module that
//! needs it: marking freshly initialised spare page capacity
//! live for the two-phase [`PageVec::reserve_uninit`] / [`PageVec::commit`]
//! escape hatch. Every unsafe operation carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod pool;
mod raw;
pub mod vec;

// Public re-exports for the primary API surface.
pub use config::PoolConfig;
pub use pool::PagePool;
pub use vec::PageVec;
