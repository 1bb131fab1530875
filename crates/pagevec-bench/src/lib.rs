//! Workload builders for the pagevec benchmarks.
//!
//! Provides a representative structured element type and deterministic
//! builders so every benchmark run measures the same data.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// A structured element of the size class the container typically holds
/// (a couple of ids plus a coordinate pair — 16 bytes).
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Stable identifier.
    pub id: u32,
    /// Discriminating tag.
    pub kind: u16,
    /// Position.
    pub x: f32,
    /// Position.
    pub y: f32,
}

/// Build `n` deterministic records.
pub fn records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| Record {
            id: i as u32,
            kind: (i % 7) as u16,
            x: i as f32 * 0.5,
            y: i as f32 * 0.25,
        })
        .collect()
}
