//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs, to_dense, to_sprs};

/// Cumulative sum of slot counts, doubling the counts as write cursors
///
/// Writes `p[i] = c[0] + .. + c[i - 1]` for every `i` in `0..=c.len()` and
/// then overwrites `c[i]` with `p[i]`, so a following fill pass can use `c`
/// as the next free position of each slot. Returns the total count.
///
/// # Panics
///
/// Panics if `p.len() != c.len() + 1`.
pub fn cumsum(p: &mut [usize], c: &mut [usize]) -> usize {
    assert_eq!(p.len(), c.len() + 1, "p.len() must be c.len() + 1");

    let mut nz = 0;
    for (slot, count) in p.iter_mut().zip(c.iter_mut()) {
        *slot = nz;
        nz += *count;
        *count = *slot;
    }
    p[c.len()] = nz;

    nz
}
