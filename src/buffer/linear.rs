//! Fixed-length value buffer with settled-position tracking
//!
//! [`LinearBuffer`] is the working state for sorts and searches: an
//! index-addressable sequence of values whose length is fixed for the
//! duration of one run, plus the set of positions already settled into
//! their final sorted place.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use super::{MAX_VALUE, MIN_VALUE};

/// An index-addressable sequence of values, mutable in place.
#[derive(Debug, Clone, Default)]
pub struct LinearBuffer {
    values: Vec<u32>,
    settled: FxHashSet<usize>,
}

impl LinearBuffer {
    /// Create a buffer from explicit values.
    pub fn from_values(values: Vec<u32>) -> Self {
        LinearBuffer {
            values,
            settled: FxHashSet::default(),
        }
    }

    /// Create a buffer of `size` random values drawn from a seeded RNG.
    ///
    /// The same seed always produces the same buffer, which is what makes
    /// restarted runs reproduce identical event sequences.
    pub fn random(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..size)
            .map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE))
            .collect();
        Self::from_values(values)
    }

    /// Like [`LinearBuffer::random`], but sorted ascending (binary search
    /// requires a pre-sorted buffer).
    pub fn random_sorted(size: usize, seed: u64) -> Self {
        let mut buf = Self::random(size, seed);
        buf.values.sort_unstable();
        buf
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Exchange two positions. Callers guarantee both are in bounds.
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    /// Store a value directly at a position. Callers guarantee bounds.
    pub(crate) fn overwrite(&mut self, index: usize, value: u32) {
        self.values[index] = value;
    }

    /// Mark a position as settled. Returns false if it already was.
    pub(crate) fn settle(&mut self, index: usize) -> bool {
        self.settled.insert(index)
    }

    pub fn is_settled(&self, index: usize) -> bool {
        self.settled.contains(&index)
    }

    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// True once every position is settled.
    pub fn fully_settled(&self) -> bool {
        self.settled.len() == self.values.len()
    }

    /// True when values are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let a = LinearBuffer::random(30, 7);
        let b = LinearBuffer::random(30, 7);
        let c = LinearBuffer::random(30, 8);
        assert_eq!(a.values(), b.values());
        assert_ne!(a.values(), c.values());
    }

    #[test]
    fn test_random_values_in_range() {
        let buf = LinearBuffer::random(100, 42);
        assert!(buf
            .values()
            .iter()
            .all(|&v| (MIN_VALUE..=MAX_VALUE).contains(&v)));
    }

    #[test]
    fn test_settle_rejects_duplicates() {
        let mut buf = LinearBuffer::from_values(vec![3, 1, 2]);
        assert!(buf.settle(1));
        assert!(!buf.settle(1));
        assert!(!buf.fully_settled());
        assert!(buf.settle(0));
        assert!(buf.settle(2));
        assert!(buf.fully_settled());
    }

    #[test]
    fn test_random_sorted() {
        let buf = LinearBuffer::random_sorted(50, 3);
        assert!(buf.is_sorted());
    }
}
