use rand::rngs::ThreadRng;
use rand::Rng;

/// Source of the index used to pick one text out of a candidate list.
///
/// Implementations are only ever called with `len > 0`.
pub trait IndexSource {
    fn next_index(&mut self, len: usize) -> usize;
}

/// Uniform random selection backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomIndex<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomIndex<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomIndex<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl Default for RandomIndex<ThreadRng> {
    fn default() -> Self {
        Self::thread()
    }
}

impl<R: Rng> IndexSource for RandomIndex<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always yields the same index, clamped to the last entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl FixedIndex {
    pub fn first() -> Self {
        FixedIndex(0)
    }

    pub fn last() -> Self {
        FixedIndex(usize::MAX)
    }
}

impl IndexSource for FixedIndex {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_index_stays_in_range() {
        let mut source = RandomIndex::new(StdRng::seed_from_u64(7));
        for len in 1..50 {
            assert!(source.next_index(len) < len);
        }
    }

    #[test]
    fn test_seeded_random_index_is_deterministic() {
        let mut a = RandomIndex::new(StdRng::seed_from_u64(42));
        let mut b = RandomIndex::new(StdRng::seed_from_u64(42));
        let xs: Vec<usize> = (0..10).map(|_| a.next_index(4)).collect();
        let ys: Vec<usize> = (0..10).map(|_| b.next_index(4)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_fixed_index_clamps() {
        assert_eq!(FixedIndex::first().next_index(4), 0);
        assert_eq!(FixedIndex::last().next_index(4), 3);
        assert_eq!(FixedIndex(2).next_index(4), 2);
        assert_eq!(FixedIndex(9).next_index(1), 0);
    }
}
