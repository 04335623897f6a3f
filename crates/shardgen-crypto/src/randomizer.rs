use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bounded integer source used to pick how many validators one owner gets.
pub trait IntRandomizer: Send {
    /// Returns a value in `[0, n)`; `0` when `n == 0`.
    fn intn(&mut self, n: usize) -> usize;
}

/// `StdRng`-backed randomizer. A fixed seed makes owner grouping
/// reproducible across runs.
#[derive(Debug, Clone)]
pub struct SeededRandomizer {
    rng: StdRng,
}

impl SeededRandomizer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl IntRandomizer for SeededRandomizer {
    fn intn(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }
}

/// Randomizer for strategies that never group validators.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRandomizer;

impl IntRandomizer for DisabledRandomizer {
    fn intn(&mut self, _n: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_range() {
        let mut r = SeededRandomizer::new(Some(7));
        for _ in 0..1000 {
            assert!(r.intn(5) < 5);
        }
        assert_eq!(r.intn(0), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandomizer::new(Some(42));
        let mut b = SeededRandomizer::new(Some(42));
        let xs: Vec<_> = (0..32).map(|_| a.intn(100)).collect();
        let ys: Vec<_> = (0..32).map(|_| b.intn(100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn disabled_is_zero() {
        assert_eq!(DisabledRandomizer.intn(10), 0);
    }
}
