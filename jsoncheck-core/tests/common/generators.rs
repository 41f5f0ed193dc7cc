//! Stochastic content generators for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("JSONCHECK_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Run of insignificant whitespace (usually short, often empty)
    pub fn whitespace(&mut self) -> String {
        const WS: [char; 5] = [' ', ' ', '\t', '\n', '\r'];
        let len = self.geometric(0.5);
        (0..len).map(|_| WS[self.rng.gen_range(0..WS.len())]).collect()
    }

    /// Random object key
    pub fn key(&mut self) -> String {
        let len = 1 + self.geometric(0.6);
        let chars = b"abcdefghijklmnopqrstuvwxyz_";
        (0..len)
            .map(|_| chars[self.rng.gen_range(0..chars.len())] as char)
            .collect()
    }

    /// Random well-formed integer literal
    pub fn integer(&mut self) -> String {
        self.rng.gen_range(-9999..9999i32).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducibility() {
        let mut g1 = Gen::new(42);
        let mut g2 = Gen::new(42);

        for _ in 0..10 {
            assert_eq!(g1.key(), g2.key());
            assert_eq!(g1.whitespace(), g2.whitespace());
        }
    }

    #[test]
    fn test_whitespace_is_whitespace() {
        let mut gen = Gen::new(7);
        for _ in 0..100 {
            assert!(gen.whitespace().chars().all(char::is_whitespace));
        }
    }
}
