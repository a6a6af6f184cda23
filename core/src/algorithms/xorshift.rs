//! xorshift64 random number generator
//!
//! Marsaglia's 64-bit xorshift with the conventional 13/7/17 shift triple.
//! Faster and simpler than PCG-32, with weaker (but still good) statistical
//! quality.
//!
//! # Determinism
//!
//! Same seed → same sequence.
//!
//! CRITICAL: the all-zero state is a fixed point of xorshift: once zero,
//! every subsequent draw would be zero. A zero seed is therefore remapped to
//! a fixed mixing constant before it becomes the internal state.

use serde::{Deserialize, Serialize};

use crate::algorithms::RandomAlgorithm;

/// Replacement state for a zero seed (golden-ratio constant, 2^64 / phi)
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// xorshift64 generator
///
/// # Example
/// ```
/// use sim_rng_core_rs::XorshiftRandom;
///
/// let mut rng = XorshiftRandom::new(12345);
/// let value = rng.next_u64();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XorshiftRandom {
    /// Internal state (64-bit), never zero
    state: u64,
}

impl XorshiftRandom {
    /// Create a new xorshift generator with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.seed(seed);
        rng
    }

    /// Reinitialize state from a 64-bit seed
    ///
    /// A seed of exactly zero is remapped to the golden-ratio constant; any
    /// other seed is adopted directly.
    pub fn seed(&mut self, value: u64) {
        self.state = if value == 0 { SEED_MIX } else { value };
    }

    /// Generate the next random u64 value
    ///
    /// Three xorshifts (13 left, 7 right, 17 left) on the unsigned 64-bit
    /// state; the resulting state is the output.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Get current generator state (for debugging/replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

impl Default for XorshiftRandom {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomAlgorithm for XorshiftRandom {
    fn seed(&mut self, value: u64) {
        XorshiftRandom::seed(self, value)
    }

    fn next_u64(&mut self) -> u64 {
        XorshiftRandom::next_u64(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = XorshiftRandom::new(0);
        assert_ne!(rng.get_state(), 0, "zero seed must not become zero state");
    }

    #[test]
    fn test_first_draw_after_zero_seed_nonzero() {
        let mut rng = XorshiftRandom::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn test_state_never_settles_at_zero() {
        let mut rng = XorshiftRandom::new(0xDEAD_BEEF);
        for _ in 0..10_000 {
            rng.next_u64();
            assert_ne!(rng.get_state(), 0, "xorshift state reached the fixed point");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut rng1 = XorshiftRandom::new(99999);
        let mut rng2 = XorshiftRandom::new(99999);

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64(), "xorshift not deterministic!");
        }
    }
}
