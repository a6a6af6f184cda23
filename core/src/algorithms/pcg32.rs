//! PCG-32 random number generator (PCG-XSH-RR 64/32)
//!
//! Minimal-state generator by Melissa E. O'Neill: a 64-bit linear
//! congruential step followed by an xorshift-high / random-rotate output
//! permutation. Passes the standard statistical batteries despite holding
//! only 128 bits of state.
//!
//! # Determinism
//!
//! Same seed → same sequence. The output permutation supplies the
//! statistical quality and must not be altered; changing it silently breaks
//! cross-run reproducibility even though the output still "looks random".
//!
//! # References
//!
//! - <https://www.pcg-random.org>
//! - <https://en.wikipedia.org/wiki/Permuted_congruential_generator>

use serde::{Deserialize, Serialize};

use crate::algorithms::RandomAlgorithm;

/// Fixed 64-bit LCG multiplier (O'Neill's constant)
const MULTIPLIER: u64 = 6364136223846793005;

/// PCG-32 generator
///
/// # Example
/// ```
/// use sim_rng_core_rs::Pcg32;
///
/// let mut rng = Pcg32::new(12345);
/// let value = rng.next_u32();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pcg32 {
    /// Internal LCG state (64-bit)
    state: u64,
    /// Per-instance stream increment, always odd
    increment: u64,
}

impl Pcg32 {
    /// Create a new PCG-32 generator with the given seed
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::Pcg32;
    ///
    /// let rng = Pcg32::new(12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: 0,
            increment: 0,
        };
        rng.seed(seed);
        rng
    }

    /// Reinitialize state and increment from a 64-bit seed
    ///
    /// The increment is forced odd, which keeps the LCG step at full period
    /// for every seed. One output is discarded to mix the seed into the
    /// state before the first draw.
    pub fn seed(&mut self, value: u64) {
        self.increment = (value << 1) | 1;
        self.state = value.wrapping_add(self.increment);
        self.next_u32();
    }

    /// Generate the next random u32 value
    ///
    /// Advances the LCG state, then permutes the *pre-advance* state:
    /// xorshift the high bits down, then rotate by the top 5 bits.
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::Pcg32;
    ///
    /// let mut rng = Pcg32::new(12345);
    /// let value = rng.next_u32();
    /// ```
    pub fn next_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(self.increment);

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Generate the next random u64 value (two u32 draws, high word first)
    pub fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    /// Get current generator state (for debugging/replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

impl Default for Pcg32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomAlgorithm for Pcg32 {
    fn seed(&mut self, value: u64) {
        Pcg32::seed(self, value)
    }

    fn next_u64(&mut self) -> u64 {
        Pcg32::next_u64(self)
    }
}
