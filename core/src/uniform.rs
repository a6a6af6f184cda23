//! Uniform random value extraction
//!
//! Wraps any [`RandomAlgorithm`] behind a single capability: "the next
//! integer with N significant bits" and "the next double in [0, 1)". The
//! bit-combination formulas here are shared by every algorithm and are part
//! of the reproducibility contract.
//!
//! CRITICAL: `next_double()` combines exactly 26 + 27 significant bits from
//! two draws. Computing it from fewer or more bits, or with a different
//! split, silently breaks cross-run reproducibility even though the output
//! still looks random.

use std::fmt;

use crate::algorithms::RandomAlgorithm;

/// Uniform random adapter over a boxed PRNG algorithm
///
/// Owns its backing algorithm; the registry hands out `&mut UniformRng` so
/// that every caller of a named stream draws from the same state.
///
/// # Example
/// ```
/// use sim_rng_core_rs::{Pcg32, UniformRng};
///
/// let mut rng = UniformRng::new(Box::new(Pcg32::new(12345)));
/// let p = rng.next_double();
/// assert!(p >= 0.0 && p < 1.0);
/// ```
pub struct UniformRng {
    algorithm: Box<dyn RandomAlgorithm>,
}

impl fmt::Debug for UniformRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformRng").finish_non_exhaustive()
    }
}

impl UniformRng {
    /// Wrap an algorithm instance
    pub fn new(algorithm: Box<dyn RandomAlgorithm>) -> Self {
        Self { algorithm }
    }

    /// Reseed the backing algorithm
    pub fn seed(&mut self, value: u64) {
        self.algorithm.seed(value);
    }

    /// Generate the next random u64 value
    pub fn next_u64(&mut self) -> u64 {
        self.algorithm.next_u64()
    }

    /// Generate a random value with `bits` significant bits, in `[0, 2^bits)`
    ///
    /// Takes the top `bits` bits of one underlying draw.
    ///
    /// # Panics
    /// Panics unless `1 <= bits <= 32`
    pub fn next_bits(&mut self, bits: u32) -> u32 {
        assert!(
            (1..=32).contains(&bits),
            "bits must be in 1..=32, got {}",
            bits
        );
        (self.algorithm.next_u64() >> (64 - bits)) as u32
    }

    /// Generate a random f64 in `[0.0, 1.0)`
    ///
    /// Combines a 26-bit and a 27-bit draw into a 53-bit mantissa, then
    /// scales by 2^-53. Uniform over representable steps of 2^-53.
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::{XorshiftRandom, UniformRng};
    ///
    /// let mut rng = UniformRng::new(Box::new(XorshiftRandom::new(12345)));
    /// let probability = rng.next_double();
    /// assert!(probability >= 0.0 && probability < 1.0);
    /// ```
    pub fn next_double(&mut self) -> f64 {
        let hi = self.next_bits(26) as u64;
        let lo = self.next_bits(27) as u64;
        ((hi << 27) | lo) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate a random value in range `[min, max)`
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::{Pcg32, UniformRng};
    ///
    /// let mut rng = UniformRng::new(Box::new(Pcg32::new(12345)));
    /// let draw = rng.range(0, 100); // [0, 100)
    /// assert!(draw >= 0 && draw < 100);
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next_u64();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Pcg32, XorshiftRandom};

    #[test]
    fn test_next_bits_within_width() {
        let mut rng = UniformRng::new(Box::new(Pcg32::new(12345)));
        for bits in 1..=31u32 {
            let value = rng.next_bits(bits);
            assert!(
                (value as u64) < (1u64 << bits),
                "next_bits({}) produced {} with too many bits",
                bits,
                value
            );
        }
        // bits = 32 uses the whole output width, any u32 is valid
        rng.next_bits(32);
    }

    #[test]
    #[should_panic(expected = "bits must be in 1..=32")]
    fn test_next_bits_zero_width_panics() {
        let mut rng = UniformRng::new(Box::new(Pcg32::new(12345)));
        rng.next_bits(0);
    }

    #[test]
    #[should_panic(expected = "bits must be in 1..=32")]
    fn test_next_bits_over_width_panics() {
        let mut rng = UniformRng::new(Box::new(Pcg32::new(12345)));
        rng.next_bits(33);
    }

    #[test]
    fn test_next_double_in_range() {
        let mut rng = UniformRng::new(Box::new(XorshiftRandom::new(12345)));
        for _ in 0..1000 {
            let val = rng.next_double();
            assert!(
                val >= 0.0 && val < 1.0,
                "next_double() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_next_double_deterministic() {
        let mut rng1 = UniformRng::new(Box::new(Pcg32::new(99999)));
        let mut rng2 = UniformRng::new(Box::new(Pcg32::new(99999)));

        for _ in 0..100 {
            assert_eq!(rng1.next_double(), rng2.next_double());
        }
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = UniformRng::new(Box::new(Pcg32::new(12345)));
        rng.range(100, 50);
    }

    #[test]
    fn test_range_single_value() {
        let mut rng = UniformRng::new(Box::new(Pcg32::new(12345)));
        assert_eq!(rng.range(5, 6), 5);
    }
}
