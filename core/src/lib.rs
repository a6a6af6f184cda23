//! Simulation RNG Core - deterministic random stream registry
//!
//! A registry of independently-seeded, named random number streams for
//! reproducible simulations. Each model subsystem (demography, environment,
//! observation error, ...) draws from its own stream, and a single
//! `reset_all()` call reseeds every opted-in stream at a run boundary.
//!
//! # Architecture
//!
//! - **algorithms**: PRNG algorithms (PCG-32, xorshift64) behind one trait
//! - **uniform**: Algorithm-agnostic bit/double extraction
//! - **entropy**: OS entropy collaborator for non-reproducible seeding
//! - **registry**: Named stream table with reset/reseed policies
//!
//! # Critical Invariants
//!
//! 1. Same configuration → bit-identical sequences across executions
//! 2. Streams reseeded from the seed table never share a seed
//! 3. None of the generators are cryptographically secure

// Module declarations
pub mod algorithms;
pub mod entropy;
pub mod registry;
pub mod uniform;

// Re-exports for convenience
pub use algorithms::{Pcg32, RandomAlgorithm, XorshiftRandom};
pub use entropy::{EntropyError, EntropySource, OsEntropy};
pub use registry::{
    AlgorithmConfig, RegistryError, ResetPolicy, RngRegistry, SeedSource, StreamConfig,
};
pub use uniform::UniformRng;
