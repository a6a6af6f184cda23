//! Generator registry
//!
//! A named table of independently-seeded random streams. Configuration
//! registers each stream once (name, algorithm, initial seed, reset policy,
//! seed source); consumers look streams up by name and draw from them; at
//! each run boundary one `reset_all()` call reseeds every stream that opted
//! in, each according to its own seed source.
//!
//! The registry is an explicit value, constructed per simulation run and
//! passed to whatever needs generator access. It is not a global: each test
//! builds its own, and nothing here synchronizes; concurrent use requires
//! an external lock.
//!
//! # Critical Invariants
//!
//! 1. Reseeding walks streams in registration order, so identically
//!    configured registries replay identically
//! 2. No two `Table`-sourced reseeds ever observe the same seed (the table
//!    cursor is shared and only moves forward)
//! 3. Duplicate stream names are rejected at registration, never replaced

mod seed_table;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithms::{Pcg32, RandomAlgorithm, XorshiftRandom};
use crate::entropy::{EntropyError, EntropySource, OsEntropy};
use crate::uniform::UniformRng;

use seed_table::table_seed;

/// When a stream is reseeded by `reset_all()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetPolicy {
    /// Reseed on every registry-wide reset call
    OnRunStart,

    /// Reset calls are no-ops; the stream runs continuously for the whole
    /// process lifetime
    Never,
}

/// Where a stream's reseed value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedSource {
    /// Always reseed to the fixed seed 0
    Zero,

    /// Reseed from the OS entropy source (non-reproducible by design)
    Secure,

    /// Reseed from the fixed decorrelation table; deterministic, and no two
    /// table reseeds ever share a value
    Table,
}

/// Errors from registry operations
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("no stream registered under name '{name}'")]
    StreamNotFound { name: String },

    #[error("a stream named '{name}' is already registered")]
    DuplicateStream { name: String },

    /// Taxonomy slot for host algorithms that reject degenerate seeds;
    /// neither bundled algorithm ever returns this.
    #[error("seed {value:#018x} rejected: {reason}")]
    InvalidSeed { value: u64, reason: String },

    #[error("invalid stream config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

/// Algorithm selection for a configured stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmConfig {
    /// PCG-32 (stronger statistics, 32-bit native output)
    Pcg32,

    /// xorshift64 (faster, 64-bit native output)
    Xorshift,
}

impl AlgorithmConfig {
    fn build(self) -> Box<dyn RandomAlgorithm> {
        match self {
            AlgorithmConfig::Pcg32 => Box::new(Pcg32::new(0)),
            AlgorithmConfig::Xorshift => Box::new(XorshiftRandom::new(0)),
        }
    }
}

/// Declarative configuration for one stream
///
/// # Example
/// ```
/// use sim_rng_core_rs::StreamConfig;
///
/// let config: StreamConfig = serde_json::from_str(
///     r#"{
///         "name": "demography",
///         "algorithm": "Pcg32",
///         "seed": 42,
///         "reset_policy": "OnRunStart",
///         "seed_source": "Table"
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(config.name, "demography");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Unique stream name
    pub name: String,

    /// Backing algorithm
    pub algorithm: AlgorithmConfig,

    /// Initial seed applied at registration
    pub seed: u64,

    /// Reset policy
    pub reset_policy: ResetPolicy,

    /// Seed source consulted by `reset_all()`
    pub seed_source: SeedSource,
}

/// One registered stream
#[derive(Debug)]
struct StreamEntry {
    name: String,
    rng: UniformRng,
    reset_policy: ResetPolicy,
    seed_source: SeedSource,
    /// How many times `reset_all()` has reseeded this stream
    reseed_count: u64,
}

/// Registry of named random streams
///
/// Owns every stream's generator; callers only ever hold the `&mut`
/// reference returned by [`lookup`](RngRegistry::lookup).
///
/// # Example
/// ```
/// use sim_rng_core_rs::{Pcg32, ResetPolicy, RngRegistry, SeedSource};
///
/// let mut registry = RngRegistry::new();
/// registry
///     .register(
///         "demography",
///         Box::new(Pcg32::new(0)),
///         42,
///         ResetPolicy::OnRunStart,
///         SeedSource::Table,
///     )
///     .unwrap();
///
/// registry.reset_all().unwrap();
/// let draw = registry.lookup("demography").unwrap().next_double();
/// assert!(draw >= 0.0 && draw < 1.0);
/// ```
pub struct RngRegistry {
    /// Streams in registration order; `reset_all` must walk a stable order
    entries: Vec<StreamEntry>,

    /// Stream name → index into `entries`
    index: HashMap<String, usize>,

    /// Next unused position in the decorrelation seed table, shared by all
    /// `Table`-sourced streams
    table_cursor: u64,

    /// Injected OS entropy collaborator (`Secure` streams only)
    entropy: Box<dyn EntropySource>,
}

impl fmt::Debug for RngRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RngRegistry")
            .field("entries", &self.entries)
            .field("index", &self.index)
            .field("table_cursor", &self.table_cursor)
            .finish_non_exhaustive()
    }
}

impl RngRegistry {
    /// Create an empty registry backed by OS entropy
    pub fn new() -> Self {
        Self::with_entropy(Box::new(OsEntropy))
    }

    /// Create an empty registry with an injected entropy source
    ///
    /// Tests script the entropy source to make `Secure` reseeds observable.
    pub fn with_entropy(entropy: Box<dyn EntropySource>) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            table_cursor: 0,
            entropy,
        }
    }

    /// Build a registry from a JSON array of stream configs
    ///
    /// # Example
    /// ```
    /// use sim_rng_core_rs::RngRegistry;
    ///
    /// let registry = RngRegistry::from_json(
    ///     r#"[{
    ///         "name": "environment",
    ///         "algorithm": "Xorshift",
    ///         "seed": 7,
    ///         "reset_policy": "OnRunStart",
    ///         "seed_source": "Zero"
    ///     }]"#,
    /// )
    /// .unwrap();
    /// assert!(registry.contains("environment"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let configs: Vec<StreamConfig> =
            serde_json::from_str(json).map_err(|e| RegistryError::InvalidConfig(e.to_string()))?;
        let mut registry = Self::new();
        registry.register_from_configs(&configs)?;
        Ok(registry)
    }

    /// Register every stream in `configs`, in order
    pub fn register_from_configs(&mut self, configs: &[StreamConfig]) -> Result<(), RegistryError> {
        for config in configs {
            self.register(
                config.name.clone(),
                config.algorithm.build(),
                config.seed,
                config.reset_policy,
                config.seed_source,
            )?;
        }
        Ok(())
    }

    /// Register a named stream
    ///
    /// The algorithm is seeded with `initial_seed` immediately.
    ///
    /// # Returns
    /// * `Err(RegistryError::DuplicateStream)` - `name` is already taken;
    ///   the existing stream is left untouched
    pub fn register(
        &mut self,
        name: impl Into<String>,
        algorithm: Box<dyn RandomAlgorithm>,
        initial_seed: u64,
        reset_policy: ResetPolicy,
        seed_source: SeedSource,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateStream { name });
        }

        let mut rng = UniformRng::new(algorithm);
        rng.seed(initial_seed);

        log::debug!(
            "registered stream '{}' (seed {:#x}, {:?}, {:?})",
            name,
            initial_seed,
            reset_policy,
            seed_source
        );

        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(StreamEntry {
            name,
            rng,
            reset_policy,
            seed_source,
            reseed_count: 0,
        });
        Ok(())
    }

    /// Look up a stream by name
    ///
    /// Two calls with the same name address the same mutable stream.
    ///
    /// # Returns
    /// * `Err(RegistryError::StreamNotFound)` - `name` was never registered
    pub fn lookup(&mut self, name: &str) -> Result<&mut UniformRng, RegistryError> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| RegistryError::StreamNotFound {
                name: name.to_string(),
            })?;
        Ok(&mut self.entries[idx].rng)
    }

    /// Reseed every `OnRunStart` stream at a run boundary
    ///
    /// Streams are visited in registration order. `Zero` streams get seed 0,
    /// `Secure` streams get a fresh entropy draw, `Table` streams get the
    /// next unused table constant. `Never` streams are untouched.
    ///
    /// # Returns
    /// * `Err(RegistryError::Entropy)` - an entropy read failed; the pass
    ///   stops at that stream and later streams keep their state (fail-fast,
    ///   not best-effort)
    pub fn reset_all(&mut self) -> Result<(), RegistryError> {
        for entry in &mut self.entries {
            if entry.reset_policy != ResetPolicy::OnRunStart {
                continue;
            }

            let seed = match entry.seed_source {
                SeedSource::Zero => 0,
                SeedSource::Secure => self.entropy.next_u64()?,
                SeedSource::Table => {
                    let seed = table_seed(self.table_cursor);
                    self.table_cursor += 1;
                    seed
                }
            };

            entry.rng.seed(seed);
            entry.reseed_count += 1;
            log::debug!(
                "reseeded stream '{}' from {:?} (reseed #{})",
                entry.name,
                entry.seed_source,
                entry.reseed_count
            );
        }
        Ok(())
    }

    /// Number of registered streams
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no streams are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if a stream with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Stream names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// How many times `reset_all()` has reseeded the named stream
    pub fn reseed_count(&self, name: &str) -> Option<u64> {
        let idx = *self.index.get(name)?;
        Some(self.entries[idx].reseed_count)
    }
}

impl Default for RngRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_stream(name: &str, seed_source: SeedSource) -> RngRegistry {
        let mut registry = RngRegistry::new();
        registry
            .register(
                name,
                Box::new(Pcg32::new(0)),
                12345,
                ResetPolicy::OnRunStart,
                seed_source,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = registry_with_stream("demography", SeedSource::Zero);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("demography"));
        registry.lookup("demography").unwrap().next_double();
    }

    #[test]
    fn test_lookup_unregistered_name() {
        let mut registry = RngRegistry::new();
        let err = registry.lookup("nonexistent").unwrap_err();
        assert_eq!(
            err,
            RegistryError::StreamNotFound {
                name: "nonexistent".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_registration_fails_fast() {
        let mut registry = registry_with_stream("demography", SeedSource::Zero);
        let err = registry
            .register(
                "demography",
                Box::new(XorshiftRandom::new(0)),
                999,
                ResetPolicy::Never,
                SeedSource::Secure,
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateStream {
                name: "demography".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut registry = RngRegistry::new();
        for name in ["c", "a", "b"] {
            registry
                .register(
                    name,
                    Box::new(Pcg32::new(0)),
                    1,
                    ResetPolicy::OnRunStart,
                    SeedSource::Table,
                )
                .unwrap();
        }
        assert_eq!(registry.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reseed_count_tracks_resets() {
        let mut registry = registry_with_stream("demography", SeedSource::Zero);
        assert_eq!(registry.reseed_count("demography"), Some(0));

        registry.reset_all().unwrap();
        registry.reset_all().unwrap();
        assert_eq!(registry.reseed_count("demography"), Some(2));
        assert_eq!(registry.reseed_count("nonexistent"), None);
    }
}
