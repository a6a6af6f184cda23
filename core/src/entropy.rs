//! Operating-system entropy collaborator
//!
//! Only consumer is the `Secure` seed source: streams that opt out of
//! reproducibility get reseeded from here at each run boundary. Everything
//! else in this crate is deterministic and never touches the OS.

use thiserror::Error;

/// An OS entropy read failed
#[derive(Debug, Error, PartialEq)]
#[error("entropy source read failed: {0}")]
pub struct EntropyError(pub String);

/// Source of non-deterministic 64-bit seeds
///
/// The registry takes this as an injected collaborator so tests can script
/// the "OS" and assert on exactly which seeds were applied.
pub trait EntropySource {
    /// Draw a fresh 64-bit value
    fn next_u64(&mut self) -> Result<u64, EntropyError>;
}

/// Entropy source backed by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn next_u64(&mut self) -> Result<u64, EntropyError> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf).map_err(|e| EntropyError(e.to_string()))?;
        Ok(u64::from_le_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_entropy_produces_values() {
        let mut entropy = OsEntropy;
        // Two draws colliding is a 2^-64 event; treat it as a failure.
        let a = entropy.next_u64().unwrap();
        let b = entropy.next_u64().unwrap();
        assert_ne!(a, b);
    }
}
