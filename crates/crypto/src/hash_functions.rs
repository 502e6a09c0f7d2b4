//! Hash functions for Core contract plumbing
//!
//! Core uses FIPS-202 SHA3-256 wherever Ethereum tooling would use legacy
//! Keccak256: registry keys, ABI method selectors.

use sha3::{Digest, Sha3_256};

/// Trait for hash functions
pub trait HashFunction {
    /// Hash input data and return a fixed-size array
    fn hash_fixed(&self, data: &[u8]) -> [u8; 32];

    /// Get the name of the hash function
    fn name(&self) -> &'static str;
}

/// SHA3-256 hash implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct SHA3_256;

impl SHA3_256 {
    pub fn new() -> Self {
        Self
    }
}

impl HashFunction for SHA3_256 {
    fn hash_fixed(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha3_256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn name(&self) -> &'static str {
        "SHA3-256"
    }
}

/// SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    SHA3_256.hash_fixed(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_known_vectors() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hex::encode(sha3_256(b"abc")),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
        assert_eq!(SHA3_256::new().name(), "SHA3-256");
    }
}
