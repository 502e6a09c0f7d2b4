//! Cryptographic primitives for Core registry resolution
//!
//! Hashing and the name → registry key derivation.

pub mod hash_functions;
pub mod key_derivation;

pub use hash_functions::{sha3_256, HashFunction, SHA3_256};
pub use key_derivation::{derive_key, derive_key_bytes};
