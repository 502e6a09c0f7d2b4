//! Registry key derivation.
//!
//! The registry contract indexes entries by `bytes32`; names are hashed so
//! every entry has the same key width regardless of the name's length.

use crate::hash_functions::sha3_256;
use xcb_types::LookupKey;

/// Derive the registry lookup key for a symbolic name (e.g. `"CTN"`).
pub fn derive_key(name: &str) -> LookupKey {
    derive_key_bytes(name.as_bytes())
}

/// Derive the registry lookup key for an arbitrary byte string.
pub fn derive_key_bytes(name: &[u8]) -> LookupKey {
    LookupKey::new(sha3_256(name))
}
