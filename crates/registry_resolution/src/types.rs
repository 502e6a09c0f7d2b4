//! Types for registry resolution

use serde::Serialize;
use xcb_types::{Address, LookupKey};

/// Outcome of looking a name up in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The symbolic name that was looked up (e.g. `"CTN"`)
    pub name: String,
    /// Registry key derived from the name
    pub key: LookupKey,
    /// Registry contract that answered
    pub registry: Address,
    /// Address stored under the key
    pub address: Address,
}
