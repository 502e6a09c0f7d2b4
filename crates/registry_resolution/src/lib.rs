//! Registry Name Resolution
//!
//! Resolves a symbolic service name (e.g. the `CTN` ticker) to a contract
//! address through the on-chain registry and binds a typed client to it:
//!
//! 1. bind the registry contract
//! 2. derive the lookup key (SHA3-256 of the name)
//! 3. call `get(bytes32)` under the caller's identity and request context
//! 4. decode the returned text into an [`Address`](xcb_types::Address)
//! 5. bind the dependent client on the same backend
//!
//! The first failing step ends the resolution with its error.

pub mod errors;
pub mod resolver;
pub mod types;

pub use errors::*;
pub use resolver::*;
pub use types::*;
