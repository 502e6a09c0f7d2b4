//! Core types shared across the registry resolution crates.
//!
//! - [`Address`]: 22-byte ICAN-checksummed Core address and its text codec
//! - [`LookupKey`]: 32-byte registry index derived from a symbolic name

pub mod address;
pub mod lookup_key;

#[cfg(test)]
mod tests;

pub use address::*;
pub use lookup_key::*;
