//! Contract bindings for Core blockchain clients
//!
//! Address-bound handles over a [`ContractBackend`], the ABI codec they
//! need, and typed bindings for the registry and Core Token contracts.
//! Only read-only calls are supported.

pub mod abi;
pub mod backend;
pub mod bind;
pub mod context;
pub mod core_token;
pub mod errors;
pub mod registry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::{CallMsg, ContractBackend};
pub use bind::{BoundContract, CallOpts, ContractBinding};
pub use context::RequestContext;
pub use core_token::{CoreToken, CORE_TOKEN_NAME};
pub use errors::*;
pub use registry::Registry;
