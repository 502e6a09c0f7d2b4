//! Capability interface of the chain client the bindings run on.

use crate::context::RequestContext;
use crate::errors::BackendError;
use async_trait::async_trait;
use xcb_types::{Address, Network};

/// A read-only call message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMsg {
    /// Calling identity, if any.
    pub from: Option<Address>,
    /// Contract being called.
    pub to: Address,
    /// ABI-encoded call data.
    pub data: Vec<u8>,
}

/// Chain client able to execute read-only contract calls.
///
/// Implementations own their transport and its synchronisation; the
/// bindings only hold them behind an `Arc`.
#[async_trait]
pub trait ContractBackend: Send + Sync {
    /// Network served by this backend; addresses on other networks are not
    /// bindable.
    fn network(&self) -> Network;

    /// Execute a call against the latest state and return the raw output.
    async fn call_contract(
        &self,
        ctx: &RequestContext,
        msg: CallMsg,
    ) -> Result<Vec<u8>, BackendError>;

    /// Deployed bytecode at `address`, empty for accounts without code.
    async fn code_at(
        &self,
        ctx: &RequestContext,
        address: Address,
    ) -> Result<Vec<u8>, BackendError>;
}
