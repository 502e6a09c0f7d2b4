//! Binding for the well-known registry contract.

use crate::abi::{self, Token};
use crate::backend::ContractBackend;
use crate::bind::{BoundContract, CallOpts, ContractBinding};
use crate::errors::{BindError, CallError};
use std::sync::Arc;
use xcb_types::{Address, LookupKey};

/// `get(bytes32) returns (string)`
pub const GET_SIGNATURE: &str = "get(bytes32)";

/// On-chain key → address-string mapping.
pub struct Registry<B> {
    contract: BoundContract<B>,
}

impl<B: ContractBackend> Registry<B> {
    pub fn new(address: Address, backend: Arc<B>) -> Result<Self, BindError> {
        Ok(Self {
            contract: BoundContract::bind(address, backend)?,
        })
    }

    /// Call `get(key)` and return the stored value as raw bytes.
    ///
    /// The registry stores textual addresses; interpreting them is left to
    /// the caller.
    pub async fn get(&self, opts: &CallOpts, key: LookupKey) -> Result<Vec<u8>, CallError> {
        let data = abi::encode_call(GET_SIGNATURE, &[Token::FixedBytes32(*key.as_bytes())]);
        let output = self.contract.call(opts, data).await?;
        Ok(abi::decode_bytes(&output)?)
    }

    pub fn contract(&self) -> &BoundContract<B> {
        &self.contract
    }
}

impl<B: ContractBackend> ContractBinding<B> for Registry<B> {
    fn bind(address: Address, backend: Arc<B>) -> Result<Self, BindError> {
        Registry::new(address, backend)
    }

    fn address(&self) -> Address {
        self.contract.address()
    }
}

impl<B> Clone for Registry<B> {
    fn clone(&self) -> Self {
        Self {
            contract: self.contract.clone(),
        }
    }
}

impl<B> std::fmt::Debug for Registry<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Registry").field(&self.contract).finish()
    }
}
