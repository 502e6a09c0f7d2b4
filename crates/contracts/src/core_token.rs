//! Read-only binding for the Core Token contract.

use crate::abi::{self, Token};
use crate::backend::ContractBackend;
use crate::bind::{BoundContract, CallOpts, ContractBinding};
use crate::errors::{BindError, CallError};
use num_bigint::BigUint;
use std::sync::Arc;
use xcb_types::Address;

/// Registry name under which the Core Token is published.
pub const CORE_TOKEN_NAME: &str = "CTN";

pub struct CoreToken<B> {
    contract: BoundContract<B>,
}

impl<B: ContractBackend> CoreToken<B> {
    pub fn new(address: Address, backend: Arc<B>) -> Result<Self, BindError> {
        Ok(Self {
            contract: BoundContract::bind(address, backend)?,
        })
    }

    pub async fn symbol(&self, opts: &CallOpts) -> Result<String, CallError> {
        let output = self
            .contract
            .call(opts, abi::encode_call("symbol()", &[]))
            .await?;
        Ok(abi::decode_string(&output)?)
    }

    pub async fn decimals(&self, opts: &CallOpts) -> Result<u8, CallError> {
        let output = self
            .contract
            .call(opts, abi::encode_call("decimals()", &[]))
            .await?;
        Ok(abi::decode_u8(&output)?)
    }

    pub async fn balance_of(&self, opts: &CallOpts, owner: Address) -> Result<BigUint, CallError> {
        let data = abi::encode_call("balanceOf(address)", &[Token::Address(owner)]);
        let output = self.contract.call(opts, data).await?;
        Ok(abi::decode_uint(&output)?)
    }

    pub fn contract(&self) -> &BoundContract<B> {
        &self.contract
    }
}

impl<B: ContractBackend> ContractBinding<B> for CoreToken<B> {
    fn bind(address: Address, backend: Arc<B>) -> Result<Self, BindError> {
        CoreToken::new(address, backend)
    }

    fn address(&self) -> Address {
        self.contract.address()
    }
}

impl<B> Clone for CoreToken<B> {
    fn clone(&self) -> Self {
        Self {
            contract: self.contract.clone(),
        }
    }
}

impl<B> std::fmt::Debug for CoreToken<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CoreToken").field(&self.contract).finish()
    }
}
