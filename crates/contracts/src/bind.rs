//! Address-bound contract handles.

use crate::backend::{CallMsg, ContractBackend};
use crate::context::RequestContext;
use crate::errors::{AbiError, BindError, CallError};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use xcb_types::Address;

/// Caller identity and request scope for one read-only call.
#[derive(Debug, Clone, Default)]
pub struct CallOpts {
    pub from: Option<Address>,
    pub context: RequestContext,
}

impl CallOpts {
    pub fn new(context: RequestContext) -> Self {
        Self {
            from: None,
            context,
        }
    }

    pub fn with_caller(mut self, caller: Address) -> Self {
        self.from = Some(caller);
        self
    }
}

/// A typed handle that can be bound to an address on a backend.
pub trait ContractBinding<B: ContractBackend>: Sized {
    fn bind(address: Address, backend: Arc<B>) -> Result<Self, BindError>;

    fn address(&self) -> Address;
}

/// A contract address paired with the backend used to reach it.
pub struct BoundContract<B> {
    address: Address,
    backend: Arc<B>,
}

impl<B: ContractBackend> BoundContract<B> {
    /// Bind to `address`, rejecting addresses the backend cannot serve.
    pub fn bind(address: Address, backend: Arc<B>) -> Result<Self, BindError> {
        let expected = backend.network();
        if address.network() != expected {
            return Err(BindError::NetworkMismatch {
                address,
                expected,
                actual: address.network(),
            });
        }
        if address.is_zero() {
            return Err(BindError::ZeroAddress(expected));
        }
        Ok(Self { address, backend })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Issue a read-only call and return the raw output.
    ///
    /// The backend is only reached while `opts.context` is live. Empty
    /// output from an address without code is reported as
    /// [`CallError::NoCode`].
    pub async fn call(&self, opts: &CallOpts, data: Vec<u8>) -> Result<Vec<u8>, CallError> {
        let ctx = &opts.context;
        let msg = CallMsg {
            from: opts.from,
            to: self.address,
            data,
        };

        debug!(contract = %self.address, from = ?opts.from, "issuing read-only call");
        let output = ctx.run(self.backend.call_contract(ctx, msg)).await??;

        if output.is_empty() {
            let code = ctx.run(self.backend.code_at(ctx, self.address)).await??;
            if code.is_empty() {
                return Err(CallError::NoCode {
                    address: self.address,
                });
            }
            return Err(AbiError::ShortData {
                expected: 32,
                actual: 0,
            }
            .into());
        }
        Ok(output)
    }
}

impl<B: ContractBackend> ContractBinding<B> for BoundContract<B> {
    fn bind(address: Address, backend: Arc<B>) -> Result<Self, BindError> {
        BoundContract::bind(address, backend)
    }

    fn address(&self) -> Address {
        self.address
    }
}

impl<B> Clone for BoundContract<B> {
    fn clone(&self) -> Self {
        Self {
            address: self.address,
            backend: self.backend.clone(),
        }
    }
}

impl<B> fmt::Debug for BoundContract<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundContract")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BackendError;
    use crate::testing::{MockBackend, MockReply};
    use xcb_types::Network;

    fn contract_address(byte: u8) -> Address {
        Address::new(Network::Devin, [byte; 20])
    }

    #[test]
    fn bind_rejects_foreign_network() {
        let backend = Arc::new(MockBackend::new(Network::Devin));
        let mainnet = Address::new(Network::Mainnet, [1u8; 20]);
        let err = BoundContract::bind(mainnet, backend).unwrap_err();
        assert_eq!(
            err,
            BindError::NetworkMismatch {
                address: mainnet,
                expected: Network::Devin,
                actual: Network::Mainnet,
            }
        );
    }

    #[test]
    fn bind_rejects_zero_address() {
        let backend = Arc::new(MockBackend::new(Network::Devin));
        let err = BoundContract::bind(Address::zero(Network::Devin), backend).unwrap_err();
        assert_eq!(err, BindError::ZeroAddress(Network::Devin));
    }

    #[tokio::test]
    async fn call_forwards_caller_and_data() {
        let backend = Arc::new(MockBackend::new(Network::Devin));
        let address = contract_address(1);
        backend.set_reply(address, vec![1, 2, 3], MockReply::Return(vec![9; 32]));

        let contract = BoundContract::bind(address, backend.clone()).unwrap();
        let caller = contract_address(2);
        let opts = CallOpts::new(RequestContext::background()).with_caller(caller);
        let output = contract.call(&opts, vec![1, 2, 3]).await.unwrap();

        assert_eq!(output, vec![9; 32]);
        let last = backend.last_call().unwrap();
        assert_eq!(last.from, Some(caller));
        assert_eq!(last.to, address);
    }

    #[tokio::test]
    async fn empty_output_without_code_is_no_code() {
        let backend = Arc::new(MockBackend::new(Network::Devin));
        let address = contract_address(3);
        let contract = BoundContract::bind(address, backend).unwrap();

        let err = contract
            .call(&CallOpts::default(), vec![0xaa])
            .await
            .unwrap_err();
        assert_eq!(err, CallError::NoCode { address });
    }

    #[tokio::test]
    async fn empty_output_with_code_is_abi_error() {
        let backend = Arc::new(MockBackend::new(Network::Devin));
        let address = contract_address(4);
        backend.deploy(address);
        backend.set_reply(address, vec![0xaa], MockReply::Return(Vec::new()));
        let contract = BoundContract::bind(address, backend).unwrap();

        let err = contract
            .call(&CallOpts::default(), vec![0xaa])
            .await
            .unwrap_err();
        assert!(matches!(err, CallError::Abi(AbiError::ShortData { .. })));
    }

    #[tokio::test]
    async fn backend_errors_are_classified() {
        let backend = Arc::new(MockBackend::new(Network::Devin));
        let address = contract_address(5);
        backend.set_reply(
            address,
            vec![1],
            MockReply::Fail(BackendError::Reverted {
                reason: Some("denied".into()),
            }),
        );
        backend.set_reply(
            address,
            vec![2],
            MockReply::Fail(BackendError::Transport("connection reset".into())),
        );
        let contract = BoundContract::bind(address, backend).unwrap();
        let opts = CallOpts::default();

        assert_eq!(
            contract.call(&opts, vec![1]).await.unwrap_err(),
            CallError::Reverted {
                reason: Some("denied".into())
            }
        );
        assert!(matches!(
            contract.call(&opts, vec![2]).await.unwrap_err(),
            CallError::Transport(BackendError::Transport(_))
        ));
    }
}
