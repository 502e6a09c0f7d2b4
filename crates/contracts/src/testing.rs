//! In-memory [`ContractBackend`] for tests.
//!
//! Registries set up with [`MockBackend::register_name`] answer every
//! `get(bytes32)` call, returning an empty string for unknown keys the way
//! an on-chain mapping does. Other calls are answered from explicit
//! replies; a call without a reply reverts on deployed contracts and
//! returns empty output everywhere else.

use crate::abi;
use crate::backend::{CallMsg, ContractBackend};
use crate::context::RequestContext;
use crate::errors::BackendError;
use crate::registry::GET_SIGNATURE;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use xcb_crypto::derive_key;
use xcb_types::{Address, LookupKey, Network};

/// Placeholder bytecode reported for deployed mock contracts.
const MOCK_CODE: &[u8] = &[0x60, 0x80, 0x60, 0x40];

/// Scripted answer to one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Return(Vec<u8>),
    Fail(BackendError),
    /// Answer after a delay.
    Delay(Duration, Vec<u8>),
    /// Never answer.
    Hang,
}

#[derive(Debug)]
pub struct MockBackend {
    network: Network,
    deployed: RwLock<HashSet<Address>>,
    registries: RwLock<HashMap<Address, HashMap<LookupKey, Vec<u8>>>>,
    replies: RwLock<HashMap<(Address, Vec<u8>), MockReply>>,
    calls: AtomicUsize,
    last_call: RwLock<Option<CallMsg>>,
}

impl MockBackend {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            deployed: RwLock::new(HashSet::new()),
            registries: RwLock::new(HashMap::new()),
            replies: RwLock::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            last_call: RwLock::new(None),
        }
    }

    /// Mark `address` as holding contract code.
    pub fn deploy(&self, address: Address) {
        self.deployed.write().insert(address);
    }

    /// Store `value` under the key of `name` in the registry at `registry`.
    pub fn register_name(&self, registry: Address, name: &str, value: impl AsRef<[u8]>) {
        self.register_key(registry, derive_key(name), value);
    }

    pub fn register_key(&self, registry: Address, key: LookupKey, value: impl AsRef<[u8]>) {
        self.deploy(registry);
        self.registries
            .write()
            .entry(registry)
            .or_default()
            .insert(key, value.as_ref().to_vec());
    }

    /// Script the reply to an exact `(contract, calldata)` pair.
    pub fn set_reply(&self, to: Address, data: Vec<u8>, reply: MockReply) {
        self.replies.write().insert((to, data), reply);
    }

    /// Number of `call_contract` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<CallMsg> {
        self.last_call.read().clone()
    }

    fn registry_reply(&self, msg: &CallMsg) -> Option<Vec<u8>> {
        let registries = self.registries.read();
        let entries = registries.get(&msg.to)?;
        if msg.data.len() != 4 + abi::WORD || msg.data[..4] != abi::selector(GET_SIGNATURE) {
            return None;
        }
        let args = &msg.data[4..];
        let mut key = [0u8; abi::WORD];
        key.copy_from_slice(args);
        let value = entries
            .get(&LookupKey::new(key))
            .map(Vec::as_slice)
            .unwrap_or_default();
        Some(abi::encode_string(value))
    }
}

#[async_trait]
impl ContractBackend for MockBackend {
    fn network(&self) -> Network {
        self.network
    }

    async fn call_contract(
        &self,
        _ctx: &RequestContext,
        msg: CallMsg,
    ) -> Result<Vec<u8>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.write() = Some(msg.clone());

        let scripted = self.replies.read().get(&(msg.to, msg.data.clone())).cloned();
        match scripted {
            Some(MockReply::Return(output)) => Ok(output),
            Some(MockReply::Fail(err)) => Err(err),
            Some(MockReply::Delay(delay, output)) => {
                tokio::time::sleep(delay).await;
                Ok(output)
            }
            Some(MockReply::Hang) => std::future::pending().await,
            None => {
                if let Some(output) = self.registry_reply(&msg) {
                    Ok(output)
                } else if self.deployed.read().contains(&msg.to) {
                    Err(BackendError::Reverted { reason: None })
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }

    async fn code_at(
        &self,
        _ctx: &RequestContext,
        address: Address,
    ) -> Result<Vec<u8>, BackendError> {
        let deployed = self.deployed.read().contains(&address)
            || self.replies.read().keys().any(|(to, _)| *to == address);
        Ok(if deployed { MOCK_CODE.to_vec() } else { Vec::new() })
    }
}
