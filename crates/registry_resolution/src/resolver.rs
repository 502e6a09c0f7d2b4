//! Registry resolver implementation

use crate::errors::*;
use crate::types::Resolution;
use std::sync::Arc;
use tracing::{debug, instrument};
use xcb_contracts::{
    CallError, CallOpts, ContractBackend, ContractBinding, CoreToken, Registry, RequestContext,
    CORE_TOKEN_NAME,
};
use xcb_crypto::derive_key;
use xcb_types::{decode_address, Address};

/// Resolve `name` through the registry at `registry_address` and bind a
/// `C` client to the result.
///
/// `caller` is the identity the lookup is made as; `ctx` bounds the lookup
/// call. Nothing is retried or cached.
pub async fn resolve<B, C>(
    ctx: &RequestContext,
    registry_address: Address,
    backend: Arc<B>,
    caller: Address,
    name: &str,
) -> Result<C>
where
    B: ContractBackend,
    C: ContractBinding<B>,
{
    let resolution = resolve_address(ctx, registry_address, backend.clone(), caller, name).await?;
    let client = C::bind(resolution.address, backend)?;
    debug!(name, address = %resolution.address, "bound resolved contract");
    Ok(client)
}

/// Look `name` up in the registry and decode the stored address, without
/// binding a client to it.
#[instrument(skip_all, fields(registry = %registry_address, caller = %caller, name = %name))]
pub async fn resolve_address<B: ContractBackend>(
    ctx: &RequestContext,
    registry_address: Address,
    backend: Arc<B>,
    caller: Address,
    name: &str,
) -> Result<Resolution> {
    let registry = Registry::new(registry_address, backend)?;

    let key = derive_key(name);
    debug!(%key, "derived registry key");

    let opts = CallOpts::new(ctx.clone()).with_caller(caller);
    let raw = registry.get(&opts, key).await?;
    if raw.is_empty() {
        return Err(CallError::NotRegistered {
            name: name.to_string(),
        }
        .into());
    }

    let value = String::from_utf8(raw).map_err(|_| DecodeError::NotUtf8)?;
    let address = decode_address(&value)
        .map_err(|source| DecodeError::InvalidAddress { value, source })?;
    debug!(%address, "registry entry decoded");

    Ok(Resolution {
        name: name.to_string(),
        key,
        registry: registry_address,
        address,
    })
}

/// Resolve the Core Token contract through the registry.
pub async fn get_core_token<B: ContractBackend>(
    ctx: &RequestContext,
    registry_address: Address,
    backend: Arc<B>,
    owner: Address,
) -> Result<CoreToken<B>> {
    resolve(ctx, registry_address, backend, owner, CORE_TOKEN_NAME).await
}

/// A registry location paired with a backend, for repeated lookups.
pub struct RegistryResolver<B> {
    registry_address: Address,
    backend: Arc<B>,
}

impl<B: ContractBackend> RegistryResolver<B> {
    pub fn new(registry_address: Address, backend: Arc<B>) -> Self {
        Self {
            registry_address,
            backend,
        }
    }

    pub fn registry_address(&self) -> Address {
        self.registry_address
    }

    pub async fn resolve<C: ContractBinding<B>>(
        &self,
        ctx: &RequestContext,
        caller: Address,
        name: &str,
    ) -> Result<C> {
        resolve(ctx, self.registry_address, self.backend.clone(), caller, name).await
    }

    pub async fn resolve_address(
        &self,
        ctx: &RequestContext,
        caller: Address,
        name: &str,
    ) -> Result<Resolution> {
        resolve_address(ctx, self.registry_address, self.backend.clone(), caller, name).await
    }
}

impl<B> Clone for RegistryResolver<B> {
    fn clone(&self) -> Self {
        Self {
            registry_address: self.registry_address,
            backend: self.backend.clone(),
        }
    }
}
