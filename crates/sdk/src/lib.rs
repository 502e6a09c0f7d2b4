mod error;
mod rpc;

pub use crate::error::{SdkError, REVERT_ERROR_CODE};
use crate::rpc::{decode_hex, parse_network_id, CallRequest, RpcRequest, RpcResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;
use url::Url;
use xcb_contracts::{BackendError, CallMsg, ContractBackend, RequestContext};
use xcb_types::{Address, Network};

/// Block tag every read-only call is evaluated against.
const LATEST: &str = "latest";

/// JSON-RPC client for a Core node, usable as a [`ContractBackend`].
pub struct XcbClient {
    endpoint: Url,
    http: Client,
    network_id: u64,
    next_id: AtomicU64,
}

impl XcbClient {
    /// Connect to `endpoint` (e.g. `http://localhost:8545`) and detect its
    /// network.
    pub async fn dial(endpoint: impl AsRef<str>) -> Result<Self, SdkError> {
        Self::dial_with_http_client(
            endpoint,
            Client::builder().timeout(Duration::from_secs(10)).build()?,
        )
        .await
    }

    /// Use an existing reqwest client (useful for custom TLS or middleware).
    pub async fn dial_with_http_client(
        endpoint: impl AsRef<str>,
        http: Client,
    ) -> Result<Self, SdkError> {
        let mut client = Self::with_network_id(endpoint, http, 0)?;
        client.network_id = client.fetch_network_id().await?;
        debug!(
            endpoint = %client.endpoint,
            network_id = client.network_id,
            network = %client.network(),
            "connected to node"
        );
        Ok(client)
    }

    /// Build a client for a node whose network id is already known.
    pub fn with_network_id(
        endpoint: impl AsRef<str>,
        http: Client,
        network_id: u64,
    ) -> Result<Self, SdkError> {
        let endpoint = Url::parse(endpoint.as_ref())
            .map_err(|_| SdkError::InvalidEndpoint(endpoint.as_ref().to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SdkError::InvalidEndpoint(endpoint.to_string()));
        }
        Ok(Self {
            endpoint,
            http,
            network_id,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn network_id(&self) -> u64 {
        self.network_id
    }

    /// Query `net_version`.
    pub async fn fetch_network_id(&self) -> Result<u64, SdkError> {
        let version: String = self.request("net_version", Vec::<String>::new(), None).await?;
        parse_network_id(&version)
    }

    async fn request<P, R>(
        &self,
        method: &str,
        params: P,
        timeout: Option<Duration>,
    ) -> Result<R, SdkError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest::new(id, method, params);

        let mut request = self.http.post(self.endpoint.clone()).json(&body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?.error_for_status()?;
        response
            .json::<RpcResponse<R>>()
            .await?
            .into_result(method)
    }
}

#[async_trait]
impl ContractBackend for XcbClient {
    fn network(&self) -> Network {
        Network::from_network_id(self.network_id)
    }

    async fn call_contract(
        &self,
        ctx: &RequestContext,
        msg: CallMsg,
    ) -> Result<Vec<u8>, BackendError> {
        let params = (CallRequest::from(&msg), LATEST);
        let output: String = self
            .request("xcb_call", params, ctx.remaining())
            .await?;
        Ok(decode_hex(&output)?)
    }

    async fn code_at(
        &self,
        ctx: &RequestContext,
        address: Address,
    ) -> Result<Vec<u8>, BackendError> {
        let code: String = self
            .request("xcb_getCode", (address.to_hex(), LATEST), ctx.remaining())
            .await?;
        Ok(decode_hex(&code)?)
    }
}

impl std::fmt::Debug for XcbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XcbClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("network_id", &self.network_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_endpoints() {
        assert!(matches!(
            XcbClient::with_network_id("not a url", Client::new(), 1),
            Err(SdkError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            XcbClient::with_network_id("ws://localhost:8546", Client::new(), 1),
            Err(SdkError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn network_follows_network_id() {
        let mainnet = XcbClient::with_network_id("http://localhost:8545", Client::new(), 1).unwrap();
        assert_eq!(mainnet.network(), Network::Mainnet);
        let devin = XcbClient::with_network_id("http://localhost:8545", Client::new(), 3).unwrap();
        assert_eq!(devin.network(), Network::Devin);
        assert_eq!(devin.network_id(), 3);
        assert_eq!(devin.endpoint().as_str(), "http://localhost:8545/");
    }
}
