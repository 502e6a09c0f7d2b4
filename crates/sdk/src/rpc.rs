//! JSON-RPC 2.0 envelopes and Core call payloads.

use crate::error::SdkError;
use serde::{Deserialize, Serialize};
use xcb_contracts::CallMsg;

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(id: u64, method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<R> {
    pub result: Option<R>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl<R> RpcResponse<R> {
    pub fn into_result(self, method: &str) -> Result<R, SdkError> {
        if let Some(error) = self.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or_else(|| SdkError::EmptyResponse {
            method: method.to_string(),
        })
    }
}

/// Call object accepted by `xcb_call`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct CallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    pub data: String,
}

impl From<&CallMsg> for CallRequest {
    fn from(msg: &CallMsg) -> Self {
        Self {
            from: msg.from.map(|from| from.to_hex()),
            to: msg.to.to_hex(),
            data: encode_hex(&msg.data),
        }
    }
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub(crate) fn decode_hex(value: &str) -> Result<Vec<u8>, SdkError> {
    let payload = value
        .strip_prefix("0x")
        .ok_or_else(|| SdkError::parse_error(format!("missing 0x prefix: {value}")))?;
    hex::decode(payload).map_err(|e| SdkError::parse_error(format!("invalid hex data: {e}")))
}

/// `net_version` answers with a decimal string.
pub(crate) fn parse_network_id(value: &str) -> Result<u64, SdkError> {
    value
        .parse()
        .map_err(|_| SdkError::parse_error(format!("invalid network id: {value}")))
}
