//! Error types for contract bindings

use thiserror::Error;
use xcb_types::{Address, Network};

/// The backend refused to bind a contract handle to an address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("contract {address} belongs to {actual}, backend serves {expected}")]
    NetworkMismatch {
        address: Address,
        expected: Network,
        actual: Network,
    },

    #[error("cannot bind a contract at the zero address on {0}")]
    ZeroAddress(Network),
}

/// Why a request context stopped a call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("context cancelled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Failure reported by a [`ContractBackend`](crate::ContractBackend).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("execution reverted: {}", .reason.as_deref().unwrap_or("no reason"))]
    Reverted { reason: Option<String> },
}

/// Malformed ABI-encoded return data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("return data too short: need {expected} bytes, got {actual}")]
    ShortData { expected: usize, actual: usize },

    #[error("invalid offset or length word at byte {0}")]
    InvalidWord(usize),

    #[error("value does not fit in {0}")]
    Overflow(&'static str),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

/// A read-only contract call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("call cancelled")]
    Cancelled,

    #[error("call deadline exceeded")]
    DeadlineExceeded,

    #[error("no contract code at {address}")]
    NoCode { address: Address },

    #[error("execution reverted: {}", .reason.as_deref().unwrap_or("no reason"))]
    Reverted { reason: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[source] BackendError),

    #[error("cannot unpack return data: {0}")]
    Abi(#[from] AbiError),

    #[error("name not registered: {name}")]
    NotRegistered { name: String },
}

impl CallError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CallError::Cancelled | CallError::DeadlineExceeded)
    }
}

impl From<ContextError> for CallError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => CallError::Cancelled,
            ContextError::DeadlineExceeded => CallError::DeadlineExceeded,
        }
    }
}

impl From<BackendError> for CallError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Reverted { reason } => CallError::Reverted { reason },
            other => CallError::Transport(other),
        }
    }
}

pub type Result<T, E = CallError> = std::result::Result<T, E>;
