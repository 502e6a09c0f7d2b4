//! Error types for registry resolution

use thiserror::Error;
use xcb_contracts::{BindError, CallError};
use xcb_types::AddressError;

/// The registry answered, but its value is not a usable address.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("registry value is not valid UTF-8")]
    NotUtf8,

    #[error("registry value {value:?} is not a valid address: {source}")]
    InvalidAddress {
        value: String,
        #[source]
        source: AddressError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("bind error: {0}")]
    Bind(#[from] BindError),

    #[error("registry call error: {0}")]
    Call(#[from] CallError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl ResolveError {
    /// The registry holds no entry for the requested name.
    pub fn is_not_registered(&self) -> bool {
        matches!(self, ResolveError::Call(CallError::NotRegistered { .. }))
    }

    /// The request context was cancelled or ran out of time.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Call(err) if err.is_cancelled())
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
