use thiserror::Error;
use xcb_contracts::BackendError;

/// JSON-RPC error code nodes use for reverted calls.
pub const REVERT_ERROR_CODE: i64 = 3;

const REVERT_MESSAGE: &str = "execution reverted";

/// Errors that can occur when communicating with a Core node.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("{method} returned neither result nor error")]
    EmptyResponse { method: String },
    #[error("parse error: {0}")]
    Parse(String),
}

impl SdkError {
    pub(crate) fn parse_error(msg: impl Into<String>) -> Self {
        SdkError::Parse(msg.into())
    }

    /// Whether the node reported that the call reverted.
    pub fn is_revert(&self) -> bool {
        match self {
            SdkError::Rpc { code, message } => {
                *code == REVERT_ERROR_CODE || message.starts_with(REVERT_MESSAGE)
            }
            _ => false,
        }
    }
}

impl From<SdkError> for BackendError {
    fn from(err: SdkError) -> Self {
        if err.is_revert() {
            let reason = match &err {
                SdkError::Rpc { message, .. } => message
                    .strip_prefix(REVERT_MESSAGE)
                    .and_then(|rest| rest.strip_prefix(": "))
                    .map(str::to_string),
                _ => None,
            };
            return BackendError::Reverted { reason };
        }
        match err {
            SdkError::Rpc { code, message } => BackendError::Rpc { code, message },
            other => BackendError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_with_reason() {
        let err = SdkError::Rpc {
            code: REVERT_ERROR_CODE,
            message: "execution reverted: not owner".into(),
        };
        assert_eq!(
            BackendError::from(err),
            BackendError::Reverted {
                reason: Some("not owner".into())
            }
        );
    }

    #[test]
    fn revert_without_reason() {
        let err = SdkError::Rpc {
            code: -32000,
            message: "execution reverted".into(),
        };
        assert_eq!(
            BackendError::from(err),
            BackendError::Reverted { reason: None }
        );
    }

    #[test]
    fn other_errors_pass_through() {
        let err = SdkError::Rpc {
            code: -32601,
            message: "method not found".into(),
        };
        assert_eq!(
            BackendError::from(err),
            BackendError::Rpc {
                code: -32601,
                message: "method not found".into()
            }
        );

        let parse = SdkError::parse_error("bad hex");
        assert_eq!(
            BackendError::from(parse),
            BackendError::Transport("parse error: bad hex".into())
        );
    }
}
