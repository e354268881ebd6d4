//! Bridge error types.
//!
//! [`BridgeError`] is returned to the embedder (startup and lifecycle).
//! [`HandlerError`] never leaves a handler: it is logged and discarded.

use liff_core::HostError;
use thiserror::Error;

/// Errors surfaced to the code embedding the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No mini-app id was configured.
    #[error("liffId is required to initialize the host")]
    MissingLiffId,

    /// The host failed to initialize; the bridge was not attached.
    #[error("host initialization failed: {0}")]
    HostInit(#[source] HostError),

    /// The bridge side of the ports is gone.
    #[error("bridge is no longer attached")]
    Detached,

    /// The subscription task panicked or was aborted.
    #[error("bridge subscription ended abnormally: {0}")]
    Subscription(#[from] tokio::task::JoinError),
}

/// Failure of a single handler invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The host call raised or rejected.
    #[error("{0}")]
    Host(#[from] HostError),

    /// The request payload or the host result did not fit the expected shape.
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The handler panicked; the panic was caught at dispatch.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_init_display_includes_cause() {
        let err = BridgeError::HostInit(HostError::sdk("INIT_FAILED", "bad id"));
        assert_eq!(
            err.to_string(),
            "host initialization failed: [INIT_FAILED] bad id"
        );
    }

    #[test]
    fn host_init_exposes_source() {
        use std::error::Error as _;
        let err = BridgeError::HostInit(HostError::sdk("INIT_FAILED", "bad id"));
        assert!(err.source().is_some());
    }

    #[test]
    fn handler_error_from_host_is_transparent() {
        let err: HandlerError = HostError::sdk("UNKNOWN", "network error").into();
        assert_eq!(err.to_string(), "[UNKNOWN] network error");
    }

    #[test]
    fn panicked_display_includes_message() {
        let err = HandlerError::Panicked("host exploded".into());
        assert_eq!(err.to_string(), "handler panicked: host exploded");
    }

    #[test]
    fn handler_error_from_payload() {
        let json_err = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
        let err: HandlerError = json_err.into();
        assert!(err.to_string().starts_with("malformed payload"));
    }
}
