//! Host capability contract.
//!
//! [`HostSession`] is the surface the bridge consumes from the mini-app
//! runtime. Implementations are supplied from outside the bridge and are
//! already initialized by the time the dispatcher sees them; the only
//! caller of [`HostSession::init`] is the bootstrap path.
//!
//! Synchronous capabilities return `Result` because the runtime may throw
//! from any of them. Asynchronous capabilities are `async` trait methods.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error code used when the host gives no more specific one.
pub const UNKNOWN: &str = "UNKNOWN";

/// Failure reported by a host capability call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// The runtime raised or rejected with a coded error.
    #[error("[{code}] {message}")]
    Sdk {
        /// Runtime error code (e.g. `INIT_FAILED`, `UNAUTHORIZED`).
        code: String,
        /// Human-readable message.
        message: String,
    },

    /// The capability cannot be used in the current context.
    #[error("{capability} is not available: {reason}")]
    Unavailable {
        /// Capability name.
        capability: String,
        /// Why it is unavailable.
        reason: String,
    },
}

impl HostError {
    /// Build an [`HostError::Sdk`] error.
    pub fn sdk(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sdk {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Build an [`HostError::Unavailable`] error.
    pub fn unavailable(capability: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            capability: capability.into(),
            reason: reason.into(),
        }
    }

    /// Machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            Self::Sdk { code, .. } => code,
            Self::Unavailable { .. } => "UNAVAILABLE",
        }
    }
}

/// Parameters for [`HostSession::init`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitConfig {
    /// Mini-app identifier issued by the platform.
    pub liff_id: String,
}

impl InitConfig {
    /// Create an init config for the given mini-app id.
    pub fn new(liff_id: impl Into<String>) -> Self {
        Self {
            liff_id: liff_id.into(),
        }
    }
}

/// User profile returned by [`HostSession::get_profile`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Platform user id.
    pub user_id: String,
    /// Display name.
    pub display_name: String,
    /// Profile image URL, absent when the user has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    /// Status message, absent when the user has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

/// Parameters for [`HostSession::open_window`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenWindowParams {
    /// Absolute URL to open.
    pub url: String,
    /// Open in the external browser instead of the in-app browser.
    #[serde(default)]
    pub external: bool,
}

/// Capability provider backing the bridge.
///
/// The bridge never mutates a session; implementations that hold state
/// synchronize it themselves.
#[async_trait]
pub trait HostSession: Send + Sync {
    /// Initialize the runtime for a mini-app.
    async fn init(&self, config: &InitConfig) -> Result<(), HostError>;

    /// Whether the user is logged in.
    fn is_logged_in(&self) -> Result<bool, HostError>;

    /// Whether the app runs inside the messaging client.
    fn is_in_client(&self) -> Result<bool, HostError>;

    /// Close the mini-app window.
    fn close_window(&self) -> Result<(), HostError>;

    /// Current access token, `None` when the runtime has none.
    fn get_access_token(&self) -> Result<Option<String>, HostError>;

    /// Language setting of the runtime.
    fn get_language(&self) -> Result<String, HostError>;

    /// Runtime SDK version.
    fn get_version(&self) -> Result<String, HostError>;

    /// Fetch the current user's profile.
    async fn get_profile(&self) -> Result<Profile, HostError>;

    /// Open a URL in the in-app or external browser.
    fn open_window(&self, params: &OpenWindowParams) -> Result<(), HostError>;

    /// Send messages to the current chat on behalf of the user, in order.
    async fn send_messages(&self, messages: &[Value]) -> Result<(), HostError>;
}
