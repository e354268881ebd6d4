//! Configurable in-process host.
//!
//! [`StubHost`] answers every capability from a [`StubHostConfig`] and
//! records each call it receives. Failures can be injected per capability
//! by name (`"getProfile"`, `"sendMessages"`, ...), which is how the CLI
//! harness and the test suites exercise the bridge's failure paths.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::host::{HostError, HostSession, InitConfig, OpenWindowParams, Profile, UNKNOWN};

/// Values and injected failures served by a [`StubHost`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StubHostConfig {
    /// Value for `isLoggedIn`.
    pub logged_in: bool,
    /// Value for `isInClient`.
    pub in_client: bool,
    /// Value for `getAccessToken`.
    pub access_token: Option<String>,
    /// Value for `getLanguage`.
    pub language: String,
    /// Value for `getVersion`.
    pub version: String,
    /// Value for `getProfile`; `None` makes the call reject.
    pub profile: Option<Profile>,
    /// Capability name to error message. Listed capabilities fail.
    pub failures: BTreeMap<String, String>,
    /// Delay applied before async capabilities settle.
    pub latency_ms: u64,
}

impl Default for StubHostConfig {
    fn default() -> Self {
        Self {
            logged_in: true,
            in_client: true,
            access_token: Some("stub-access-token".to_string()),
            language: "en".to_string(),
            version: "2.24.0".to_string(),
            profile: Some(Profile {
                user_id: "U0000000000".to_string(),
                display_name: "Stub User".to_string(),
                picture_url: None,
                status_message: None,
            }),
            failures: BTreeMap::new(),
            latency_ms: 0,
        }
    }
}

/// One recorded capability call.
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    /// `init`
    Init(InitConfig),
    /// `isLoggedIn`
    IsLoggedIn,
    /// `isInClient`
    IsInClient,
    /// `closeWindow`
    CloseWindow,
    /// `getAccessToken`
    GetAccessToken,
    /// `getLanguage`
    GetLanguage,
    /// `getVersion`
    GetVersion,
    /// `getProfile`
    GetProfile,
    /// `openWindow`
    OpenWindow(OpenWindowParams),
    /// `sendMessages`
    SendMessages(Vec<Value>),
}

impl HostCall {
    /// Capability name of this call.
    pub fn capability(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::IsLoggedIn => "isLoggedIn",
            Self::IsInClient => "isInClient",
            Self::CloseWindow => "closeWindow",
            Self::GetAccessToken => "getAccessToken",
            Self::GetLanguage => "getLanguage",
            Self::GetVersion => "getVersion",
            Self::GetProfile => "getProfile",
            Self::OpenWindow(_) => "openWindow",
            Self::SendMessages(_) => "sendMessages",
        }
    }
}

/// Host that serves fixed values and records every call.
#[derive(Debug, Default)]
pub struct StubHost {
    config: StubHostConfig,
    calls: Mutex<Vec<HostCall>>,
}

impl StubHost {
    /// Create a stub serving the given configuration.
    pub fn new(config: StubHostConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `capability` fail with `message`.
    #[must_use]
    pub fn failing(mut self, capability: &str, message: &str) -> Self {
        let _ = self
            .config
            .failures
            .insert(capability.to_owned(), message.to_owned());
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &StubHostConfig {
        &self.config
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Number of calls received for `capability`.
    pub fn call_count(&self, capability: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.capability() == capability)
            .count()
    }

    fn record(&self, call: HostCall) -> Result<(), HostError> {
        let capability = call.capability();
        debug!(capability, "stub host call");
        self.calls.lock().push(call);
        match self.config.failures.get(capability) {
            Some(message) => Err(HostError::sdk(UNKNOWN, message.clone())),
            None => Ok(()),
        }
    }

    async fn settle(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

#[async_trait]
impl HostSession for StubHost {
    async fn init(&self, config: &InitConfig) -> Result<(), HostError> {
        self.settle().await;
        self.record(HostCall::Init(config.clone()))
    }

    fn is_logged_in(&self) -> Result<bool, HostError> {
        self.record(HostCall::IsLoggedIn)?;
        Ok(self.config.logged_in)
    }

    fn is_in_client(&self) -> Result<bool, HostError> {
        self.record(HostCall::IsInClient)?;
        Ok(self.config.in_client)
    }

    fn close_window(&self) -> Result<(), HostError> {
        self.record(HostCall::CloseWindow)
    }

    fn get_access_token(&self) -> Result<Option<String>, HostError> {
        self.record(HostCall::GetAccessToken)?;
        Ok(self.config.access_token.clone())
    }

    fn get_language(&self) -> Result<String, HostError> {
        self.record(HostCall::GetLanguage)?;
        Ok(self.config.language.clone())
    }

    fn get_version(&self) -> Result<String, HostError> {
        self.record(HostCall::GetVersion)?;
        Ok(self.config.version.clone())
    }

    async fn get_profile(&self) -> Result<Profile, HostError> {
        self.settle().await;
        self.record(HostCall::GetProfile)?;
        self.config
            .profile
            .clone()
            .ok_or_else(|| HostError::sdk("UNAUTHORIZED", "no profile for this session"))
    }

    fn open_window(&self, params: &OpenWindowParams) -> Result<(), HostError> {
        self.record(HostCall::OpenWindow(params.clone()))
    }

    async fn send_messages(&self, messages: &[Value]) -> Result<(), HostError> {
        self.settle().await;
        self.record(HostCall::SendMessages(messages.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn defaults_serve_logged_in_session() {
        let host = StubHost::default();
        assert!(host.is_logged_in().unwrap());
        assert!(host.is_in_client().unwrap());
        assert_eq!(host.get_language().unwrap(), "en");
        assert_eq!(
            host.get_access_token().unwrap().as_deref(),
            Some("stub-access-token")
        );
    }

    #[test]
    fn records_calls_in_order() {
        let host = StubHost::default();
        let _ = host.get_version().unwrap();
        host.close_window().unwrap();
        assert_eq!(host.calls(), vec![HostCall::GetVersion, HostCall::CloseWindow]);
    }

    #[test]
    fn injected_failure_is_recorded_and_returned() {
        let host = StubHost::default().failing("isLoggedIn", "boom");
        let err = host.is_logged_in().unwrap_err();
        assert_matches!(err, HostError::Sdk { ref message, .. } if message == "boom");
        assert_eq!(host.call_count("isLoggedIn"), 1);
    }

    #[tokio::test]
    async fn send_messages_records_payload() {
        let host = StubHost::default();
        let messages = vec![json!({"type": "text", "text": "hi"})];
        host.send_messages(&messages).await.unwrap();
        assert_eq!(host.calls(), vec![HostCall::SendMessages(messages)]);
    }

    #[tokio::test]
    async fn missing_profile_rejects() {
        let host = StubHost::new(StubHostConfig {
            profile: None,
            ..StubHostConfig::default()
        });
        let err = host.get_profile().await.unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_async_calls() {
        let host = StubHost::new(StubHostConfig {
            latency_ms: 500,
            ..StubHostConfig::default()
        });
        let start = tokio::time::Instant::now();
        let _ = host.get_profile().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn config_decodes_partial_json() {
        let config: StubHostConfig = serde_json::from_value(json!({
            "loggedIn": false,
            "failures": {"sendMessages": "network error"}
        }))
        .unwrap();
        assert!(!config.logged_in);
        assert_eq!(config.language, "en");
        assert_eq!(config.failures["sendMessages"], "network error");
    }
}
