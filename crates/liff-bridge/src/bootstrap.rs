//! Host initialization followed by attach.

use std::sync::Arc;

use liff_core::{HostSession, InitConfig};
use tracing::{error, info, instrument, warn};

use crate::dispatcher::{self, Bridge};
use crate::errors::BridgeError;
use crate::ports::{self, AppEndpoint};

/// Initialize the host, then attach a bridge to a fresh port pair.
///
/// Nothing is attached when initialization fails. The in-client check is
/// informational only; a failure there is logged and startup continues.
#[instrument(skip_all, fields(liff_id = %config.liff_id))]
pub async fn launch(
    host: Arc<dyn HostSession>,
    config: &InitConfig,
) -> Result<(Bridge, AppEndpoint), BridgeError> {
    if config.liff_id.trim().is_empty() {
        return Err(BridgeError::MissingLiffId);
    }

    if let Err(err) = host.init(config).await {
        error!(error = %err, "host initialization failed");
        return Err(BridgeError::HostInit(err));
    }

    match host.is_in_client() {
        Ok(in_client) => info!(in_client, "host initialized"),
        Err(err) => warn!(error = %err, "host initialized, in-client check failed"),
    }

    let (app, bridge_ports) = ports::channel();
    let bridge = dispatcher::attach(bridge_ports, host);
    Ok((bridge, app))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use liff_core::logging::capture_logs;
    use liff_core::{HostCall, InboundMessage, OutboundMessage, StubHost, StubHostConfig};
    use serde_json::json;
    use tracing::Level;

    fn config() -> InitConfig {
        InitConfig::new("1234567890-AbcdEfgh")
    }

    #[tokio::test]
    async fn launch_initializes_then_attaches() {
        let host = Arc::new(StubHost::default());
        let (mut bridge, mut app) = launch(host.clone(), &config()).await.unwrap();

        assert_eq!(
            host.calls()[..2],
            [HostCall::Init(config()), HostCall::IsInClient]
        );
        assert_eq!(bridge.methods().len(), 8);

        app.send(OutboundMessage::bare("getLanguage")).unwrap();
        bridge.settle().await;
        assert_eq!(
            app.drain(),
            vec![InboundMessage::new("getLanguage", json!("en"))]
        );
    }

    #[tokio::test]
    async fn blank_liff_id_is_rejected_before_init() {
        let host = Arc::new(StubHost::default());
        let result = launch(host.clone(), &InitConfig::new("  ")).await;

        assert_matches!(result, Err(BridgeError::MissingLiffId));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn init_failure_attaches_nothing() {
        let (logs, _guard) = capture_logs();
        let host = Arc::new(StubHost::default().failing("init", "invalid liffId"));
        let result = launch(host.clone(), &config()).await;

        assert_matches!(result, Err(BridgeError::HostInit(ref err)) if err.to_string().contains("invalid liffId"));
        assert_eq!(host.calls(), vec![HostCall::Init(config())]);
        assert!(logs.has_event(Level::ERROR, "host initialization failed"));
    }

    #[tokio::test]
    async fn in_client_failure_is_not_fatal() {
        let (logs, _guard) = capture_logs();
        let host = Arc::new(StubHost::default().failing("isInClient", "not ready"));
        let (mut bridge, mut app) = launch(host, &config()).await.unwrap();

        assert!(logs.has_event(Level::WARN, "in-client check failed"));
        app.send(OutboundMessage::bare("isLoggedIn")).unwrap();
        bridge.settle().await;
        assert_eq!(
            app.drain(),
            vec![InboundMessage::new("isLoggedIn", json!(true))]
        );
    }

    #[tokio::test]
    async fn outside_client_still_launches() {
        let host = Arc::new(StubHost::new(StubHostConfig {
            in_client: false,
            ..StubHostConfig::default()
        }));
        let (bridge, _app) = launch(host, &config()).await.unwrap();
        assert_eq!(bridge.pending(), 0);
    }
}
