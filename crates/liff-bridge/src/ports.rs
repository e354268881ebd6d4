//! Channel pair connecting the application and the bridge.
//!
//! The application holds an [`AppEndpoint`]: it sends [`OutboundMessage`]s
//! and receives [`InboundMessage`]s. The bridge holds the matching
//! [`BridgePorts`]. Both directions are unbounded, so every send is a
//! single non-blocking operation.
//!
//! Each queued outbound message carries a task-tracker token until the
//! dispatcher has handled it, which lets [`Bridge::settle`] account for
//! messages that are queued but not yet dispatched.
//!
//! [`Bridge::settle`]: crate::dispatcher::Bridge::settle

use liff_core::{InboundMessage, OutboundMessage};
use tokio::sync::mpsc;
use tokio_util::task::TaskTracker;
use tokio_util::task::task_tracker::TaskTrackerToken;
use tracing::debug;

use crate::errors::BridgeError;

/// An outbound message waiting for the dispatcher.
pub(crate) struct Queued {
    pub(crate) message: OutboundMessage,
    pub(crate) _token: TaskTrackerToken,
}

/// Create a connected application/bridge port pair.
pub fn channel() -> (AppEndpoint, BridgePorts) {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let tasks = TaskTracker::new();

    let app = AppEndpoint {
        outbound: OutboundSender {
            tx: outbound_tx,
            tasks: tasks.clone(),
        },
        inbound: inbound_rx,
    };
    let bridge = BridgePorts {
        outbound: outbound_rx,
        inbound: InboundPort { tx: inbound_tx },
        tasks,
    };
    (app, bridge)
}

/// Application side of the ports.
#[derive(Debug)]
pub struct AppEndpoint {
    outbound: OutboundSender,
    inbound: mpsc::UnboundedReceiver<InboundMessage>,
}

impl AppEndpoint {
    /// Emit a capability request.
    pub fn send(&self, message: OutboundMessage) -> Result<(), BridgeError> {
        self.outbound.send(message)
    }

    /// Wait for the next result. `None` once the bridge side is gone.
    pub async fn recv(&mut self) -> Option<InboundMessage> {
        self.inbound.recv().await
    }

    /// Take a result if one is already queued.
    pub fn try_recv(&mut self) -> Option<InboundMessage> {
        self.inbound.try_recv().ok()
    }

    /// Take every result queued right now.
    pub fn drain(&mut self) -> Vec<InboundMessage> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Split into independently owned halves.
    ///
    /// Dropping every [`OutboundSender`] closes the outbound port, which
    /// ends the bridge subscription.
    pub fn split(self) -> (OutboundSender, mpsc::UnboundedReceiver<InboundMessage>) {
        (self.outbound, self.inbound)
    }
}

/// Sending half of the outbound port.
#[derive(Clone, Debug)]
pub struct OutboundSender {
    tx: mpsc::UnboundedSender<Queued>,
    tasks: TaskTracker,
}

impl OutboundSender {
    /// Queue a request for the dispatcher.
    pub fn send(&self, message: OutboundMessage) -> Result<(), BridgeError> {
        self.tx
            .send(Queued {
                message,
                _token: self.tasks.token(),
            })
            .map_err(|_| BridgeError::Detached)
    }
}

impl std::fmt::Debug for Queued {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queued")
            .field("method", &self.message.method)
            .finish_non_exhaustive()
    }
}

/// Bridge side of the ports, consumed by [`attach`](crate::dispatcher::attach).
#[derive(Debug)]
pub struct BridgePorts {
    pub(crate) outbound: mpsc::UnboundedReceiver<Queued>,
    pub(crate) inbound: InboundPort,
    pub(crate) tasks: TaskTracker,
}

/// Fire-and-forget sender for results.
#[derive(Clone, Debug)]
pub struct InboundPort {
    tx: mpsc::UnboundedSender<InboundMessage>,
}

impl InboundPort {
    /// Deliver a result to the application.
    ///
    /// Never fails from the caller's point of view: if the application has
    /// dropped its receiver, the message is discarded.
    pub fn send(&self, message: InboundMessage) {
        if let Err(mpsc::error::SendError(dropped)) = self.tx.send(message) {
            debug!(method = %dropped.method, "application inbound port closed, dropping result");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn outbound_reaches_bridge_side() {
        let (app, mut bridge) = channel();
        app.send(OutboundMessage::new("openWindow", json!({"url": "u"})))
            .unwrap();
        let queued = bridge.outbound.recv().await.unwrap();
        assert_eq!(queued.message.method, "openWindow");
    }

    #[tokio::test]
    async fn queued_message_holds_tracker_token() {
        let (app, mut bridge) = channel();
        app.send(OutboundMessage::bare("isLoggedIn")).unwrap();
        assert_eq!(bridge.tasks.len(), 1);
        drop(bridge.outbound.recv().await.unwrap());
        assert!(bridge.tasks.is_empty());
    }

    #[test]
    fn inbound_reaches_application() {
        let (mut app, bridge) = channel();
        bridge
            .inbound
            .send(InboundMessage::new("getLanguage", json!("ja")));
        assert_eq!(
            app.drain(),
            vec![InboundMessage::new("getLanguage", json!("ja"))]
        );
        assert!(app.try_recv().is_none());
    }

    #[test]
    fn inbound_send_after_app_dropped_is_silent() {
        let (app, bridge) = channel();
        drop(app);
        bridge
            .inbound
            .send(InboundMessage::new("isLoggedIn", json!(true)));
    }

    #[test]
    fn outbound_send_after_bridge_dropped_fails() {
        let (app, bridge) = channel();
        drop(bridge);
        let err = app.send(OutboundMessage::bare("isLoggedIn")).unwrap_err();
        assert!(matches!(err, BridgeError::Detached));
    }
}
