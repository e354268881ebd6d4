//! Subscription loop and the handle returned to the embedder.

use std::sync::Arc;

use liff_core::HostSession;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, info, info_span};

use crate::context::{self, BridgeContext};
use crate::errors::BridgeError;
use crate::ports::{BridgePorts, Queued};
use crate::registry::MethodRegistry;

/// Subscribe the bridge to the application's outbound port.
///
/// Spawns the subscription on the current tokio runtime. Messages are
/// handled one at a time in arrival order; asynchronous host calls run as
/// separate tasks and never hold up the next message. The subscription
/// lasts until the application drops every outbound sender.
pub fn attach(ports: BridgePorts, host: Arc<dyn HostSession>) -> Bridge {
    attach_with(Arc::new(MethodRegistry::new()), ports, host)
}

pub(crate) fn attach_with(
    registry: Arc<MethodRegistry>,
    ports: BridgePorts,
    host: Arc<dyn HostSession>,
) -> Bridge {
    let BridgePorts {
        outbound,
        inbound,
        tasks,
    } = ports;
    let ctx = BridgeContext::new(host, inbound, tasks.clone());
    let subscription = tokio::spawn(
        subscribe(Arc::clone(&registry), outbound, ctx).instrument(info_span!("bridge")),
    );

    Bridge {
        registry,
        tasks,
        subscription,
    }
}

async fn subscribe(
    registry: Arc<MethodRegistry>,
    mut outbound: mpsc::UnboundedReceiver<Queued>,
    ctx: BridgeContext,
) {
    info!(methods = registry.methods().len(), "bridge attached");
    while let Some(Queued { message, _token }) = outbound.recv().await {
        let _ = registry.dispatch(message, &ctx);
    }
    info!("outbound port closed, subscription ended");
}

/// Handle to an attached bridge.
#[derive(Debug)]
pub struct Bridge {
    registry: Arc<MethodRegistry>,
    tasks: TaskTracker,
    subscription: JoinHandle<()>,
}

impl Bridge {
    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<&'static str> {
        self.registry.methods()
    }

    /// Number of queued messages and host calls still in flight.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait until every message sent so far has been dispatched and every
    /// host call it started has settled. The bridge stays attached.
    ///
    /// Takes `&mut self` because settling closes and reopens the shared
    /// task tracker; two overlapping calls would race on the reopen.
    pub async fn settle(&mut self) {
        context::settle(&self.tasks).await;
    }

    /// Wait for the application to close its outbound port, then for every
    /// outstanding host call to settle.
    pub async fn closed(self) -> Result<(), BridgeError> {
        self.subscription.await?;
        let _ = self.tasks.close();
        self.tasks.wait().await;
        Ok(())
    }
}
