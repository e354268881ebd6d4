//! Dependencies handed to every handler invocation.

use std::sync::Arc;

use liff_core::HostSession;
use tokio_util::task::TaskTracker;

use crate::ports::InboundPort;

/// Shared context passed to every method handler.
#[derive(Clone)]
pub struct BridgeContext {
    /// Initialized host session.
    pub host: Arc<dyn HostSession>,
    /// Result port back to the application.
    pub inbound: InboundPort,
    /// Tracks queued messages and spawned host-call continuations.
    pub(crate) tasks: TaskTracker,
}

impl BridgeContext {
    pub(crate) fn new(host: Arc<dyn HostSession>, inbound: InboundPort, tasks: TaskTracker) -> Self {
        Self {
            host,
            inbound,
            tasks,
        }
    }
}

/// Wait until every tracked item has finished, then accept new ones again.
///
/// The tracker is closed and reopened in place, so callers must not overlap
/// two settles on the same tracker. [`Bridge::settle`] enforces this by
/// taking `&mut self`.
///
/// [`Bridge::settle`]: crate::dispatcher::Bridge::settle
pub(crate) async fn settle(tasks: &TaskTracker) {
    let _ = tasks.close();
    tasks.wait().await;
    let _ = tasks.reopen();
}
