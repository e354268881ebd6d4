//! Window handlers: closeWindow, openWindow.

use liff_core::OpenWindowParams;
use serde_json::Value;
use tracing::debug;

use super::{contain, decode};
use crate::context::BridgeContext;
use crate::errors::HandlerError;
use crate::method::Method;
use crate::registry::MethodHandler;

/// Closes the mini-app window. No reply.
pub struct CloseWindowHandler;

impl MethodHandler for CloseWindowHandler {
    fn handle(&self, ctx: &BridgeContext, _data: Value) {
        contain(
            Method::CloseWindow,
            ctx.host.close_window().map_err(HandlerError::from),
        );
    }
}

/// Opens `{url, external}` in the in-app or external browser. No reply.
pub struct OpenWindowHandler;

impl MethodHandler for OpenWindowHandler {
    fn handle(&self, ctx: &BridgeContext, data: Value) {
        let result = decode::<OpenWindowParams>(data).and_then(|params| {
            debug!(url = %params.url, external = params.external, "opening window");
            ctx.host.open_window(&params)?;
            Ok(())
        });
        contain(Method::OpenWindow, result);
    }
}
