//! Messaging handler: sendMessages.

use std::sync::Arc;

use serde_json::Value;

use super::{Reply, contain, decode, spawn_call};
use crate::context::BridgeContext;
use crate::method::Method;
use crate::registry::MethodHandler;

/// Sends the message array on behalf of the user.
///
/// The application never hears back: success is discarded and failure is
/// logged. A payload that is not an array is rejected before the host is
/// called.
pub struct SendMessagesHandler;

impl MethodHandler for SendMessagesHandler {
    fn handle(&self, ctx: &BridgeContext, data: Value) {
        let messages: Vec<Value> = match decode(data) {
            Ok(messages) => messages,
            Err(err) => {
                contain(Method::SendMessages, Err(err));
                return;
            }
        };
        let host = Arc::clone(&ctx.host);
        spawn_call(
            ctx,
            Method::SendMessages,
            async move { host.send_messages(&messages).await },
            Reply::Silent,
        );
    }
}
