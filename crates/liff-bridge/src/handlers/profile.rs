//! Profile handler: getProfile.

use std::sync::Arc;

use serde_json::Value;

use super::{Reply, spawn_call};
use crate::context::BridgeContext;
use crate::method::Method;
use crate::registry::MethodHandler;

/// Fetches the user profile and relays it once the host resolves.
/// A rejection is logged and nothing is relayed.
pub struct GetProfileHandler;

impl MethodHandler for GetProfileHandler {
    fn handle(&self, ctx: &BridgeContext, _data: Value) {
        let host = Arc::clone(&ctx.host);
        spawn_call(
            ctx,
            Method::GetProfile,
            async move { host.get_profile().await },
            Reply::Relay,
        );
    }
}
