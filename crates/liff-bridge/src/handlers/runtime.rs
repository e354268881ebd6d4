//! Runtime info handlers: getLanguage, getVersion.

use serde_json::Value;

use super::reply_now;
use crate::context::BridgeContext;
use crate::method::Method;
use crate::registry::MethodHandler;

/// Replies with the runtime language.
pub struct GetLanguageHandler;

impl MethodHandler for GetLanguageHandler {
    fn handle(&self, ctx: &BridgeContext, _data: Value) {
        reply_now(ctx, Method::GetLanguage, ctx.host.get_language());
    }
}

/// Replies with the runtime SDK version.
pub struct GetVersionHandler;

impl MethodHandler for GetVersionHandler {
    fn handle(&self, ctx: &BridgeContext, _data: Value) {
        reply_now(ctx, Method::GetVersion, ctx.host.get_version());
    }
}
