//! Session handlers: getAccessToken, isLoggedIn.

use serde_json::Value;

use super::reply_now;
use crate::context::BridgeContext;
use crate::method::Method;
use crate::registry::MethodHandler;

/// Replies with the current access token, or `null` when there is none.
pub struct GetAccessTokenHandler;

impl MethodHandler for GetAccessTokenHandler {
    fn handle(&self, ctx: &BridgeContext, _data: Value) {
        reply_now(ctx, Method::GetAccessToken, ctx.host.get_access_token());
    }
}

/// Replies with the login state.
pub struct IsLoggedInHandler;

impl MethodHandler for IsLoggedInHandler {
    fn handle(&self, ctx: &BridgeContext, _data: Value) {
        reply_now(ctx, Method::IsLoggedIn, ctx.host.is_logged_in());
    }
}
