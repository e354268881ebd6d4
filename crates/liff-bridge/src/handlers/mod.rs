//! Method handlers and registration.
//!
//! Two shapes exist. Synchronous handlers call the host inline and either
//! relay the value or report the failure before returning. Asynchronous
//! handlers spawn the host call on the bridge's task tracker and return at
//! once; the spawned continuation matches on the call's `Result`, so the
//! failure arm is always handled (by logging) rather than left unobserved.

pub mod messaging;
pub mod profile;
pub mod runtime;
pub mod session;
pub mod window;

use std::future::Future;

use liff_core::{HostError, InboundMessage};
use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, debug, debug_span, warn};

use crate::context::BridgeContext;
use crate::errors::HandlerError;
use crate::method::Method;
use crate::ports::InboundPort;
use crate::registry::MethodRegistry;

/// Register every bridge handler.
pub(crate) fn register_all(registry: &mut MethodRegistry) {
    // Window
    registry.register(Method::CloseWindow, window::CloseWindowHandler);
    registry.register(Method::OpenWindow, window::OpenWindowHandler);

    // Session
    registry.register(Method::GetAccessToken, session::GetAccessTokenHandler);
    registry.register(Method::IsLoggedIn, session::IsLoggedInHandler);

    // Runtime
    registry.register(Method::GetLanguage, runtime::GetLanguageHandler);
    registry.register(Method::GetVersion, runtime::GetVersionHandler);

    // Profile
    registry.register(Method::GetProfile, profile::GetProfileHandler);

    // Messaging
    registry.register(Method::SendMessages, messaging::SendMessagesHandler);
}

/// Whether an async host call relays its value to the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reply {
    /// Send `{method, value}` inbound on success.
    Relay,
    /// Discard the value on success.
    Silent,
}

/// Decode a request payload.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T, HandlerError> {
    Ok(serde_json::from_value(data)?)
}

/// Relay the result of a synchronous host call, or report its failure.
pub(crate) fn reply_now<T: Serialize>(
    ctx: &BridgeContext,
    method: Method,
    result: Result<T, HostError>,
) {
    match result {
        Ok(value) => deliver(&ctx.inbound, method, &value),
        Err(err) => report_failure(method, &err.into()),
    }
}

/// Report the failure of a handler that has no reply, if any.
pub(crate) fn contain(method: Method, result: Result<(), HandlerError>) {
    if let Err(err) = result {
        report_failure(method, &err);
    }
}

/// Spawn an asynchronous host call and handle both of its outcomes.
pub(crate) fn spawn_call<T, F>(ctx: &BridgeContext, method: Method, call: F, reply: Reply)
where
    T: Serialize + Send + 'static,
    F: Future<Output = Result<T, HostError>> + Send + 'static,
{
    let inbound = ctx.inbound.clone();
    let continuation = async move {
        match call.await {
            Ok(value) => match reply {
                Reply::Relay => deliver(&inbound, method, &value),
                Reply::Silent => debug!("host call completed"),
            },
            Err(err) => report_failure(method, &err.into()),
        }
    };
    let _ = ctx
        .tasks
        .spawn(continuation.instrument(debug_span!("host_call", method = %method)));
}

fn deliver<T: Serialize>(inbound: &InboundPort, method: Method, value: &T) {
    match serde_json::to_value(value) {
        Ok(data) => inbound.send(InboundMessage::new(method.as_str(), data)),
        Err(err) => report_failure(method, &err.into()),
    }
}

/// Log a contained failure. Nothing is sent to the application.
pub(crate) fn report_failure(method: Method, err: &HandlerError) {
    counter!("bridge_host_failures_total", "method" => method.as_str()).increment(1);
    warn!(method = %method, error = %err, "host call failed, result not relayed");
}
