//! Method registry and dispatch.

use std::collections::HashMap;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use liff_core::OutboundMessage;
use metrics::counter;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::context::BridgeContext;
use crate::errors::HandlerError;
use crate::handlers;
use crate::method::Method;

/// Trait implemented by every method handler.
///
/// A handler performs one host call. It has no return value: results go to
/// the inbound port and failures are logged inside the handler.
pub trait MethodHandler: Send + Sync {
    /// Run the handler with the request payload.
    fn handle(&self, ctx: &BridgeContext, data: Value);
}

/// Immutable mapping from [`Method`] to handler.
///
/// Populated once at construction with the full method set; there is no
/// way to add or remove handlers afterwards.
pub struct MethodRegistry {
    handlers: HashMap<Method, Arc<dyn MethodHandler>>,
}

impl MethodRegistry {
    /// Build the registry with every bridge method.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        handlers::register_all(&mut registry);
        registry
    }

    pub(crate) fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub(crate) fn register(&mut self, method: Method, handler: impl MethodHandler + 'static) {
        let _ = self.handlers.insert(method, Arc::new(handler));
    }

    /// Route one outbound message to its handler.
    ///
    /// Returns `false` when the method is unknown; such messages are dropped
    /// without reaching any handler or the inbound port. A panic inside the
    /// handler is caught and reported like any other host failure.
    #[instrument(skip_all, fields(method = %message.method))]
    pub fn dispatch(&self, message: OutboundMessage, ctx: &BridgeContext) -> bool {
        let Some((method, handler)) = Method::from_name(&message.method)
            .and_then(|method| self.handlers.get(&method).map(|h| (method, h)))
        else {
            counter!("bridge_unknown_methods_total").increment(1);
            debug!("ignoring message for unknown method");
            return false;
        };

        counter!("bridge_messages_total", "method" => method.as_str()).increment(1);
        debug!("dispatching");
        let data = message.data;
        if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(ctx, data))) {
            handlers::report_failure(method, &HandlerError::Panicked(panic_message(&*panic)));
        }
        true
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().map(|m| m.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Whether `name` is a registered method.
    pub fn has_method(&self, name: &str) -> bool {
        Method::from_name(name).is_some_and(|m| self.handlers.contains_key(&m))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic")
        .to_string()
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}
