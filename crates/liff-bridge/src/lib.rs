//! # liff-bridge
//!
//! Relays capability requests from an application's outbound port to a
//! [`HostSession`](liff_core::HostSession) and sends results back on the
//! application's inbound port.
//!
//! - [`ports`]: the channel pair connecting application and bridge
//! - [`method`]: the closed set of method names
//! - [`registry`]: method name to handler mapping, built once
//! - [`handlers`]: one handler per capability, each containing its own failures
//! - [`dispatcher`]: the subscription loop and the [`Bridge`] handle
//! - [`bootstrap`]: host initialization followed by attach
//!
//! Every per-call host failure is logged at `warn` and never reaches the
//! application. Unknown methods are logged at `debug` and dropped.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod handlers;
pub mod method;
pub mod ports;
pub mod registry;

pub use bootstrap::launch;
pub use dispatcher::{Bridge, attach};
pub use errors::{BridgeError, HandlerError};
pub use method::Method;
pub use ports::{AppEndpoint, BridgePorts, InboundPort, OutboundSender, channel};
pub use registry::{MethodHandler, MethodRegistry};
