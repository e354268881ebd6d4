//! # liff-core
//!
//! Shared vocabulary for the LIFF port bridge.
//!
//! - **Messages**: [`OutboundMessage`] (application to bridge) and
//!   [`InboundMessage`] (bridge to application), both `{method, data}`
//! - **Host contract**: the [`HostSession`] trait and its payload types
//!   ([`Profile`], [`OpenWindowParams`], [`InitConfig`])
//! - **Errors**: [`HostError`] for failed host capability calls
//! - **Stub host**: [`StubHost`], a configurable in-process host used by the
//!   CLI harness and by tests
//! - **Logging**: `tracing` subscriber setup and a log-capture layer for tests

#![deny(unsafe_code)]

pub mod host;
pub mod logging;
pub mod messages;
pub mod stub;

pub use host::{HostError, HostSession, InitConfig, OpenWindowParams, Profile};
pub use messages::{InboundMessage, OutboundMessage};
pub use stub::{HostCall, StubHost, StubHostConfig};
