//! # liff-bridge-cli
//!
//! Runs the port bridge against a [`StubHost`](liff_core::StubHost) with
//! stdin as the application's outbound port and stdout as its inbound port.
//!
//! - [`fixture`]: stub host configuration files
//! - [`stdio`]: newline-delimited line transport
//! - [`relay`]: the pump between the transport and the bridge ports
//! - [`overrides`]: command-line overrides applied over loaded settings

#![deny(unsafe_code)]

pub mod fixture;
pub mod overrides;
pub mod relay;
pub mod stdio;

pub use fixture::{FixtureError, load_fixture};
pub use overrides::Overrides;
pub use relay::{RelayError, RelaySummary, run};
