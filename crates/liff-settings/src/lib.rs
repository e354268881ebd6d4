//! # liff-settings
//!
//! Configuration for the LIFF port bridge, loaded from three layers (in
//! priority order):
//! 1. **Compiled defaults**: [`BridgeSettings::default()`]
//! 2. **User file**: `~/.liff-bridge/settings.json`, deep-merged over defaults
//! 3. **Environment variables**: `LIFF_ID`, `LIFF_LOG_LEVEL`, `DEBUG`

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{BridgeSettings, HostSettings, LoggingSettings};
