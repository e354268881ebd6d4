//! Settings type definitions.
//!
//! Field names are camelCase on disk. Every section implements [`Default`]
//! and is marked `#[serde(default)]`, so partial files are accepted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Log levels accepted by [`LoggingSettings::level`].
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root settings type.
///
/// ```json
/// {
///   "host": { "liffId": "1234567890-AbcdEfgh" },
///   "logging": { "level": "info" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeSettings {
    /// Settings schema version.
    pub version: String,
    /// Host runtime settings.
    pub host: HostSettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            host: HostSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Host runtime settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostSettings {
    /// Mini-app id passed to the host's `init`. Required at launch.
    pub liff_id: String,
    /// JSON file describing the stub host used by the CLI harness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level written to stderr.
    pub level: String,
    /// Debug mode; forces `debug` level regardless of [`Self::level`].
    pub debug: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            debug: false,
        }
    }
}

impl LoggingSettings {
    /// Level the subscriber should be installed with.
    pub fn effective_level(&self) -> &str {
        if self.debug { "debug" } else { &self.level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: BridgeSettings =
            serde_json::from_value(json!({"host": {"liffId": "123-abc"}})).unwrap();
        assert_eq!(settings.host.liff_id, "123-abc");
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.version, "0.1.0");
    }

    #[test]
    fn serializes_camel_case() {
        let mut settings = BridgeSettings::default();
        settings.host.liff_id = "x".into();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["host"]["liffId"], "x");
        assert!(value["host"].get("fixture").is_none());
    }

    #[test]
    fn debug_forces_debug_level() {
        let logging = LoggingSettings {
            level: "error".into(),
            debug: true,
        };
        assert_eq!(logging.effective_level(), "debug");
    }

    #[test]
    fn effective_level_without_debug() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.effective_level(), "warn");
    }
}
