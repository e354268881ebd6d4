//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`BridgeSettings::default()`]
//! 2. If the settings file exists, deep-merge its values over the defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate the result

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::{BridgeSettings, LOG_LEVELS};

/// Env var holding the mini-app id.
pub const ENV_LIFF_ID: &str = "LIFF_ID";
/// Env var holding the log level.
pub const ENV_LOG_LEVEL: &str = "LIFF_LOG_LEVEL";
/// Env var switching debug mode on (`1`, `true`, `yes`, `on`).
pub const ENV_DEBUG: &str = "DEBUG";

/// Resolve the path to the settings file (`~/.liff-bridge/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".liff-bridge").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<BridgeSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON or an unknown log level in
/// the file is an error.
pub fn load_settings_from_path(path: &Path) -> Result<BridgeSettings> {
    let mut settings = read_file_layer(path)?;
    apply_overrides(&mut settings, |name| std::env::var(name).ok());
    validate(&settings)?;
    Ok(settings)
}

fn read_file_layer(path: &Path) -> Result<BridgeSettings> {
    let defaults = serde_json::to_value(BridgeSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides read through `lookup`.
///
/// `lookup` is `std::env::var` in production; tests pass a map. Empty and
/// unparseable values are ignored and fall back to the file/default value.
pub fn apply_overrides(settings: &mut BridgeSettings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read(ENV_LIFF_ID) {
        settings.host.liff_id = v;
    }
    if let Some(v) = read(ENV_LOG_LEVEL) {
        match parse_level(&v) {
            Some(level) => settings.logging.level = level,
            None => warn!(key = ENV_LOG_LEVEL, value = %v, "invalid log level env var, ignoring"),
        }
    }
    if let Some(v) = read(ENV_DEBUG) {
        match parse_bool(&v) {
            Some(flag) => settings.logging.debug = flag,
            None => warn!(key = ENV_DEBUG, value = %v, "invalid boolean env var, ignoring"),
        }
    }
}

fn validate(settings: &BridgeSettings) -> Result<()> {
    if parse_level(&settings.logging.level).is_none() {
        return Err(SettingsError::InvalidValue(format!(
            "unknown log level: {}",
            settings.logging.level
        )));
    }
    Ok(())
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Normalize a log level name, `None` if it is not one of [`LOG_LEVELS`].
pub fn parse_level(val: &str) -> Option<String> {
    let lower = val.trim().to_lowercase();
    LOG_LEVELS.contains(&lower.as_str()).then_some(lower)
}
