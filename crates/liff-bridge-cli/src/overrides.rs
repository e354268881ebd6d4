//! Command-line overrides, the highest-priority settings layer.

use std::path::PathBuf;

use liff_settings::loader::parse_level;
use liff_settings::{BridgeSettings, SettingsError};

/// Values given on the command line. `None` leaves the loaded value alone.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Mini-app id.
    pub liff_id: Option<String>,
    /// Stub host fixture path.
    pub fixture: Option<PathBuf>,
    /// Log level name.
    pub log_level: Option<String>,
}

impl Overrides {
    /// Apply over `settings`. An unknown log level is an error.
    pub fn apply(self, settings: &mut BridgeSettings) -> Result<(), SettingsError> {
        if let Some(liff_id) = self.liff_id {
            settings.host.liff_id = liff_id;
        }
        if let Some(fixture) = self.fixture {
            settings.host.fixture = Some(fixture);
        }
        if let Some(level) = self.log_level {
            settings.logging.level = parse_level(&level)
                .ok_or_else(|| SettingsError::InvalidValue(format!("unknown log level: {level}")))?;
        }
        Ok(())
    }
}
