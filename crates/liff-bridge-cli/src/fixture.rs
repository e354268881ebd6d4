//! Stub host fixtures.
//!
//! A fixture is a JSON [`StubHostConfig`]. Missing keys keep their
//! defaults, so `{}` and no fixture at all describe the same host.
//!
//! ```json
//! {
//!   "loggedIn": true,
//!   "language": "ja",
//!   "profile": { "userId": "U1", "displayName": "Ann" },
//!   "failures": { "sendMessages": "network error" },
//!   "latencyMs": 50
//! }
//! ```

use std::path::{Path, PathBuf};

use liff_core::StubHostConfig;
use thiserror::Error;
use tracing::debug;

/// Failure to load a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    Io {
        /// Fixture path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid stub host description.
    #[error("invalid fixture {path}: {source}")]
    Json {
        /// Fixture path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Load the stub host configuration, or defaults when `path` is `None`.
pub fn load_fixture(path: Option<&Path>) -> Result<StubHostConfig, FixtureError> {
    let Some(path) = path else {
        debug!("no host fixture, using stub defaults");
        return Ok(StubHostConfig::default());
    };

    debug!(?path, "loading host fixture");
    let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_path_gives_defaults() {
        let config = load_fixture(None).unwrap();
        assert!(config.logged_in);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn partial_fixture_keeps_other_defaults() {
        let file = write_fixture(
            r#"{"language": "ja", "accessToken": null, "failures": {"getProfile": "offline"}}"#,
        );
        let config = load_fixture(Some(file.path())).unwrap();

        assert_eq!(config.language, "ja");
        assert_eq!(config.access_token, None);
        assert_eq!(config.failures.get("getProfile").map(String::as_str), Some("offline"));
        assert_eq!(config.version, "2.24.0");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_fixture(Some(&path)).unwrap_err();

        assert!(matches!(err, FixtureError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_fixture_is_rejected() {
        let file = write_fixture(r#"{"loggedIn": "maybe"}"#);
        let err = load_fixture(Some(file.path())).unwrap_err();
        assert!(matches!(err, FixtureError::Json { .. }));
    }
}
