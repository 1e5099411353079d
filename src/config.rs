//! Endpoint constants and the explicit configuration handed to the fetcher.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ReportError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.flowtheroom.com/internal";
pub const REVENUE_AND_COUNT_PATH: &str = "report/hotel/revenue-and-count";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_ENV: &str = "HOTEL_REPORTS_BASE_URL";
pub const API_KEY_ENV: &str = "HOTEL_REPORTS_API_KEY";

/// Connection settings for the metrics endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Base URL the endpoint path is appended to.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <key>` when present.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ReportConfig {
    /// Full URL of the revenue-and-count endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            REVENUE_AND_COUNT_PATH
        )
    }

    /// Overlay values from a config file; fields absent from the file keep
    /// their current value.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if file.api_key.is_some() {
            self.api_key = file.api_key;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// FileConfig — optional JSON config file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Read a JSON config file.
///
/// Returns `Ok(None)` when the file does not exist; any other read or parse
/// failure is a [`ReportError::Config`].
pub fn load_file(path: &Path) -> Result<Option<FileConfig>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ReportError::Config(format!(
                "cannot read {}: {}",
                path.display(),
                e
            )))
        }
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| ReportError::Config(format!("cannot parse {}: {}", path.display(), e)))
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hotel-reports").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ReportConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..ReportConfig::default()
        };
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/report/hotel/revenue-and-count"
        );
    }

    #[test]
    fn merge_file_keeps_unset_fields() {
        let config = ReportConfig::default().merge_file(FileConfig {
            api_key: Some("secret".to_string()),
            ..FileConfig::default()
        });
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn load_file_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn load_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn load_file_reads_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"base_url": "http://example.test", "timeout_secs": 5}"#).unwrap();
        let file = load_file(&path).unwrap().unwrap();
        assert_eq!(file.base_url.as_deref(), Some("http://example.test"));
        assert_eq!(file.timeout_secs, Some(5));
        assert!(file.api_key.is_none());
    }
}
