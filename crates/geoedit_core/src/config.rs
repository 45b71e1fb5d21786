//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_FEATURE_TYPE, DEFAULT_GEOMETRY_FIELD, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_URL, DEFAULT_SRS_NAME, WFS_VERSION,
};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Runtime configuration for GeoEdit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Base URL of the feature server workspace (no trailing slash).
    pub server_url: String,
    /// Feature type name read and written through WFS.
    pub feature_type: String,
    /// Spatial reference identifier declared on encoded geometries.
    pub srs_name: String,
    /// Geometry attribute of the feature type.
    pub geometry_field: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            feature_type: DEFAULT_FEATURE_TYPE.to_string(),
            srs_name: DEFAULT_SRS_NAME.to_string(),
            geometry_field: DEFAULT_GEOMETRY_FIELD.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values fall back to defaults; the server URL loses any trailing `/`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            server_url: non_blank(lookup("GEOEDIT_SERVER_URL"))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            feature_type: non_blank(lookup("GEOEDIT_FEATURE_TYPE"))
                .unwrap_or(defaults.feature_type),
            srs_name: non_blank(lookup("GEOEDIT_SRS_NAME")).unwrap_or(defaults.srs_name),
            geometry_field: non_blank(lookup("GEOEDIT_GEOMETRY_FIELD"))
                .unwrap_or(defaults.geometry_field),
            request_timeout_secs: lookup("GEOEDIT_REQUEST_TIMEOUT")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// URL of the GetFeature request returning the whole collection as GeoJSON.
    pub fn get_feature_url(&self) -> String {
        format!(
            "{}/ows?service=WFS&version={}&request=GetFeature&typeName={}&outputFormat=application/json",
            self.server_url, WFS_VERSION, self.feature_type
        )
    }

    /// URL that accepts WFS Transaction POST bodies.
    pub fn transaction_url(&self) -> String {
        format!("{}/wfs", self.server_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
