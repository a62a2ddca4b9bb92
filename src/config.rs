//! Runtime configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::error::FormError;

pub const DEFAULT_EXPORT_DIR: &str = ".";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub export_dir: PathBuf,
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_token: None,
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `FORMBUILDER_EXPORT_DIR`: default `.`
    /// - `FORMBUILDER_API_BASE_URL`: default `http://127.0.0.1:3000`
    /// - `FORMBUILDER_API_TOKEN`: bearer token, unset by default
    /// - `FORMBUILDER_REQUEST_TIMEOUT_SECS`: default 10
    /// - `FORMBUILDER_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, FormError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the base URL is not an http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FormError> {
        let defaults = Self::default();

        let export_dir = non_empty(lookup("FORMBUILDER_EXPORT_DIR")).map_or(defaults.export_dir, PathBuf::from);
        let api_base_url = match non_empty(lookup("FORMBUILDER_API_BASE_URL")) {
            Some(raw) => parse_base_url(&raw)?,
            None => defaults.api_base_url,
        };
        let api_token = non_empty(lookup("FORMBUILDER_API_TOKEN"));
        let timeouts = Timeouts {
            request_secs: parse_u64(lookup("FORMBUILDER_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("FORMBUILDER_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { export_dir, api_base_url, api_token, timeouts })
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned()).filter(|value| !value.is_empty())
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    match raw.map(|value| value.trim().parse::<u64>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}

/// Validate an http(s) base URL and drop any trailing slash.
///
/// # Errors
///
/// Returns `ConfigParse` for anything that is not an http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<String, FormError> {
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(FormError::ConfigParse(format!("invalid base URL: {raw}")));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}
