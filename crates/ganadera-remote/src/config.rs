//! # Endpoint Configuration
//!
//! Where the hosted service lives and how to authenticate against it.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SUPABASE_URL`, `SUPABASE_ANON_KEY`,
//!    `GANADERA_REQUEST_TIMEOUT_SECS`); the binary loads `.env` first
//! 2. Config file (`config.toml` in the platform config directory)
//! 3. Defaults (nothing set, no timeout)
//!
//! ```toml
//! url = "https://xyzcompany.supabase.co"
//! anon_key = "eyJhbGciOi..."
//! request_timeout_secs = 15
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_TIMEOUT: &str = "GANADERA_REQUEST_TIMEOUT_SECS";

/// Raw, possibly incomplete settings gathered from every layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    /// No timeout when unset: a hung request stays pending.
    pub request_timeout_secs: Option<u64>,
}

/// Validated settings, ready to build a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: Url,
    pub anon_key: String,
    pub request_timeout: Option<Duration>,
}

impl RemoteConfig {
    /// Loads the config file (if any) and applies environment overrides.
    ///
    /// A missing file is not an error. Missing settings are only reported
    /// by [`RemoteConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// `<config dir>/ganadera/config.toml`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "ganadera", "ganadera")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file_error = |reason: String| ConfigError::File {
            path: path.display().to_string(),
            reason,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
        let config = Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::File { reason, .. } => file_error(reason),
            other => other,
        })?;
        debug!(path = %path.display(), "Loaded remote config file");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::File {
            path: "config.toml".to_string(),
            reason: e.to_string(),
        })
    }

    /// Overrides fields with whatever `lookup` finds. Blank values are ignored.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = read(ENV_URL) {
            self.url = Some(url);
        }
        if let Some(key) = read(ENV_ANON_KEY) {
            self.anon_key = Some(key);
        }
        if let Some(raw) = read(ENV_TIMEOUT) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT.to_string(),
                    value: raw.clone(),
                })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Checks that both URL and key are present and the URL is http(s).
    pub fn validate(&self) -> Result<Endpoint, ConfigError> {
        let raw_url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing(ENV_URL))?;
        let anon_key = self
            .anon_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing(ENV_ANON_KEY))?;

        let base_url = Url::parse(raw_url).map_err(|e| ConfigError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: raw_url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(Endpoint {
            base_url,
            anon_key: anon_key.to_string(),
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }
}

impl Endpoint {
    /// `{base}/rest/v1/{table}`.
    pub fn table_url(&self, table: &str) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: self.base_url.to_string(),
            reason,
        };
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }
}
