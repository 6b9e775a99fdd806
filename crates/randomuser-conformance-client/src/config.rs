// crates/randomuser-conformance-client/src/config.rs
// ============================================================================
// Module: Conformance Configuration
// Description: TOML and environment configuration for conformance runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: randomuser-conformance-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is read from an optional TOML file, then environment
//! overrides are applied, then the result is validated. Every section is
//! optional; an absent file yields the defaults that target the public API.
//!
//! ```toml
//! [target]
//! base_url = "https://randomuser.me/api/"
//! timeout_ms = 10000
//!
//! [run]
//! parallelism = 4
//!
//! [catalog.nat_multi]
//! nat = "ch,de"
//! ```
//!
//! Catalog tables are keyed by rule name and merged over the standard entry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use randomuser_conformance_core::Catalog;
use randomuser_conformance_core::ParamValue;
use randomuser_conformance_core::ParameterSet;
use randomuser_conformance_core::Rule;
use serde::Deserialize;
use thiserror::Error;

use crate::http::DEFAULT_BASE_URL;
use crate::http::DEFAULT_MAX_RESPONSE_BYTES;
use crate::http::DEFAULT_USER_AGENT;
use crate::http::HttpTransportConfig;
use crate::http::normalize_base_url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "RANDOMUSER_CONFORMANCE_CONFIG";
/// Environment variable overriding `target.base_url`.
pub const BASE_URL_ENV_VAR: &str = "RANDOMUSER_CONFORMANCE_BASE_URL";
/// Environment variable overriding the timeout, in whole seconds.
pub const TIMEOUT_ENV_VAR: &str = "RANDOMUSER_CONFORMANCE_TIMEOUT_SEC";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default number of scenarios in flight.
const DEFAULT_PARALLELISM: usize = 4;

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Top-level conformance configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConformanceConfig {
    /// Endpoint and request limits.
    #[serde(default)]
    pub target: TargetConfig,
    /// Runner settings.
    #[serde(default)]
    pub run: RunConfig,
    /// Catalog overrides keyed by rule name.
    #[serde(default)]
    pub catalog: BTreeMap<String, BTreeMap<String, ParamValue>>,
}

/// `[target]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Base URL of the API under test.
    pub base_url: String,
    /// Optional whole-request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// User agent for outbound requests.
    pub user_agent: String,
    /// Maximum response size in bytes.
    pub max_response_bytes: usize,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Maximum scenarios in flight.
    pub parallelism: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

/// Configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Environment override was unreadable or malformed.
    #[error("invalid environment: {0}")]
    Env(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl ConformanceConfig {
    /// Loads configuration from `path` (or `RANDOMUSER_CONFORMANCE_CONFIG`),
    /// applies environment overrides, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, overriding, or
    /// validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, read_env_nonempty)
    }

    /// Same as [`ConformanceConfig::load`] with an injectable environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, overriding, or
    /// validation fails.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let resolved = match path {
            Some(path) => Some(path.to_path_buf()),
            None => lookup(CONFIG_ENV_VAR)?.map(PathBuf::from),
        };
        let mut config = match resolved {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a config file without applying overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unreadable, oversized, non-UTF-8, or
    /// malformed files.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses TOML text without applying overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown fields.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment overrides using `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] when an override is malformed.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV_VAR)? {
            self.target.base_url = base_url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV_VAR)? {
            let secs = parse_timeout_seconds(TIMEOUT_ENV_VAR, &raw)?;
            self.target.timeout_ms = Some(secs.saturating_mul(1000));
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_base_url(&self.target.base_url)
            .map_err(|err| ConfigError::Invalid(format!("target.base_url: {err}")))?;
        if self.target.timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("target.timeout_ms must be at least 1".to_string()));
        }
        if self.target.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("target.user_agent must not be empty".to_string()));
        }
        if self.target.max_response_bytes == 0 {
            return Err(ConfigError::Invalid(
                "target.max_response_bytes must be at least 1".to_string(),
            ));
        }
        if self.run.parallelism == 0 {
            return Err(ConfigError::Invalid("run.parallelism must be at least 1".to_string()));
        }
        for name in self.catalog.keys() {
            name.parse::<Rule>().map_err(|err| ConfigError::Invalid(format!("catalog: {err}")))?;
        }
        Ok(())
    }

    /// Builds the transport configuration for the target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the base URL is invalid.
    pub fn transport_config(&self) -> Result<HttpTransportConfig, ConfigError> {
        let mut config = HttpTransportConfig::new(&self.target.base_url)
            .map_err(|err| ConfigError::Invalid(format!("target.base_url: {err}")))?;
        config.timeout = self.target.timeout_ms.map(Duration::from_millis);
        config.user_agent.clone_from(&self.target.user_agent);
        config.max_response_bytes = self.target.max_response_bytes;
        Ok(config)
    }

    /// Builds the catalog: the standard entries with overrides merged on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an override names an unknown rule.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let mut catalog = Catalog::standard();
        for (name, values) in &self.catalog {
            let rule: Rule =
                name.parse().map_err(|err| ConfigError::Invalid(format!("catalog: {err}")))?;
            let overrides: ParameterSet =
                values.iter().map(|(key, value)| (key.clone(), value.clone())).collect();
            let merged = catalog.entry(rule).merge(&overrides);
            catalog = catalog.with_entry(rule, merged);
        }
        Ok(catalog)
    }
}

// ============================================================================
// SECTION: Environment Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns [`ConfigError::Env`] when the value is not valid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Env(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns [`ConfigError::Env`] when the variable is set but empty or not
/// valid UTF-8.
pub fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Env(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive whole number of seconds.
///
/// # Errors
///
/// Returns [`ConfigError::Env`] when the value is non-numeric or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<u64, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ConfigError::Env(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Env(format!("{name} must be greater than zero")));
    }
    Ok(secs)
}
