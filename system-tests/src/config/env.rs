// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for live system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: randomuser-conformance-client
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, and malformed numbers fail
//! closed. Unset variables fall back to the public endpoint with the client
//! defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use randomuser_conformance_client::HttpTransportConfig;
use randomuser_conformance_client::config::parse_timeout_seconds;
use randomuser_conformance_client::config::read_env_nonempty;
use randomuser_conformance_client::http::DEFAULT_BASE_URL;
use randomuser_conformance_client::http::normalize_base_url;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional base URL of the API under test.
    BaseUrl,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional run root override for artifacts.
    RunRoot,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "RANDOMUSER_SYSTEM_TEST_BASE_URL",
            Self::TimeoutSeconds => "RANDOMUSER_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RunRoot => "RANDOMUSER_SYSTEM_TEST_RUN_ROOT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTestConfig {
    /// Base URL of the API under test.
    pub base_url: String,
    /// Optional whole-request timeout.
    pub timeout: Option<Duration>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
}

impl Default for SystemTestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            run_root: None,
        }
    }
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid URL or timeout).
    pub fn load() -> Result<Self, String> {
        let base_url = read(SystemTestEnv::BaseUrl)?
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), |value| value.trim().to_string());
        normalize_base_url(&base_url)
            .map_err(|err| format!("{}: {err}", SystemTestEnv::BaseUrl.as_str()))?;
        let timeout = read(SystemTestEnv::TimeoutSeconds)?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()
            .map_err(|err| err.to_string())?
            .map(Duration::from_secs);
        let run_root = read(SystemTestEnv::RunRoot)?.map(PathBuf::from);
        Ok(Self {
            base_url,
            timeout,
            run_root,
        })
    }

    /// Builds the transport configuration for the target endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid.
    pub fn transport_config(&self) -> Result<HttpTransportConfig, String> {
        let mut config = HttpTransportConfig::new(&self.base_url).map_err(|err| err.to_string())?;
        config.timeout = self.timeout;
        Ok(config)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a non-empty environment value for `key`.
fn read(key: SystemTestEnv) -> Result<Option<String>, String> {
    read_env_nonempty(key.as_str()).map_err(|err| err.to_string())
}
