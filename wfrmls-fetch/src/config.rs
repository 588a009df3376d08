//! Client configuration.
//!
//! Settings resolve in order: explicit builder value, environment
//! variable, config file, built-in default. The bearer token has no
//! default; building without one fails with
//! [`ApiError::Authentication`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;
use wfrmls_core::{ApiError, MAX_TOP};

use crate::retry::RetryStrategy;

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://resoapi.utahrealestate.com/reso/odata";

/// Bearer token variable.
pub const ENV_BEARER_TOKEN: &str = "WFRMLS_BEARER_TOKEN";
/// Base URL override variable.
pub const ENV_BASE_URL: &str = "WFRMLS_BASE_URL";
/// Per-attempt timeout variable, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "WFRMLS_TIMEOUT_SECS";
/// Retry budget variable.
pub const ENV_MAX_RETRIES: &str = "WFRMLS_MAX_RETRIES";
/// Base retry delay variable, in milliseconds.
pub const ENV_RETRY_DELAY_MS: &str = "WFRMLS_RETRY_DELAY_MS";
/// TLS verification variable.
pub const ENV_VERIFY_TLS: &str = "WFRMLS_VERIFY_TLS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(60);
const DEFAULT_RETRY_JITTER: f64 = 0.25;

// ============================================================================
// Bearer Token
// ============================================================================

/// API bearer token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token, trimming surrounding whitespace.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Returns the raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

// ============================================================================
// Config File
// ============================================================================

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Bearer token.
    pub bearer_token: Option<String>,
    /// Service root URL.
    pub base_url: Option<String>,
    /// Per-attempt timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Retry budget.
    pub max_retries: Option<u32>,
    /// Base retry delay in milliseconds.
    pub retry_delay_ms: Option<u64>,
    /// Maximum retry delay in milliseconds.
    pub max_retry_delay_ms: Option<u64>,
    /// Jitter factor.
    pub retry_jitter: Option<f64>,
    /// Whether to verify TLS certificates.
    pub verify_tls: Option<bool>,
    /// Largest accepted `$top`.
    pub max_top: Option<u32>,
}

impl FileConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wfrmls")
            .join("config.json")
    }

    /// Loads configuration from a specific path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::validation(format!("Cannot read config file {}: {e}", path.display()))
        })?;

        let config: FileConfig = serde_json::from_str(&content).map_err(|e| {
            ApiError::validation(format!("Invalid config file {}: {e}", path.display()))
        })?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[derive(Debug, Clone, Default)]
enum ConfigFileSource {
    #[default]
    None,
    Default,
    Explicit(PathBuf),
}

// ============================================================================
// Client Config
// ============================================================================

/// Resolved, immutable client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    bearer_token: BearerToken,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
    max_retry_delay: Duration,
    retry_jitter: f64,
    verify_tls: bool,
    max_top: u32,
}

impl ClientConfig {
    /// Creates a configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolves configuration from `.env`, the process environment, and
    /// the default config file if present.
    ///
    /// # Errors
    ///
    /// See [`ClientConfigBuilder::build`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::builder().load_dotenv(true).default_config_file().build()
    }

    /// Returns the bearer token.
    pub fn bearer_token(&self) -> &BearerToken {
        &self.bearer_token
    }

    /// Returns the service root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry budget.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the base retry delay.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the maximum retry delay.
    pub fn max_retry_delay(&self) -> Duration {
        self.max_retry_delay
    }

    /// Returns the jitter factor.
    pub fn retry_jitter(&self) -> f64 {
        self.retry_jitter
    }

    /// Returns whether TLS certificates are verified.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Returns the largest accepted `$top`.
    pub fn max_top(&self) -> u32 {
        self.max_top
    }

    /// Returns the retry strategy described by this configuration.
    pub fn retry_strategy(&self) -> RetryStrategy {
        RetryStrategy::new(self.max_retries)
            .with_base_delay(self.retry_delay)
            .with_max_delay(self.max_retry_delay)
            .with_jitter(self.retry_jitter)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    bearer_token: Option<BearerToken>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_delay: Option<Duration>,
    max_retry_delay: Option<Duration>,
    retry_jitter: Option<f64>,
    verify_tls: Option<bool>,
    max_top: Option<u32>,
    config_file: ConfigFileSource,
    load_dotenv: bool,
}

impl ClientConfigBuilder {
    /// Sets the bearer token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(BearerToken::new(token));
        self
    }

    /// Sets the service root URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the retry budget.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the base retry delay.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the maximum retry delay.
    pub fn max_retry_delay(mut self, delay: Duration) -> Self {
        self.max_retry_delay = Some(delay);
        self
    }

    /// Sets the jitter factor (0.0 to 1.0).
    pub fn retry_jitter(mut self, jitter: f64) -> Self {
        self.retry_jitter = Some(jitter);
        self
    }

    /// Enables or disables TLS certificate verification.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Sets the largest accepted `$top` (1 to 200).
    pub fn max_top(mut self, max_top: u32) -> Self {
        self.max_top = Some(max_top);
        self
    }

    /// Reads settings from `path`. A missing file is an error.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = ConfigFileSource::Explicit(path.into());
        self
    }

    /// Reads settings from [`FileConfig::default_path`] if it exists.
    pub fn default_config_file(mut self) -> Self {
        self.config_file = ConfigFileSource::Default;
        self
    }

    /// Loads a `.env` file into the process environment before resolving.
    pub fn load_dotenv(mut self, enabled: bool) -> Self {
        self.load_dotenv = enabled;
        self
    }

    /// Resolves the configuration against the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] if no bearer token is found, or
    /// [`ApiError::Validation`] for an invalid URL, config file, or
    /// environment value.
    pub fn build(self) -> Result<ClientConfig, ApiError> {
        if self.load_dotenv {
            match dotenvy::dotenv() {
                Ok(path) => info!(path = %path.display(), "Loaded .env file"),
                Err(e) if e.not_found() => debug!("No .env file found"),
                Err(e) => return Err(ApiError::validation(format!("Invalid .env file: {e}"))),
            }
        }
        self.build_with_env(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration against an injected environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_env<F>(self, env: F) -> Result<ClientConfig, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &self.config_file {
            ConfigFileSource::None => FileConfig::default(),
            ConfigFileSource::Explicit(path) => FileConfig::load_from(path)?,
            ConfigFileSource::Default => {
                let path = FileConfig::default_path();
                if path.exists() {
                    FileConfig::load_from(&path)?
                } else {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    FileConfig::default()
                }
            }
        };
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let bearer_token = self
            .bearer_token
            .filter(|t| !t.is_empty())
            .or_else(|| lookup(ENV_BEARER_TOKEN).map(BearerToken::new))
            .or_else(|| file.bearer_token.as_deref().map(BearerToken::new))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApiError::authentication(format!(
                    "Bearer token is required. Pass it explicitly or set {ENV_BEARER_TOKEN}"
                ))
            })?;

        let base_url = self
            .base_url
            .or_else(|| lookup(ENV_BASE_URL))
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&base_url)?;

        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => parse_env::<u64>(&lookup, ENV_TIMEOUT_SECS)?
                .or(file.timeout_secs)
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        };
        if timeout.is_zero() {
            return Err(ApiError::validation("timeout must be greater than zero"));
        }

        let max_retries = match self.max_retries {
            Some(retries) => retries,
            None => parse_env::<u32>(&lookup, ENV_MAX_RETRIES)?
                .or(file.max_retries)
                .unwrap_or(DEFAULT_MAX_RETRIES),
        };

        let retry_delay = match self.retry_delay {
            Some(delay) => delay,
            None => parse_env::<u64>(&lookup, ENV_RETRY_DELAY_MS)?
                .or(file.retry_delay_ms)
                .map_or(DEFAULT_RETRY_DELAY, Duration::from_millis),
        };

        let max_retry_delay = self
            .max_retry_delay
            .or(file.max_retry_delay_ms.map(Duration::from_millis))
            .unwrap_or(DEFAULT_MAX_RETRY_DELAY);

        let retry_jitter = self
            .retry_jitter
            .or(file.retry_jitter)
            .unwrap_or(DEFAULT_RETRY_JITTER);
        if !(0.0..=1.0).contains(&retry_jitter) {
            return Err(ApiError::validation(format!(
                "retry_jitter must be between 0.0 and 1.0, got {retry_jitter}"
            )));
        }

        let verify_tls = match self.verify_tls {
            Some(verify) => verify,
            None => match lookup(ENV_VERIFY_TLS) {
                Some(raw) => parse_bool(ENV_VERIFY_TLS, &raw)?,
                None => file.verify_tls.unwrap_or(true),
            },
        };

        let max_top = self.max_top.or(file.max_top).unwrap_or(MAX_TOP);
        if max_top == 0 || max_top > MAX_TOP {
            return Err(ApiError::validation(format!(
                "max_top must be between 1 and {MAX_TOP}, got {max_top}"
            )));
        }

        info!(
            base_url = %base_url,
            timeout_secs = timeout.as_secs(),
            max_retries,
            verify_tls,
            "Resolved client configuration"
        );

        Ok(ClientConfig {
            bearer_token,
            base_url,
            timeout,
            max_retries,
            retry_delay,
            max_retry_delay,
            retry_jitter,
            verify_tls,
            max_top,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::validation(format!("Invalid base URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ApiError::validation(format!(
            "Base URL must be an absolute http(s) URL: {raw}"
        )));
    }
    Ok(url)
}

fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ApiError::validation(format!("Invalid {key} '{raw}': {e}")))
        })
        .transpose()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ApiError::validation(format!("Invalid {key} '{raw}': expected true or false"))),
    }
}

// ============================================================================
// Tests
// ============================================================================
