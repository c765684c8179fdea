//! Runtime configuration consumed by the daemon adapter.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::credentials::extract_credentials;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable holding the daemon RPC URL.
pub const ENV_RPC_URL: &str = "SEEDBRIDGE_RPC_URL";
/// Environment variable holding the label applied to injected torrents.
pub const ENV_TORRENT_TAG: &str = "SEEDBRIDGE_TORRENT_TAG";
/// Environment variable holding the per-request timeout in seconds.
pub const ENV_RPC_TIMEOUT_SECS: &str = "SEEDBRIDGE_RPC_TIMEOUT_SECS";

/// Label applied to injected torrents when none is configured.
pub const DEFAULT_TORRENT_TAG: &str = "cross-seed";
/// Per-request timeout applied when none is configured.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a single daemon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    /// RPC endpoint, optionally carrying percent-encoded basic-auth credentials.
    pub rpc_url: String,
    /// Label attached to every torrent this process injects.
    #[serde(default = "default_torrent_tag")]
    pub torrent_tag: String,
    /// Deadline for a single HTTP exchange with the daemon.
    #[serde(default = "default_rpc_timeout", with = "duration_secs")]
    pub rpc_timeout: Duration,
}

impl RuntimeConfig {
    /// Build a configuration with default tag and timeout.
    #[must_use]
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            torrent_tag: default_torrent_tag(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }

    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when the RPC URL is missing or a value fails validation.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error when the RPC URL is missing or a value fails validation.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup(ENV_RPC_URL)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingField { field: "rpc_url" })?;

        let torrent_tag = lookup(ENV_TORRENT_TAG).unwrap_or_else(|| {
            debug!(tag = DEFAULT_TORRENT_TAG, "torrent tag not configured; using default");
            default_torrent_tag()
        });

        let rpc_timeout = match lookup(ENV_RPC_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_RPC_TIMEOUT,
        };

        let config = Self {
            rpc_url,
            torrent_tag,
            rpc_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every field holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure encountered.
    pub fn validate(&self) -> ConfigResult<()> {
        extract_credentials(&self.rpc_url)?;
        if self.torrent_tag.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "torrent_tag",
                value: Some(self.torrent_tag.clone()),
                reason: "must not be empty",
            });
        }
        if self.rpc_timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "rpc_timeout",
                value: Some("0".to_string()),
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

/// Source of the process-wide runtime configuration.
///
/// The adapter reads the configuration once per RPC call, so implementations
/// that swap their value are observed by the next request.
pub trait RuntimeConfigProvider: Send + Sync {
    /// Current configuration snapshot.
    fn runtime_config(&self) -> RuntimeConfig;
}

impl RuntimeConfigProvider for RuntimeConfig {
    fn runtime_config(&self) -> RuntimeConfig {
        self.clone()
    }
}

/// Configuration handle that can be replaced while clients hold it.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    inner: Arc<RwLock<RuntimeConfig>>,
}

impl SharedConfig {
    /// Wrap an initial configuration.
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Replace the configuration observed by subsequent calls.
    pub fn replace(&self, config: RuntimeConfig) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = config;
    }
}

impl RuntimeConfigProvider for SharedConfig {
    fn runtime_config(&self) -> RuntimeConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn parse_timeout(raw: &str) -> ConfigResult<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidField {
            field: "rpc_timeout",
            value: Some(raw.to_string()),
            reason: "must be a whole number of seconds",
        })?;
    Ok(Duration::from_secs(secs))
}

fn default_torrent_tag() -> String {
    DEFAULT_TORRENT_TAG.to_string()
}

const fn default_rpc_timeout() -> Duration {
    DEFAULT_RPC_TIMEOUT
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_applies_defaults() -> ConfigResult<()> {
        let config = RuntimeConfig::from_lookup(lookup_from(&[(
            ENV_RPC_URL,
            "http://localhost:9091/transmission/rpc",
        )]))?;
        assert_eq!(config.torrent_tag, DEFAULT_TORRENT_TAG);
        assert_eq!(config.rpc_timeout, DEFAULT_RPC_TIMEOUT);
        Ok(())
    }

    #[test]
    fn from_lookup_reads_overrides() -> ConfigResult<()> {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            (ENV_RPC_URL, "http://localhost:9091/transmission/rpc"),
            (ENV_TORRENT_TAG, "xseed"),
            (ENV_RPC_TIMEOUT_SECS, "30"),
        ]))?;
        assert_eq!(config.torrent_tag, "xseed");
        assert_eq!(config.rpc_timeout, Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn from_env_reads_process_environment() {
        let from_env = RuntimeConfig::from_env();
        let from_lookup = RuntimeConfig::from_lookup(|key| std::env::var(key).ok());
        match std::env::var(ENV_RPC_URL) {
            Ok(url) if !url.trim().is_empty() => {
                assert_eq!(from_env.ok(), from_lookup.ok());
            }
            _ => assert!(matches!(
                from_env,
                Err(ConfigError::MissingField { field: "rpc_url" })
            )),
        }
    }

    #[test]
    fn from_lookup_requires_rpc_url() {
        let err = RuntimeConfig::from_lookup(lookup_from(&[(ENV_TORRENT_TAG, "xseed")]))
            .expect_err("missing URL should fail");
        assert!(matches!(err, ConfigError::MissingField { field: "rpc_url" }));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = RuntimeConfig::from_lookup(lookup_from(&[
            (ENV_RPC_URL, "http://localhost:9091/transmission/rpc"),
            (ENV_RPC_TIMEOUT_SECS, "soon"),
        ]))
        .expect_err("non-numeric timeout should fail");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "rpc_timeout",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_empty_tag_and_zero_timeout() {
        let mut config = RuntimeConfig::new("http://localhost:9091/transmission/rpc");
        config.torrent_tag = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = RuntimeConfig::new("http://localhost:9091/transmission/rpc");
        config.rpc_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: RuntimeConfig = serde_json::from_value(serde_json::json!({
            "rpc_url": "http://localhost:9091/transmission/rpc",
            "rpc_timeout": 5
        }))
        .expect("config should deserialize");
        assert_eq!(config.torrent_tag, DEFAULT_TORRENT_TAG);
        assert_eq!(config.rpc_timeout, Duration::from_secs(5));
    }

    #[test]
    fn shared_config_observes_replacement() {
        let shared = SharedConfig::new(RuntimeConfig::new("http://one:9091/transmission/rpc"));
        let handle = shared.clone();
        handle.replace(RuntimeConfig::new("http://two:9091/transmission/rpc"));
        assert_eq!(
            shared.runtime_config().rpc_url,
            "http://two:9091/transmission/rpc"
        );
    }
}
