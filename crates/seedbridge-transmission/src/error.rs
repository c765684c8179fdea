//! Error types for daemon RPC operations.
//!
//! # Design
//!
//! - Each failure class stays a distinct variant so callers can tell a
//!   misconfiguration from a network fault, a garbled response, or a daemon
//!   refusal.
//! - Daemon-reported messages are carried verbatim in [`RpcError::Rejected`].
//! - Domain outcomes (not found, incomplete, duplicate) are never errors; they
//!   live in [`crate::model`].

use seedbridge_config::ConfigError;
use thiserror::Error;

/// Primary error type for RPC exchanges with the daemon.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The connection settings are unusable; retrying cannot help.
    #[error("invalid daemon connection configuration")]
    Config {
        /// Underlying configuration failure.
        #[from]
        source: ConfigError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    ClientBuild {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The HTTP exchange failed (connection refused, timeout, truncated body).
    #[error("request to daemon failed")]
    Network {
        /// RPC method being invoked.
        method: &'static str,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The daemon answered the refreshed session token with another challenge.
    #[error("daemon rejected the refreshed session token")]
    SessionChallenge {
        /// RPC method being invoked.
        method: &'static str,
    },
    /// The response body was not a JSON RPC envelope.
    #[error("daemon returned a non-JSON response")]
    InvalidResponse {
        /// RPC method being invoked.
        method: &'static str,
        /// HTTP status of the response.
        status: u16,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The envelope was valid but its arguments had an unexpected shape.
    #[error("daemon response arguments had an unexpected shape")]
    UnexpectedArguments {
        /// RPC method being invoked.
        method: &'static str,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The daemon reported an error in the envelope `result` field.
    #[error("daemon responded with error: \"{result}\"")]
    Rejected {
        /// RPC method being invoked.
        method: &'static str,
        /// Error string reported by the daemon.
        result: String,
    },
    /// The reachability probe failed.
    #[error("daemon unreachable at {url}")]
    Unreachable {
        /// RPC URL with credentials removed.
        url: String,
        /// Failure that made the daemon unreachable.
        #[source]
        source: Box<RpcError>,
    },
}

impl RpcError {
    /// RPC method the failure is attributed to, when known.
    #[must_use]
    pub fn method(&self) -> Option<&'static str> {
        match self {
            Self::Network { method, .. }
            | Self::SessionChallenge { method }
            | Self::InvalidResponse { method, .. }
            | Self::UnexpectedArguments { method, .. }
            | Self::Rejected { method, .. } => Some(*method),
            Self::Unreachable { source, .. } => source.method(),
            Self::Config { .. } | Self::ClientBuild { .. } => None,
        }
    }
}

/// Convenience alias for RPC results.
pub type RpcResult<T> = Result<T, RpcError>;
