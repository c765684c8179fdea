//! Error types for configuration operations.

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The RPC URL could not be parsed.
    #[error("invalid RPC URL")]
    InvalidUrl {
        /// Offending URL with any credentials removed.
        value: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The RPC URL used a scheme other than `http` or `https`.
    #[error("unsupported RPC URL scheme")]
    UnsupportedScheme {
        /// Scheme supplied by the caller.
        scheme: String,
    },
    /// Credentials embedded in the RPC URL were not valid percent-encoding.
    #[error("RPC URL credentials must be percent-encoded")]
    CredentialsNotPercentEncoded {
        /// Credential component that failed to decode.
        field: &'static str,
    },
    /// A required setting was not supplied.
    #[error("missing configuration field")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// A setting contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
