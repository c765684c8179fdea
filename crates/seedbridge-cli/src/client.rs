//! CLI error type and the daemon client context shared by command handlers.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use seedbridge_config::{RuntimeConfig, RuntimeConfigProvider};
use seedbridge_transmission::{MatchRecheckPolicy, TorrentClient, TransmissionClient};

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) client: Arc<dyn TorrentClient>,
}

impl AppContext {
    /// Validate the global flags and build a daemon client from them.
    pub(crate) fn from_cli(cli: &Cli, skip_recheck: bool) -> CliResult<Self> {
        let config = runtime_config(cli);
        config
            .validate()
            .map_err(|err| CliError::validation(format!("invalid configuration: {err}")))?;
        Self::from_config(Arc::new(config), skip_recheck)
    }

    pub(crate) fn from_config(
        config: Arc<dyn RuntimeConfigProvider>,
        skip_recheck: bool,
    ) -> CliResult<Self> {
        let client = TransmissionClient::new(config)
            .map_err(|err| CliError::failure(anyhow!("failed to build daemon client: {err}")))?
            .with_recheck_policy(Arc::new(MatchRecheckPolicy { skip_recheck }));
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

fn runtime_config(cli: &Cli) -> RuntimeConfig {
    let mut config = RuntimeConfig::new(cli.rpc_url.clone());
    config.torrent_tag.clone_from(&cli.tag);
    config.rpc_timeout = Duration::from_secs(cli.timeout);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_validation_from_failure() {
        assert_eq!(CliError::validation("bad flag").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 3);
    }

    #[test]
    fn failure_message_includes_context_chain() {
        let err = CliError::failure(anyhow!("root cause").context("outer"));
        assert_eq!(err.display_message(), "outer: root cause");
    }
}
