//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use seedbridge_config::{
    DEFAULT_RPC_TIMEOUT, DEFAULT_TORRENT_TAG, ENV_RPC_TIMEOUT_SECS, ENV_RPC_URL, ENV_TORRENT_TAG,
    redact_url,
};
use seedbridge_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use seedbridge_transmission::Decision;
use tracing::{debug, info};

use crate::client::{AppContext, CliResult};
use crate::commands::daemon::{handle_download_dirs, handle_validate};
use crate::commands::torrents::{handle_complete, handle_download_dir, handle_inject, handle_recheck};

const DEFAULT_TIMEOUT_SECS: u64 = DEFAULT_RPC_TIMEOUT.as_secs();
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9091/transmission/rpc";

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("SEEDBRIDGE_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let command = command_label(&cli.command);
    info!(command, rpc_url = %redact_url(&cli.rpc_url), "running command");

    match dispatch(cli).await {
        Ok(()) => {
            debug!(command, "command completed");
            0
        }
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let skip_recheck = matches!(&cli.command, Command::Inject(args) if args.skip_recheck);
    let ctx = AppContext::from_cli(&cli, skip_recheck)?;

    match cli.command {
        Command::Validate => handle_validate(&ctx).await,
        Command::Complete(args) => handle_complete(&ctx, &args, cli.output).await,
        Command::DownloadDir(args) => handle_download_dir(&ctx, &args, cli.output).await,
        Command::DownloadDirs => handle_download_dirs(&ctx, cli.output).await,
        Command::Recheck(args) => handle_recheck(&ctx, &args).await,
        Command::Inject(args) => handle_inject(&ctx, args, cli.output).await,
    }
}

#[derive(Parser)]
#[command(
    name = "seedbridge",
    about = "Inject cross-seed torrents into a Transmission daemon"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, env = ENV_RPC_URL, default_value = DEFAULT_RPC_URL)]
    pub(crate) rpc_url: String,
    #[arg(long, global = true, env = ENV_TORRENT_TAG, default_value = DEFAULT_TORRENT_TAG)]
    pub(crate) tag: String,
    #[arg(
        long,
        global = true,
        env = ENV_RPC_TIMEOUT_SECS,
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "SEEDBRIDGE_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[arg(
        long,
        global = true,
        env = "SEEDBRIDGE_LOG_FORMAT",
        value_parser = parse_log_format
    )]
    log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the configuration and that the daemon answers.
    Validate,
    /// Report whether a torrent has finished downloading.
    Complete(HashArgs),
    /// Print where a torrent keeps its data.
    DownloadDir(DownloadDirArgs),
    /// Print the download directory of every tracked torrent.
    DownloadDirs,
    /// Stop a torrent and queue it for verification.
    Recheck(HashArgs),
    /// Add a torrent alongside the data of an existing one.
    Inject(InjectArgs),
}

#[derive(Args)]
pub(crate) struct HashArgs {
    /// Info hash of the torrent.
    pub(crate) info_hash: String,
}

#[derive(Args)]
pub(crate) struct DownloadDirArgs {
    /// Info hash of the torrent.
    pub(crate) info_hash: String,
    /// Fail when the torrent has not finished downloading.
    #[arg(long)]
    pub(crate) only_completed: bool,
}

#[derive(Args)]
pub(crate) struct InjectArgs {
    /// Path to the `.torrent` file to add.
    #[arg(long)]
    pub(crate) torrent: PathBuf,
    /// Info hash of the already-tracked torrent whose data is reused.
    #[arg(long)]
    pub(crate) searchee_hash: Option<String>,
    /// Display name of the searchee; defaults to the torrent file name.
    #[arg(long)]
    pub(crate) searchee_name: Option<String>,
    /// How closely the torrent matched the searchee.
    #[arg(long, value_enum, default_value_t = DecisionArg::Match)]
    pub(crate) decision: DecisionArg,
    /// Download directory to use instead of looking one up.
    #[arg(long)]
    pub(crate) path: Option<String>,
    /// Start exact data-based matches without a recheck.
    #[arg(long)]
    pub(crate) skip_recheck: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DecisionArg {
    Match,
    MatchSizeOnly,
    MatchPartial,
}

impl From<DecisionArg> for Decision {
    fn from(value: DecisionArg) -> Self {
        match value {
            DecisionArg::Match => Self::Match,
            DecisionArg::MatchSizeOnly => Self::MatchSizeOnly,
            DecisionArg::MatchPartial => Self::MatchPartial,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Validate => "validate",
        Command::Complete(_) => "complete",
        Command::DownloadDir(_) => "download_dir",
        Command::DownloadDirs => "download_dirs",
        Command::Recheck(_) => "recheck",
        Command::Inject(_) => "inject",
    }
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn inject_arguments_parse_with_defaults() {
        let cli = Cli::try_parse_from([
            "seedbridge",
            "--rpc-url",
            "http://127.0.0.1:9091/transmission/rpc",
            "inject",
            "--torrent",
            "/tmp/show.torrent",
            "--searchee-hash",
            "abc",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.tag, DEFAULT_TORRENT_TAG);
        assert_eq!(Duration::from_secs(cli.timeout), DEFAULT_RPC_TIMEOUT);
        assert_eq!(cli.output, OutputFormat::Table);
        let Command::Inject(args) = cli.command else {
            panic!("expected inject command");
        };
        assert_eq!(args.decision, DecisionArg::Match);
        assert_eq!(args.searchee_hash.as_deref(), Some("abc"));
        assert!(!args.skip_recheck);
    }

    #[test]
    fn decision_values_use_kebab_case() {
        let cli = Cli::try_parse_from([
            "seedbridge",
            "inject",
            "--torrent",
            "a.torrent",
            "--path",
            "/data",
            "--decision",
            "match-size-only",
            "--skip-recheck",
        ])
        .expect("arguments should parse");
        let Command::Inject(args) = cli.command else {
            panic!("expected inject command");
        };
        assert_eq!(Decision::from(args.decision), Decision::MatchSizeOnly);
        assert!(args.skip_recheck);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let parsed = Cli::try_parse_from(["seedbridge", "--log-format", "xml", "validate"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "seedbridge",
            "download-dir",
            "abc",
            "--only-completed",
            "--output",
            "json",
            "--tag",
            "linked",
        ])
        .expect("arguments should parse");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.tag, "linked");
        assert_eq!(command_label(&cli.command), "download_dir");
    }

    #[tokio::test]
    async fn dispatch_rejects_invalid_configuration() {
        let cli = Cli::try_parse_from(["seedbridge", "--rpc-url", "ftp://host/rpc", "validate"])
            .expect("arguments should parse");
        let err = dispatch(cli).await.expect_err("scheme should be rejected");
        assert_eq!(err.exit_code(), 2);
    }
}
