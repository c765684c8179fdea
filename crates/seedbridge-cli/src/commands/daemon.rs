//! Daemon-wide commands: configuration validation and the directory listing.

use seedbridge_transmission::RpcError;
use tracing::info;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_download_dirs;

pub(crate) async fn handle_validate(ctx: &AppContext) -> CliResult<()> {
    ctx.client.validate_config().await.map_err(|err| match err {
        RpcError::Config { .. } => CliError::validation(format!("invalid configuration: {err}")),
        other => CliError::failure(other),
    })?;
    info!("daemon configuration validated");
    println!("daemon reachable");
    Ok(())
}

pub(crate) async fn handle_download_dirs(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let dirs = ctx
        .client
        .get_all_download_dirs()
        .await
        .map_err(CliError::failure)?;
    render_download_dirs(&dirs, format)
}
