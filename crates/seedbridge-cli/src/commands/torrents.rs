//! Per-torrent commands: completion, download directory, recheck, and injection.

use anyhow::anyhow;
use seedbridge_transmission::{DownloadDirOptions, InjectionOutcome, RawMetafile, Searchee};

use crate::cli::{DownloadDirArgs, HashArgs, InjectArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_completion, render_download_dir, render_outcome};

pub(crate) async fn handle_complete(
    ctx: &AppContext,
    args: &HashArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let info_hash = require_hash(&args.info_hash)?;
    let completion = ctx
        .client
        .is_torrent_complete(info_hash)
        .await
        .map_err(CliError::failure)?;
    render_completion(info_hash, completion, format)
}

pub(crate) async fn handle_download_dir(
    ctx: &AppContext,
    args: &DownloadDirArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let info_hash = require_hash(&args.info_hash)?;
    let options = DownloadDirOptions {
        only_completed: args.only_completed,
    };
    let dir = ctx
        .client
        .get_download_dir(info_hash, options)
        .await
        .map_err(|err| CliError::failure(anyhow!("{info_hash}: {err}")))?;
    render_download_dir(info_hash, &dir, format)
}

pub(crate) async fn handle_recheck(ctx: &AppContext, args: &HashArgs) -> CliResult<()> {
    let info_hash = require_hash(&args.info_hash)?;
    ctx.client
        .recheck_torrent(info_hash)
        .await
        .map_err(CliError::failure)?;
    println!("{info_hash}: recheck queued");
    Ok(())
}

pub(crate) async fn handle_inject(
    ctx: &AppContext,
    args: InjectArgs,
    format: OutputFormat,
) -> CliResult<()> {
    if args.searchee_hash.is_none() && args.path.is_none() {
        return Err(CliError::validation("either --searchee-hash or --path is required"));
    }

    let bytes = std::fs::read(&args.torrent).map_err(|err| {
        CliError::failure(anyhow!(
            "failed to read torrent file '{}': {err}",
            args.torrent.display()
        ))
    })?;

    let name = args
        .searchee_name
        .or_else(|| {
            args.torrent
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "<unnamed>".to_string());
    let searchee = match args.searchee_hash {
        Some(hash) => Searchee::from_torrent(require_hash(&hash)?, name),
        None => Searchee::from_data(name),
    };

    let outcome = ctx
        .client
        .inject(
            &RawMetafile::new(bytes),
            &searchee,
            args.decision.into(),
            args.path.as_deref(),
        )
        .await;
    render_outcome(outcome, format)?;

    match outcome {
        InjectionOutcome::Success | InjectionOutcome::AlreadyExists => Ok(()),
        InjectionOutcome::TorrentNotComplete => Err(CliError::failure(anyhow!(
            "original torrent has not finished downloading"
        ))),
        InjectionOutcome::Failure => Err(CliError::failure(anyhow!("injection failed"))),
    }
}

fn require_hash(raw: &str) -> CliResult<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation("info hash must not be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;

    use httpmock::prelude::*;
    use seedbridge_config::RuntimeConfig;
    use seedbridge_test_support::fixtures::{rejected, request, success, torrent_added, torrents};
    use seedbridge_test_support::mocks::{SESSION_TOKEN, mock_rpc, mock_session_challenge, rpc_url};
    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::cli::DecisionArg;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    fn context_for(server: &MockServer, skip_recheck: bool) -> AppContext {
        AppContext::from_config(
            Arc::new(RuntimeConfig::new(rpc_url(server))),
            skip_recheck,
        )
        .expect("context should build")
    }

    fn torrent_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"data").expect("write torrent bytes");
        file
    }

    fn inject_args(torrent: PathBuf) -> InjectArgs {
        InjectArgs {
            torrent,
            searchee_hash: None,
            searchee_name: Some("Show.S01".to_string()),
            decision: DecisionArg::Match,
            path: Some("/data".to_string()),
            skip_recheck: false,
        }
    }

    fn add_request(paused: bool) -> serde_json::Value {
        request(
            "torrent-add",
            json!({
                "download-dir": "/data",
                "metainfo": "ZGF0YQ==",
                "paused": paused,
                "labels": ["cross-seed"],
            }),
        )
    }

    #[tokio::test]
    async fn inject_data_searchee_rechecks_by_default() {
        let server = MockServer::start_async().await;
        let _challenge = mock_session_challenge(&server, SESSION_TOKEN);
        let add = mock_rpc(
            &server,
            SESSION_TOKEN,
            add_request(true),
            success(torrent_added(HASH, 4, "Show.S01")),
        );
        let file = torrent_file();

        handle_inject(
            &context_for(&server, false),
            inject_args(file.path().to_path_buf()),
            OutputFormat::Table,
        )
        .await
        .expect("injection should succeed");
        add.assert();
    }

    #[tokio::test]
    async fn inject_skip_recheck_adds_unpaused() {
        let server = MockServer::start_async().await;
        let _challenge = mock_session_challenge(&server, SESSION_TOKEN);
        let add = mock_rpc(
            &server,
            SESSION_TOKEN,
            add_request(false),
            success(torrent_added(HASH, 4, "Show.S01")),
        );
        let file = torrent_file();

        handle_inject(
            &context_for(&server, true),
            inject_args(file.path().to_path_buf()),
            OutputFormat::Json,
        )
        .await
        .expect("injection should succeed");
        add.assert();
    }

    #[tokio::test]
    async fn inject_failure_exits_with_failure_code() {
        let server = MockServer::start_async().await;
        let _challenge = mock_session_challenge(&server, SESSION_TOKEN);
        let _add = mock_rpc(
            &server,
            SESSION_TOKEN,
            add_request(true),
            rejected("invalid or corrupt torrent file"),
        );
        let file = torrent_file();

        let err = handle_inject(
            &context_for(&server, false),
            inject_args(file.path().to_path_buf()),
            OutputFormat::Table,
        )
        .await
        .expect_err("rejection should fail");
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn inject_requires_hash_or_path() {
        let server = MockServer::start_async().await;
        let mut args = inject_args(PathBuf::from("missing.torrent"));
        args.path = None;

        let err = handle_inject(&context_for(&server, false), args, OutputFormat::Table)
            .await
            .expect_err("missing location should be rejected");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn inject_reports_unreadable_torrent_file() {
        let server = MockServer::start_async().await;
        let err = handle_inject(
            &context_for(&server, false),
            inject_args(PathBuf::from("/nonexistent/show.torrent")),
            OutputFormat::Table,
        )
        .await
        .expect_err("missing file should fail");
        assert!(err.display_message().contains("failed to read torrent file"));
    }

    #[tokio::test]
    async fn download_dir_reports_incomplete_torrent() {
        let server = MockServer::start_async().await;
        let _challenge = mock_session_challenge(&server, SESSION_TOKEN);
        let _query = mock_rpc(
            &server,
            SESSION_TOKEN,
            request(
                "torrent-get",
                json!({ "fields": ["downloadDir", "percentDone"], "ids": [HASH] }),
            ),
            success(torrents(json!([{ "downloadDir": "/data", "percentDone": 0.25 }]))),
        );

        let err = handle_download_dir(
            &context_for(&server, false),
            &DownloadDirArgs {
                info_hash: HASH.to_string(),
                only_completed: true,
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("incomplete torrent should fail");
        assert_eq!(
            err.display_message(),
            format!("{HASH}: torrent not complete")
        );
    }

    #[tokio::test]
    async fn complete_renders_completion_state() {
        let server = MockServer::start_async().await;
        let _challenge = mock_session_challenge(&server, SESSION_TOKEN);
        let query = mock_rpc(
            &server,
            SESSION_TOKEN,
            request("torrent-get", json!({ "fields": ["percentDone"], "ids": [HASH] })),
            success(torrents(json!([{ "percentDone": 1 }]))),
        );

        handle_complete(
            &context_for(&server, false),
            &HashArgs {
                info_hash: HASH.to_string(),
            },
            OutputFormat::Json,
        )
        .await
        .expect("completion lookup should succeed");
        query.assert();
    }

    #[tokio::test]
    async fn recheck_rejects_blank_hash() {
        let server = MockServer::start_async().await;
        let err = handle_recheck(
            &context_for(&server, false),
            &HashArgs {
                info_hash: "  ".to_string(),
            },
        )
        .await
        .expect_err("blank hash should be rejected");
        assert_eq!(err.exit_code(), 2);
    }
}
