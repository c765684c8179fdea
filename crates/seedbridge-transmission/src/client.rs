//! Injection orchestration on top of the RPC facade.
//!
//! # Design
//!
//! - Lower layers fail with [`RpcError`](crate::RpcError); `inject` folds
//!   every such failure into [`InjectionOutcome::Failure`] and never returns
//!   an error.
//! - Not found, not complete, and duplicate are explicit values, not errors.
//! - `recheck_torrent` stops the torrent before verifying it so it stays
//!   paused once verification finishes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use seedbridge_config::{RuntimeConfigProvider, redact_url};
use tracing::{debug, error, info, warn};

use crate::error::RpcResult;
use crate::matching::{Decision, MatchRecheckPolicy, Metafile, RecheckPolicy, Searchee};
use crate::model::{
    DownloadDirError, DownloadDirOptions, InjectionOutcome, TorrentAddResponse, TorrentCompletion,
    TorrentField,
};
use crate::rpc::TransmissionRpc;

/// Operations a torrent-management tool needs from a daemon adapter.
#[async_trait]
pub trait TorrentClient: Send + Sync {
    /// Check the configuration and that the daemon answers.
    async fn validate_config(&self) -> RpcResult<()>;

    /// Resolve where the torrent identified by `info_hash` keeps its data.
    async fn get_download_dir(
        &self,
        info_hash: &str,
        options: DownloadDirOptions,
    ) -> Result<String, DownloadDirError>;

    /// Map every tracked info hash to its download directory.
    async fn get_all_download_dirs(&self) -> RpcResult<HashMap<String, String>>;

    /// Report whether the torrent identified by `info_hash` has finished.
    async fn is_torrent_complete(&self, info_hash: &str) -> RpcResult<TorrentCompletion>;

    /// Stop the torrent, then queue it for verification.
    async fn recheck_torrent(&self, info_hash: &str) -> RpcResult<()>;

    /// Add `new_torrent` alongside the data of `searchee`.
    async fn inject(
        &self,
        new_torrent: &dyn Metafile,
        searchee: &Searchee,
        decision: Decision,
        path: Option<&str>,
    ) -> InjectionOutcome;
}

/// [`TorrentClient`] backed by a Transmission daemon.
pub struct TransmissionClient {
    rpc: TransmissionRpc,
    config: Arc<dyn RuntimeConfigProvider>,
    recheck_policy: Arc<dyn RecheckPolicy>,
}

impl TransmissionClient {
    /// Build a client using [`MatchRecheckPolicy`] defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: Arc<dyn RuntimeConfigProvider>) -> RpcResult<Self> {
        Ok(Self {
            rpc: TransmissionRpc::new(Arc::clone(&config))?,
            config,
            recheck_policy: Arc::new(MatchRecheckPolicy::default()),
        })
    }

    /// Replace the policy deciding whether injected torrents start paused.
    #[must_use]
    pub fn with_recheck_policy(mut self, policy: Arc<dyn RecheckPolicy>) -> Self {
        self.recheck_policy = policy;
        self
    }

    async fn resolve_download_dir(
        &self,
        searchee: &Searchee,
        path: Option<&str>,
    ) -> Result<String, InjectionOutcome> {
        if let Some(path) = path {
            return Ok(path.to_string());
        }
        let Some(info_hash) = searchee.info_hash.as_deref() else {
            warn!(name = %searchee.name, "no download path supplied for data-based searchee");
            return Err(InjectionOutcome::Failure);
        };

        let options = DownloadDirOptions {
            only_completed: true,
        };
        self.get_download_dir(info_hash, options)
            .await
            .map_err(|err| match err {
                DownloadDirError::TorrentNotComplete => InjectionOutcome::TorrentNotComplete,
                DownloadDirError::NotFound | DownloadDirError::UnknownError => {
                    InjectionOutcome::Failure
                }
            })
    }
}

#[async_trait]
impl TorrentClient for TransmissionClient {
    async fn validate_config(&self) -> RpcResult<()> {
        let config = self.config.runtime_config();
        config.validate()?;
        self.rpc.session_check().await.inspect_err(|err| {
            error!(url = %redact_url(&config.rpc_url), "{err}");
            debug!(error = ?err, "daemon validation failure detail");
        })
    }

    async fn get_download_dir(
        &self,
        info_hash: &str,
        options: DownloadDirOptions,
    ) -> Result<String, DownloadDirError> {
        let torrents = self
            .rpc
            .torrent_query(
                &[TorrentField::DownloadDir, TorrentField::PercentDone],
                &[info_hash],
            )
            .await
            .map_err(|err| {
                debug!(info_hash, error = %err, "download directory lookup failed");
                DownloadDirError::UnknownError
            })?;

        let Some(torrent) = torrents.into_iter().next() else {
            return Err(DownloadDirError::NotFound);
        };
        if options.only_completed && !torrent.is_complete() {
            return Err(DownloadDirError::TorrentNotComplete);
        }
        torrent.download_dir.ok_or(DownloadDirError::UnknownError)
    }

    async fn get_all_download_dirs(&self) -> RpcResult<HashMap<String, String>> {
        let torrents = self
            .rpc
            .torrent_query_all(&[TorrentField::HashString, TorrentField::DownloadDir])
            .await?;
        Ok(torrents
            .into_iter()
            .filter_map(|torrent| Some((torrent.hash_string?, torrent.download_dir?)))
            .collect())
    }

    async fn is_torrent_complete(&self, info_hash: &str) -> RpcResult<TorrentCompletion> {
        let torrents = self
            .rpc
            .torrent_query(&[TorrentField::PercentDone], &[info_hash])
            .await?;
        Ok(match torrents.first() {
            None => TorrentCompletion::NotFound,
            Some(torrent) if torrent.is_complete() => TorrentCompletion::Complete,
            Some(_) => TorrentCompletion::Incomplete,
        })
    }

    async fn recheck_torrent(&self, info_hash: &str) -> RpcResult<()> {
        let ids = [info_hash];
        self.rpc.torrent_stop(&ids).await?;
        self.rpc.torrent_verify(&ids).await?;
        info!(info_hash, "torrent stopped and queued for verification");
        Ok(())
    }

    async fn inject(
        &self,
        new_torrent: &dyn Metafile,
        searchee: &Searchee,
        decision: Decision,
        path: Option<&str>,
    ) -> InjectionOutcome {
        let download_dir = match self.resolve_download_dir(searchee, path).await {
            Ok(dir) => dir,
            Err(outcome) => {
                info!(name = %searchee.name, %outcome, "download directory unavailable");
                return outcome;
            }
        };

        let metainfo = general_purpose::STANDARD.encode(new_torrent.encode());
        let paused = self.recheck_policy.should_recheck(searchee, decision);
        let labels = [self.config.runtime_config().torrent_tag];

        match self
            .rpc
            .torrent_add(&download_dir, &metainfo, paused, &labels)
            .await
        {
            Ok(TorrentAddResponse::Duplicate(torrent)) => {
                info!(info_hash = %torrent.hash_string, name = %torrent.name, "torrent already present");
                InjectionOutcome::AlreadyExists
            }
            Ok(TorrentAddResponse::Added(torrent)) => {
                info!(
                    info_hash = %torrent.hash_string,
                    name = %torrent.name,
                    download_dir = %download_dir,
                    paused,
                    "torrent injected"
                );
                InjectionOutcome::Success
            }
            Err(err) => {
                warn!(name = %searchee.name, error = %err, "torrent-add failed");
                InjectionOutcome::Failure
            }
        }
    }
}
