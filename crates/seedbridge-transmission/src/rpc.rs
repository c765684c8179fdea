//! Typed wrappers over the daemon's RPC methods.

use std::sync::Arc;

use seedbridge_config::{RuntimeConfigProvider, redact_url};
use serde::Serialize;
use serde::de::IgnoredAny;

use crate::error::{RpcError, RpcResult};
use crate::model::{TorrentAddResponse, TorrentField, TorrentGetResponse, TorrentSummary};
use crate::session::SessionNegotiator;
use crate::transport::Transport;

/// `session-get`: daemon session settings, used as a reachability probe.
pub const METHOD_SESSION_GET: &str = "session-get";
/// `torrent-get`: torrent attributes by info hash.
pub const METHOD_TORRENT_GET: &str = "torrent-get";
/// `torrent-stop`: pause torrents.
pub const METHOD_TORRENT_STOP: &str = "torrent-stop";
/// `torrent-verify`: re-hash torrent data on disk.
pub const METHOD_TORRENT_VERIFY: &str = "torrent-verify";
/// `torrent-add`: add a torrent from base64 metainfo.
pub const METHOD_TORRENT_ADD: &str = "torrent-add";

#[derive(Serialize)]
struct NoArguments {}

#[derive(Serialize)]
struct TorrentGetArguments<'a> {
    fields: &'a [TorrentField],
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<&'a [&'a str]>,
}

#[derive(Serialize)]
struct TorrentIdsArguments<'a> {
    ids: &'a [&'a str],
}

#[derive(Serialize)]
struct TorrentAddArguments<'a> {
    #[serde(rename = "download-dir")]
    download_dir: &'a str,
    metainfo: &'a str,
    paused: bool,
    labels: &'a [String],
}

/// RPC facade for one Transmission daemon.
pub struct TransmissionRpc {
    session: SessionNegotiator,
}

impl TransmissionRpc {
    /// Build a facade reading connection settings from `config` on every call.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(config: Arc<dyn RuntimeConfigProvider>) -> RpcResult<Self> {
        Ok(Self {
            session: SessionNegotiator::new(Transport::new(config)?),
        })
    }

    /// Probe the daemon with `session-get`.
    ///
    /// # Errors
    ///
    /// Configuration failures are returned as-is; every other failure is
    /// wrapped in [`RpcError::Unreachable`] naming the credential-free URL.
    pub async fn session_check(&self) -> RpcResult<()> {
        match self
            .session
            .call::<_, IgnoredAny>(METHOD_SESSION_GET, &NoArguments {})
            .await
        {
            Ok(_) => Ok(()),
            Err(err @ RpcError::Config { .. }) => Err(err),
            Err(source) => Err(RpcError::Unreachable {
                url: redact_url(&self.session.config().runtime_config().rpc_url),
                source: Box::new(source),
            }),
        }
    }

    /// Fetch `fields` for the torrents in `ids`; an empty list means none matched.
    ///
    /// # Errors
    ///
    /// Returns any transport, protocol, or daemon failure.
    pub async fn torrent_query(
        &self,
        fields: &[TorrentField],
        ids: &[&str],
    ) -> RpcResult<Vec<TorrentSummary>> {
        self.query(fields, Some(ids)).await
    }

    /// Fetch `fields` for every torrent the daemon tracks.
    ///
    /// # Errors
    ///
    /// Returns any transport, protocol, or daemon failure.
    pub async fn torrent_query_all(&self, fields: &[TorrentField]) -> RpcResult<Vec<TorrentSummary>> {
        self.query(fields, None).await
    }

    /// Stop (pause) the torrents in `ids`.
    ///
    /// # Errors
    ///
    /// Returns any transport, protocol, or daemon failure.
    pub async fn torrent_stop(&self, ids: &[&str]) -> RpcResult<()> {
        self.session
            .call::<_, IgnoredAny>(METHOD_TORRENT_STOP, &TorrentIdsArguments { ids })
            .await
            .map(drop)
    }

    /// Queue the torrents in `ids` for verification.
    ///
    /// # Errors
    ///
    /// Returns any transport, protocol, or daemon failure.
    pub async fn torrent_verify(&self, ids: &[&str]) -> RpcResult<()> {
        self.session
            .call::<_, IgnoredAny>(METHOD_TORRENT_VERIFY, &TorrentIdsArguments { ids })
            .await
            .map(drop)
    }

    /// Add a torrent from base64-encoded metainfo.
    ///
    /// # Errors
    ///
    /// Returns any transport, protocol, or daemon failure. A duplicate is not
    /// an error; it decodes to [`TorrentAddResponse::Duplicate`].
    pub async fn torrent_add(
        &self,
        download_dir: &str,
        metainfo_base64: &str,
        paused: bool,
        labels: &[String],
    ) -> RpcResult<TorrentAddResponse> {
        let arguments = TorrentAddArguments {
            download_dir,
            metainfo: metainfo_base64,
            paused,
            labels,
        };
        self.session.call(METHOD_TORRENT_ADD, &arguments).await
    }

    async fn query(
        &self,
        fields: &[TorrentField],
        ids: Option<&[&str]>,
    ) -> RpcResult<Vec<TorrentSummary>> {
        let arguments = TorrentGetArguments { fields, ids };
        let response: TorrentGetResponse =
            self.session.call(METHOD_TORRENT_GET, &arguments).await?;
        Ok(response.torrents)
    }
}
