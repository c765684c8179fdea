//! Wire shapes and domain outcomes for the Transmission RPC surface.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Torrent attributes that can be requested from `torrent-get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TorrentField {
    /// Info hash as a lowercase hex string.
    HashString,
    /// Directory the torrent's data lives in.
    DownloadDir,
    /// Completion ratio in `[0, 1]`.
    PercentDone,
}

/// One torrent as reported by `torrent-get`; only requested fields are present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentSummary {
    /// Info hash, when requested.
    pub hash_string: Option<String>,
    /// Download directory, when requested.
    pub download_dir: Option<String>,
    /// Completion ratio, when requested.
    pub percent_done: Option<f64>,
}

impl TorrentSummary {
    /// Whether every piece has been downloaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.percent_done.is_some_and(|done| done >= 1.0)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TorrentGetResponse {
    #[serde(default)]
    pub(crate) torrents: Vec<TorrentSummary>,
}

/// Identity of a torrent returned by `torrent-add`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentRef {
    /// Info hash as a lowercase hex string.
    pub hash_string: String,
    /// Daemon-local numeric identifier.
    pub id: i64,
    /// Torrent display name.
    pub name: String,
}

/// Result of `torrent-add`.
///
/// The daemon signals the variant by which key it sets (`torrent-added` or
/// `torrent-duplicate`). A duplicate takes precedence if both are present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTorrentAdd")]
pub enum TorrentAddResponse {
    /// The torrent was new and has been added.
    Added(TorrentRef),
    /// The daemon already tracks a torrent with this info hash.
    Duplicate(TorrentRef),
}

impl TorrentAddResponse {
    /// Torrent identity regardless of variant.
    #[must_use]
    pub const fn torrent(&self) -> &TorrentRef {
        match self {
            Self::Added(torrent) | Self::Duplicate(torrent) => torrent,
        }
    }
}

/// `torrent-add` arguments carried neither result key.
#[derive(Debug, Error)]
#[error("torrent-add response carried neither torrent-added nor torrent-duplicate")]
pub struct MissingAddResult;

#[derive(Deserialize)]
struct RawTorrentAdd {
    #[serde(rename = "torrent-added")]
    added: Option<TorrentRef>,
    #[serde(rename = "torrent-duplicate")]
    duplicate: Option<TorrentRef>,
}

impl TryFrom<RawTorrentAdd> for TorrentAddResponse {
    type Error = MissingAddResult;

    fn try_from(raw: RawTorrentAdd) -> Result<Self, Self::Error> {
        match (raw.duplicate, raw.added) {
            (Some(torrent), _) => Ok(Self::Duplicate(torrent)),
            (None, Some(torrent)) => Ok(Self::Added(torrent)),
            (None, None) => Err(MissingAddResult),
        }
    }
}

/// Terminal outcome of a single injection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InjectionOutcome {
    /// The torrent was added to the daemon.
    Success,
    /// The daemon already had this torrent.
    AlreadyExists,
    /// Any transport, protocol, or daemon failure.
    Failure,
    /// The original torrent has not finished downloading.
    TorrentNotComplete,
}

impl InjectionOutcome {
    /// Stable upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Failure => "FAILURE",
            Self::TorrentNotComplete => "TORRENT_NOT_COMPLETE",
        }
    }
}

impl Display for InjectionOutcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Why a download directory could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DownloadDirError {
    /// The daemon does not track the torrent.
    #[error("torrent not found")]
    NotFound,
    /// Completion was required and the torrent is still downloading.
    #[error("torrent not complete")]
    TorrentNotComplete,
    /// The lookup itself failed.
    #[error("download directory lookup failed")]
    UnknownError,
}

/// Options for [`crate::TorrentClient::get_download_dir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadDirOptions {
    /// Refuse to resolve torrents that are still downloading.
    pub only_completed: bool,
}

/// Completion state of a torrent looked up by info hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TorrentCompletion {
    /// Every piece is present.
    Complete,
    /// The torrent is still downloading.
    Incomplete,
    /// The daemon does not track the torrent.
    NotFound,
}
