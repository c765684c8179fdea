//! Collaborator inputs to an injection: the matched searchee, the match
//! decision, the new torrent's metainfo, and the recheck policy.

use serde::{Deserialize, Serialize};

/// The already-tracked item a new torrent was matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Searchee {
    /// Info hash of the original torrent; absent for data-based searchees.
    pub info_hash: Option<String>,
    /// Display name used in logs.
    pub name: String,
}

impl Searchee {
    /// Searchee backed by a torrent the daemon tracks.
    #[must_use]
    pub fn from_torrent(info_hash: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            info_hash: Some(info_hash.into()),
            name: name.into(),
        }
    }

    /// Searchee backed by data on disk with no torrent of its own.
    #[must_use]
    pub fn from_data(name: impl Into<String>) -> Self {
        Self {
            info_hash: None,
            name: name.into(),
        }
    }
}

/// How closely a candidate matched its searchee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// File names and sizes line up exactly.
    Match,
    /// Sizes line up but names differ.
    MatchSizeOnly,
    /// Only a subset of the files is present.
    MatchPartial,
}

/// Source of the bencoded metainfo for a torrent about to be injected.
pub trait Metafile: Send + Sync {
    /// Bencoded `.torrent` bytes.
    fn encode(&self) -> Vec<u8>;
}

/// Metainfo that is already bencoded, such as a `.torrent` file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMetafile {
    bytes: Vec<u8>,
}

impl RawMetafile {
    /// Wrap bencoded bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Metafile for RawMetafile {
    fn encode(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// Decides whether an injected torrent must start paused so it can be rechecked.
pub trait RecheckPolicy: Send + Sync {
    /// `true` when the torrent should be added paused.
    fn should_recheck(&self, searchee: &Searchee, decision: Decision) -> bool;
}

/// Default policy keyed on the match decision.
///
/// Partial and size-only matches always need a recheck. Exact matches against
/// data-based searchees are rechecked unless `skip_recheck` is set. Exact
/// matches against tracked torrents start immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchRecheckPolicy {
    /// Trust exact data-based matches without rechecking.
    pub skip_recheck: bool,
}

impl RecheckPolicy for MatchRecheckPolicy {
    fn should_recheck(&self, searchee: &Searchee, decision: Decision) -> bool {
        match decision {
            Decision::MatchPartial | Decision::MatchSizeOnly => true,
            Decision::Match => searchee.info_hash.is_none() && !self.skip_recheck,
        }
    }
}
