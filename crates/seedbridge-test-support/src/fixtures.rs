//! JSON builders for Transmission RPC requests and responses.

use serde_json::{Value, json};

/// Request body the adapter sends for `method`.
#[must_use]
pub fn request(method: &str, arguments: Value) -> Value {
    json!({ "method": method, "arguments": arguments })
}

/// Successful response envelope.
#[must_use]
pub fn success(arguments: Value) -> Value {
    json!({ "result": "success", "arguments": arguments })
}

/// Envelope the daemon returns when `torrent-add` hits an existing torrent.
#[must_use]
pub fn duplicate(arguments: Value) -> Value {
    json!({ "result": "duplicate torrent", "arguments": arguments })
}

/// Envelope carrying a daemon-reported error string.
#[must_use]
pub fn rejected(message: &str) -> Value {
    json!({ "result": message, "arguments": {} })
}

/// `torrent-get` arguments listing the given torrents.
#[must_use]
pub fn torrents(entries: Value) -> Value {
    json!({ "torrents": entries })
}

/// `torrent-add` arguments for a newly added torrent.
#[must_use]
pub fn torrent_added(hash: &str, id: i64, name: &str) -> Value {
    json!({ "torrent-added": { "hashString": hash, "id": id, "name": name } })
}

/// `torrent-add` arguments for a torrent the daemon already tracks.
#[must_use]
pub fn torrent_duplicate(hash: &str, id: i64, name: &str) -> Value {
    json!({ "torrent-duplicate": { "hashString": hash, "id": id, "name": name } })
}
