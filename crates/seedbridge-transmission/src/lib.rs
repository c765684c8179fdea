#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Transmission daemon adapter: JSON-RPC transport, session negotiation,
//! typed RPC wrappers, and the injection orchestrator.
//!
//! Layout:
//! - `transport.rs`: one HTTP exchange and response classification
//! - `session.rs`: session-token storage and the single 409 retry
//! - `rpc.rs`: typed wrappers over daemon methods
//! - `client.rs`: [`TorrentClient`] and the [`TransmissionClient`] orchestrator
//! - `matching.rs`: searchee, match decision, metafile, and recheck policy inputs
//! - `model.rs`: wire payloads and outcome types
//! - `error.rs`: [`RpcError`]

pub mod client;
pub mod error;
pub mod matching;
pub mod model;
pub mod rpc;
mod session;
mod transport;

pub use client::{TorrentClient, TransmissionClient};
pub use error::{RpcError, RpcResult};
pub use matching::{Decision, MatchRecheckPolicy, Metafile, RawMetafile, RecheckPolicy, Searchee};
pub use model::{
    DownloadDirError, DownloadDirOptions, InjectionOutcome, MissingAddResult, TorrentAddResponse,
    TorrentCompletion, TorrentField, TorrentRef, TorrentSummary,
};
pub use rpc::TransmissionRpc;
pub use transport::SESSION_HEADER;
