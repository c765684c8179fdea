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

//! Runtime configuration and credential handling for the daemon adapter.
//!
//! Layout: `model.rs` (runtime settings and providers), `credentials.rs`
//! (RPC URL credential extraction and redaction), `error.rs` (`ConfigError`).

pub mod credentials;
pub mod error;
pub mod model;

pub use credentials::{RpcCredentials, extract_credentials, redact_url};
pub use error::{ConfigError, ConfigResult};
pub use model::{
    DEFAULT_RPC_TIMEOUT, DEFAULT_TORRENT_TAG, ENV_RPC_TIMEOUT_SECS, ENV_RPC_URL, ENV_TORRENT_TAG,
    RuntimeConfig, RuntimeConfigProvider, SharedConfig,
};
