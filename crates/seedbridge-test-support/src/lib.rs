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

//! Shared test helpers for exercising the adapter against a fake daemon.
//! Layout: fixtures.rs (RPC envelope builders), mocks.rs (`httpmock` daemon helpers).

pub mod fixtures;
pub mod mocks;
