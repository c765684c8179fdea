//! Command handlers grouped by concern.

pub(crate) mod daemon;
pub(crate) mod torrents;
