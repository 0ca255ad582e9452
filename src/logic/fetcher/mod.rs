//! Fetcher Module - Remote export download
//!
//! One GET per cycle against `<server_url>/api/data/export`; the parsed
//! payload is stored verbatim (pretty-printed) as a timestamped snapshot.

pub mod client;

pub use client::{ExportClient, FetchError, FetchedSnapshot};
