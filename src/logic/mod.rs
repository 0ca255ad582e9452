//! Logic Module - Sync pipeline
//!
//! Leaf-first:
//! - `store/` - on-disk layout and naming for snapshots and models
//! - `fetcher/` - export download
//! - `dataset/` - sample extraction
//! - `model/` - artifact summarization and binary format
//! - `sync/` - cycle orchestration and the interval loop

pub mod config;
pub mod dataset;
pub mod fetcher;
pub mod model;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;
