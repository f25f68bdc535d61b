//! `upsrelay-agent` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod dedup;
pub mod error;
pub mod relay;
pub mod source;
