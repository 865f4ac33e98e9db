//! LMDB storage backend for the Stele governor indexer.
//!
//! Implements all storage traits from `stele-store` using the `heed` LMDB
//! bindings. Each logical store maps to one named database within a single
//! environment; records are encoded with `bincode`.

mod codec;
pub mod environment;
pub mod error;
mod event_log;
mod settings;
mod status;
mod vote;
mod vote_result;

pub use environment::{LmdbStore, SCHEMA_VERSION};
pub use error::LmdbError;
