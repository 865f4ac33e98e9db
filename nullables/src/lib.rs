//! Nullable infrastructure for deterministic testing.
//!
//! The indexer reaches storage only through the `stele-store` traits. This
//! crate provides an implementation that keeps everything in memory, never
//! touches the filesystem, and can be told to fail writes so that error
//! propagation can be exercised.
//!
//! Usage: swap the LMDB store for [`NullStore`] in tests.

pub mod store;

pub use store::NullStore;
