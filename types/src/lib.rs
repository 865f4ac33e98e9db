//! Fundamental types for the Stele governor indexer.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: arbitrary-precision integers, proposal identifiers, addresses,
//! hashes, timestamps and the block context attached to every decoded event.

pub mod address;
pub mod block;
pub mod error;
pub mod hash;
pub mod time;
pub mod uint;

pub use address::Address;
pub use block::{BlockContext, LogId};
pub use error::TypesError;
pub use hash::{HexBytes, TxHash};
pub use time::Timestamp;
pub use uint::{ProposalId, Uint};
