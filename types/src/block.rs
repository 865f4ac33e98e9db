//! Block context and log identifiers attached to every decoded event.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Timestamp, TxHash};

/// Where an event was observed: block height, block time and the
/// transaction that emitted it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub number: u64,
    pub timestamp: Timestamp,
    pub transaction_hash: TxHash,
}

/// Identity of one emitted log: `(transaction hash, log index)`.
///
/// Immutable log entries are keyed by this pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogId {
    pub transaction_hash: TxHash,
    pub log_index: u32,
}

impl LogId {
    pub const KEY_LEN: usize = 36;

    pub fn new(transaction_hash: TxHash, log_index: u32) -> Self {
        Self {
            transaction_hash,
            log_index,
        }
    }

    /// Store key: the 32 hash bytes followed by the log index in
    /// little-endian order.
    pub fn to_key(&self) -> [u8; Self::KEY_LEN] {
        let mut key = [0u8; Self::KEY_LEN];
        key[..32].copy_from_slice(self.transaction_hash.as_bytes());
        key[32..].copy_from_slice(&self.log_index.to_le_bytes());
        key
    }

    pub fn from_key(key: &[u8]) -> Option<Self> {
        if key.len() != Self::KEY_LEN {
            return None;
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&key[..32]);
        let mut index = [0u8; 4];
        index.copy_from_slice(&key[32..]);
        Some(Self::new(TxHash::new(hash), u32::from_le_bytes(index)))
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.transaction_hash, self.log_index)
    }
}
