//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// The on-disk layout version written by this code.
pub const SCHEMA_VERSION: u32 = 1;

const MAX_DBS: u32 = 8;
const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

const DB_EVENT_LOG: &str = "event_log";
const DB_VOTES: &str = "votes";
const DB_VOTE_RESULTS: &str = "vote_results";
const DB_SETTINGS: &str = "settings";
const DB_STATUSES: &str = "proposal_statuses";
const DB_META: &str = "meta";

/// The LMDB environment and every database handle the indexer uses.
///
/// Each write opens and commits its own transaction, so a single record
/// update is atomic and nothing spans more than one key.
pub struct LmdbStore {
    pub(crate) env: Arc<Env>,
    pub(crate) event_log_db: Database<Bytes, Bytes>,
    pub(crate) votes_db: Database<Bytes, Bytes>,
    pub(crate) vote_results_db: Database<Bytes, Bytes>,
    pub(crate) settings_db: Database<Bytes, Bytes>,
    pub(crate) statuses_db: Database<Bytes, Bytes>,
}

impl LmdbStore {
    /// Open or create an LMDB environment at the given directory.
    ///
    /// A fresh environment is stamped with [`SCHEMA_VERSION`]; an existing
    /// one written with a different version is refused.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process and the
        // directory is not shared with other LMDB users.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let event_log_db = env.create_database(&mut wtxn, Some(DB_EVENT_LOG))?;
        let votes_db = env.create_database(&mut wtxn, Some(DB_VOTES))?;
        let vote_results_db = env.create_database(&mut wtxn, Some(DB_VOTE_RESULTS))?;
        let settings_db = env.create_database(&mut wtxn, Some(DB_SETTINGS))?;
        let statuses_db = env.create_database(&mut wtxn, Some(DB_STATUSES))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(DB_META))?;

        let stored = match meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("schema_version has unexpected byte length".into())
                })?;
                Some(u32::from_le_bytes(arr))
            }
            None => None,
        };

        match stored {
            None => {
                meta_db.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_le_bytes())?;
                tracing::info!(version = SCHEMA_VERSION, path = %path.display(), "initialized new database");
            }
            Some(found) if found == SCHEMA_VERSION => {
                tracing::debug!(version = found, path = %path.display(), "opened existing database");
            }
            Some(found) => {
                return Err(LmdbError::SchemaVersion {
                    found,
                    expected: SCHEMA_VERSION,
                });
            }
        }
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            event_log_db,
            votes_db,
            vote_results_db,
            settings_db,
            statuses_db,
        })
    }

    /// Read a single value by key from `db`.
    pub(crate) fn read(
        &self,
        db: &Database<Bytes, Bytes>,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        Ok(db.get(&rtxn, key)?.map(|bytes| bytes.to_vec()))
    }

    /// Write a single value under `key` in its own transaction.
    pub(crate) fn write(
        &self,
        db: &Database<Bytes, Bytes>,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        db.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }
}
