//! Thread-safe in-memory storage for testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use stele_store::{
    EventLogEntry, EventLogStore, GovernorSettings, ProposalStatusRecord, ProposalStatusStore,
    ProposalVoteResult, SettingsStore, StoreError, VoteRecord, VoteResultStore, VoteStore,
};
use stele_types::{Address, LogId, ProposalId};

/// An in-memory implementation of every indexer store trait.
///
/// Ordered maps mirror the key ordering of the LMDB backend, so listings
/// come back in the same order from both.
pub struct NullStore {
    log: Mutex<BTreeMap<[u8; LogId::KEY_LEN], EventLogEntry>>,
    votes: Mutex<BTreeMap<String, BTreeMap<Address, VoteRecord>>>,
    results: Mutex<HashMap<String, ProposalVoteResult>>,
    settings: Mutex<Option<GovernorSettings>>,
    statuses: Mutex<HashMap<String, ProposalStatusRecord>>,
    fail_writes: AtomicBool,
    writes: AtomicU64,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            log: Mutex::new(BTreeMap::new()),
            votes: Mutex::new(BTreeMap::new()),
            results: Mutex::new(HashMap::new()),
            settings: Mutex::new(None),
            statuses: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
            writes: AtomicU64::new(0),
        }
    }

    /// Make every subsequent write fail with a backend error (or succeed
    /// again when `false`).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes across all stores.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogStore for NullStore {
    fn put_log_entry(&self, entry: &EventLogEntry) -> Result<(), StoreError> {
        self.begin_write()?;
        self.log
            .lock()
            .unwrap()
            .insert(entry.id.to_key(), entry.clone());
        Ok(())
    }

    fn get_log_entry(&self, id: &LogId) -> Result<Option<EventLogEntry>, StoreError> {
        Ok(self.log.lock().unwrap().get(&id.to_key()).cloned())
    }

    fn iter_log_entries(&self) -> Result<Vec<EventLogEntry>, StoreError> {
        Ok(self.log.lock().unwrap().values().cloned().collect())
    }

    fn log_entry_count(&self) -> Result<u64, StoreError> {
        Ok(self.log.lock().unwrap().len() as u64)
    }
}

impl VoteStore for NullStore {
    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError> {
        self.begin_write()?;
        self.votes
            .lock()
            .unwrap()
            .entry(record.proposal_id.key())
            .or_default()
            .insert(record.voter, record.clone());
        Ok(())
    }

    fn get_vote(
        &self,
        proposal_id: &ProposalId,
        voter: &Address,
    ) -> Result<Option<VoteRecord>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(&proposal_id.key())
            .and_then(|by_voter| by_voter.get(voter))
            .cloned())
    }

    fn get_votes(&self, proposal_id: &ProposalId) -> Result<Vec<VoteRecord>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(&proposal_id.key())
            .map(|by_voter| by_voter.values().cloned().collect())
            .unwrap_or_default())
    }
}

impl VoteResultStore for NullStore {
    fn get_vote_result(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<ProposalVoteResult>, StoreError> {
        Ok(self.results.lock().unwrap().get(&proposal_id.key()).cloned())
    }

    fn put_vote_result(&self, result: &ProposalVoteResult) -> Result<(), StoreError> {
        self.begin_write()?;
        self.results
            .lock()
            .unwrap()
            .insert(result.proposal_id.key(), result.clone());
        Ok(())
    }
}

impl SettingsStore for NullStore {
    fn get_settings(&self) -> Result<Option<GovernorSettings>, StoreError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    fn put_settings(&self, settings: &GovernorSettings) -> Result<(), StoreError> {
        self.begin_write()?;
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

impl ProposalStatusStore for NullStore {
    fn get_status(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<ProposalStatusRecord>, StoreError> {
        Ok(self.statuses.lock().unwrap().get(&proposal_id.key()).cloned())
    }

    fn put_status(&self, record: &ProposalStatusRecord) -> Result<(), StoreError> {
        self.begin_write()?;
        self.statuses
            .lock()
            .unwrap()
            .insert(record.proposal_id.key(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stele_events::{GovernorEvent, ProposalCanceled};
    use stele_types::{BlockContext, Timestamp, TxHash, Uint};

    fn block(number: u64) -> BlockContext {
        BlockContext {
            number,
            timestamp: Timestamp::new(number * 10),
            transaction_hash: TxHash::new([number as u8; 32]),
        }
    }

    fn vote(proposal: u64, voter: u8, weight: u64) -> VoteRecord {
        VoteRecord {
            proposal_id: ProposalId::from(proposal),
            voter: Address::new([voter; 20]),
            support: 1,
            weight: Uint::from(weight),
            reason: String::new(),
            params: None,
            block: block(1),
        }
    }

    #[test]
    fn revote_overwrites_vote_record() {
        let store = NullStore::new();
        store.put_vote(&vote(1, 0xaa, 10)).unwrap();
        store.put_vote(&vote(1, 0xaa, 25)).unwrap();
        store.put_vote(&vote(1, 0xbb, 5)).unwrap();
        store.put_vote(&vote(2, 0xaa, 7)).unwrap();

        let votes = store.get_votes(&ProposalId::from(1)).unwrap();
        assert_eq!(votes.len(), 2);
        assert_eq!(votes[0].weight, Uint::from(25u64));
        assert_eq!(
            store
                .get_vote(&ProposalId::from(2), &Address::new([0xaa; 20]))
                .unwrap()
                .map(|v| v.weight),
            Some(Uint::from(7u64))
        );
    }

    #[test]
    fn missing_entries_read_as_none() {
        let store = NullStore::new();
        let id = ProposalId::from(9);
        assert!(store.get_vote_result(&id).unwrap().is_none());
        assert!(store.get_status(&id).unwrap().is_none());
        assert!(store.get_settings().unwrap().is_none());
        assert!(store.get_votes(&id).unwrap().is_empty());
        assert_eq!(store.log_entry_count().unwrap(), 0);
    }

    #[test]
    fn injected_failure_blocks_writes_only() {
        let store = NullStore::new();
        let result = ProposalVoteResult::new(ProposalId::from(1), 1, Timestamp::new(1));
        store.put_vote_result(&result).unwrap();

        store.fail_writes(true);
        let err = store.put_vote_result(&result).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(store.get_vote_result(&ProposalId::from(1)).unwrap().is_some());
        assert_eq!(store.write_count(), 1);

        store.fail_writes(false);
        store.put_vote_result(&result).unwrap();
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn log_entries_are_keyed_by_tx_and_index() {
        let store = NullStore::new();
        let entry = EventLogEntry {
            id: LogId::new(TxHash::new([3u8; 32]), 1),
            block: block(3),
            event: GovernorEvent::ProposalCanceled(ProposalCanceled {
                proposal_id: ProposalId::from(1),
            }),
        };
        store.put_log_entry(&entry).unwrap();
        assert_eq!(store.get_log_entry(&entry.id).unwrap(), Some(entry.clone()));
        assert!(store
            .get_log_entry(&LogId::new(TxHash::new([3u8; 32]), 2))
            .unwrap()
            .is_none());
        assert_eq!(store.iter_log_entries().unwrap(), vec![entry]);
    }
}
