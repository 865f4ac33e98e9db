//! LMDB implementation of EventLogStore.

use stele_store::{EventLogEntry, EventLogStore, StoreError};
use stele_types::LogId;

use crate::codec::{decode, encode};
use crate::{LmdbError, LmdbStore};

impl EventLogStore for LmdbStore {
    fn put_log_entry(&self, entry: &EventLogEntry) -> Result<(), StoreError> {
        let bytes = encode(entry)?;
        self.write(&self.event_log_db, &entry.id.to_key(), &bytes)?;
        Ok(())
    }

    fn get_log_entry(&self, id: &LogId) -> Result<Option<EventLogEntry>, StoreError> {
        match self.read(&self.event_log_db, &id.to_key())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn iter_log_entries(&self) -> Result<Vec<EventLogEntry>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.event_log_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            if LogId::from_key(key).is_none() {
                return Err(StoreError::Corruption(format!(
                    "event log key has {} bytes",
                    key.len()
                )));
            }
            results.push(decode(val)?);
        }
        Ok(results)
    }

    fn log_entry_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.event_log_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stele_events::{GovernorEvent, ProposalCreated, ProposalQueued};
    use stele_types::{Address, BlockContext, HexBytes, ProposalId, Timestamp, TxHash, Uint};

    fn block(number: u64, tx: u8) -> BlockContext {
        BlockContext {
            number,
            timestamp: Timestamp::new(number * 12),
            transaction_hash: TxHash::new([tx; 32]),
        }
    }

    fn created(proposal: u64, tx: u8) -> EventLogEntry {
        let block = block(100, tx);
        EventLogEntry {
            id: LogId::new(block.transaction_hash, 0),
            block,
            event: GovernorEvent::ProposalCreated(ProposalCreated {
                proposal_id: ProposalId::from(proposal),
                proposer: Address::new([1u8; 20]),
                targets: vec![Address::new([2u8; 20])],
                values: vec![Uint::zero()],
                signatures: vec!["transfer(address,uint256)".into()],
                calldatas: vec![HexBytes::new(vec![0xa9, 0x05, 0x9c, 0xbb])],
                vote_start: Uint::from(101u64),
                vote_end: Uint::from(50_501u64),
                description: "# Fund the grants program".into(),
            }),
        }
    }

    #[test]
    fn entries_round_trip_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = LmdbStore::open(dir.path(), 1 << 20).unwrap();

        let entry = created(1, 0x10);
        store.put_log_entry(&entry).unwrap();
        let queued = EventLogEntry {
            id: LogId::new(TxHash::new([0x20; 32]), 3),
            block: block(200, 0x20),
            event: GovernorEvent::ProposalQueued(ProposalQueued {
                proposal_id: ProposalId::from(1),
                eta: Uint::from(1_700_000_000u64),
            }),
        };
        store.put_log_entry(&queued).unwrap();

        assert_eq!(store.get_log_entry(&entry.id).unwrap(), Some(entry));
        assert_eq!(store.log_entry_count().unwrap(), 2);
        assert_eq!(store.iter_log_entries().unwrap().len(), 2);
    }

    #[test]
    fn finds_proposal_record_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = LmdbStore::open(dir.path(), 1 << 20).unwrap();

        store.put_log_entry(&created(1, 0x10)).unwrap();
        store.put_log_entry(&created(2, 0x11)).unwrap();

        let record = store
            .find_proposal_record(&ProposalId::from(2))
            .unwrap()
            .unwrap();
        assert_eq!(record.block.transaction_hash, TxHash::new([0x11; 32]));
        assert_eq!(record.vote_end, Uint::from(50_501u64));
        assert!(store
            .find_proposal_record(&ProposalId::from(3))
            .unwrap()
            .is_none());
    }
}
