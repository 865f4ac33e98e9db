//! LMDB implementation of VoteStore.
//!
//! Key layout: `<proposal id decimal>/<20 voter bytes>`. The separator keeps
//! proposal `1` from matching the prefix of proposal `12`.

use stele_store::{StoreError, VoteRecord, VoteStore};
use stele_types::{Address, ProposalId};

use crate::codec::{decode, encode};
use crate::{LmdbError, LmdbStore};

fn proposal_prefix(proposal_id: &ProposalId) -> Vec<u8> {
    let mut prefix = proposal_id.key().into_bytes();
    prefix.push(b'/');
    prefix
}

fn vote_key(proposal_id: &ProposalId, voter: &Address) -> Vec<u8> {
    let mut key = proposal_prefix(proposal_id);
    key.extend_from_slice(voter.as_bytes());
    key
}

impl VoteStore for LmdbStore {
    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError> {
        let bytes = encode(record)?;
        self.write(
            &self.votes_db,
            &vote_key(&record.proposal_id, &record.voter),
            &bytes,
        )?;
        Ok(())
    }

    fn get_vote(
        &self,
        proposal_id: &ProposalId,
        voter: &Address,
    ) -> Result<Option<VoteRecord>, StoreError> {
        match self.read(&self.votes_db, &vote_key(proposal_id, voter))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn get_votes(&self, proposal_id: &ProposalId) -> Result<Vec<VoteRecord>, StoreError> {
        let prefix = proposal_prefix(proposal_id);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self
            .votes_db
            .prefix_iter(&rtxn, prefix.as_slice())
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_, val) = entry.map_err(LmdbError::from)?;
            results.push(decode(val)?);
        }
        Ok(results)
    }
}
