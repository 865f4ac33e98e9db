//! LMDB implementation of VoteResultStore.

use stele_store::{ProposalVoteResult, StoreError, VoteResultStore};
use stele_types::ProposalId;

use crate::codec::{decode, encode};
use crate::LmdbStore;

impl VoteResultStore for LmdbStore {
    fn get_vote_result(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<ProposalVoteResult>, StoreError> {
        match self.read(&self.vote_results_db, proposal_id.key().as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_vote_result(&self, result: &ProposalVoteResult) -> Result<(), StoreError> {
        let bytes = encode(result)?;
        self.write(
            &self.vote_results_db,
            result.proposal_id.key().as_bytes(),
            &bytes,
        )?;
        Ok(())
    }
}
