//! LMDB implementation of ProposalStatusStore.

use stele_store::{ProposalStatusRecord, ProposalStatusStore, StoreError};
use stele_types::ProposalId;

use crate::codec::{decode, encode};
use crate::LmdbStore;

impl ProposalStatusStore for LmdbStore {
    fn get_status(
        &self,
        proposal_id: &ProposalId,
    ) -> Result<Option<ProposalStatusRecord>, StoreError> {
        match self.read(&self.statuses_db, proposal_id.key().as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_status(&self, record: &ProposalStatusRecord) -> Result<(), StoreError> {
        let bytes = encode(record)?;
        self.write(
            &self.statuses_db,
            record.proposal_id.key().as_bytes(),
            &bytes,
        )?;
        Ok(())
    }
}
