//! LMDB implementation of SettingsStore.

use stele_store::{GovernorSettings, SettingsStore, StoreError};

use crate::codec::{decode, encode};
use crate::LmdbStore;

const SETTINGS_KEY: &[u8] = b"current";

impl SettingsStore for LmdbStore {
    fn get_settings(&self) -> Result<Option<GovernorSettings>, StoreError> {
        match self.read(&self.settings_db, SETTINGS_KEY)? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_settings(&self, settings: &GovernorSettings) -> Result<(), StoreError> {
        let bytes = encode(settings)?;
        self.write(&self.settings_db, SETTINGS_KEY, &bytes)?;
        Ok(())
    }
}
