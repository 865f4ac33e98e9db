//! Governor-wide settings storage.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use stele_types::{Address, Timestamp, Uint};

/// Latest value of each governable governor setting.
///
/// A field stays `None` until the first event that sets it has been
/// indexed; settings fixed at deployment never emit one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorSettings {
    pub proposal_threshold: Option<Uint>,
    pub quorum_numerator: Option<Uint>,
    pub voting_delay: Option<Uint>,
    pub voting_period: Option<Uint>,
    pub timelock: Option<Address>,
    pub last_updated_block: u64,
    pub last_updated_timestamp: Timestamp,
}

/// Singleton store for [`GovernorSettings`].
pub trait SettingsStore {
    fn get_settings(&self) -> Result<Option<GovernorSettings>, StoreError>;
    fn put_settings(&self, settings: &GovernorSettings) -> Result<(), StoreError>;
}
