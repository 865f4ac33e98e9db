use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("unrecognized support code {0}")]
    UnknownSupport(u8),

    #[error("store error: {0}")]
    Store(#[from] stele_store::StoreError),
}
