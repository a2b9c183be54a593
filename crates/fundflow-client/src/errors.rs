use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("campaign not found: {0}")]
    CampaignNotFound(Pubkey),

    #[error("invalid account data at {address}: {reason}")]
    InvalidAccountData { address: Pubkey, reason: String },

    #[error("transaction simulation failed: {0}")]
    SimulationFailed(String),
}
