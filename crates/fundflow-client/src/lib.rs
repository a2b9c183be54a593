/*!
# Fundflow Client

Unified RPC access to the crowdfund program: campaign and receipt reads,
transaction simulation and submission, and the voting-notification scan.

The client is a thin blocking layer over `solana_client::rpc_client`; all
lifecycle interpretation of what it fetches lives in `fundflow-sdk` and is
pure. Reads return decoded snapshots, never raw account bytes.

## Usage

```rust,no_run
use fundflow_client::{ClientResult, FundflowClient};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

fn example() -> ClientResult<()> {
    let client = FundflowClient::new("https://api.devnet.solana.com".to_string());

    let campaign_address = Pubkey::from_str("11111111111111111111111111111112").unwrap();
    if let Some(campaign) = client.get_campaign(&campaign_address)? {
        println!("{} raised {} lamports", campaign.title, campaign.total_raised());
    }

    Ok(())
}
```
*/

pub mod client;
pub mod errors;
pub mod notifications;
pub mod types;

pub use client::FundflowClient;
pub use errors::{ClientError, ClientResult};
pub use notifications::{pending_vote_notifications, VotingNotification};
pub use types::{SimulationResult, TransactionResult};
