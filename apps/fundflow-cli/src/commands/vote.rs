use std::path::PathBuf;

use fundflow_client::TransactionResult;
use fundflow_sdk::{build_vote_tx, campaign_state, can_vote};
use solana_sdk::signer::Signer;

use crate::config::ProtocolConfig;
use crate::error::{CliError, CliResult};

pub fn execute(
    config: &ProtocolConfig,
    campaign_raw: String,
    approve: bool,
    keypair_path: PathBuf,
    dry_run: bool,
) -> CliResult<()> {
    let client = super::client(config);
    let lifecycle = config.lifecycle();
    let now_ms = super::unix_time_ms();
    let campaign_address = super::parse_campaign_address(&campaign_raw)?;
    let keypair = super::load_keypair(&keypair_path)?;
    let voter = keypair.pubkey();

    let campaign = client.expect_campaign(&campaign_address)?;
    if !can_vote(&campaign, now_ms, &lifecycle) {
        return Err(CliError::NotAllowed(format!(
            "voting is not open: {}",
            campaign_state(&campaign, now_ms, &lifecycle).description()
        )));
    }

    // Voting requires an unvoted donation receipt; each receipt votes once.
    let receipt = client
        .get_donation_receipts(&voter)?
        .into_iter()
        .find(|(_, receipt)| receipt.campaign == campaign_address && !receipt.voted);
    let Some((receipt_address, _)) = receipt else {
        return Err(CliError::NotAllowed(
            "no unvoted donation receipt for this campaign".to_string(),
        ));
    };

    let choice = if approve { "yes" } else { "no" };
    println!(
        "🗳️  Submitting {choice} vote on '{}' with receipt {receipt_address}...",
        campaign.title
    );
    let blockhash = client.get_latest_blockhash()?;
    let tx = build_vote_tx(
        client.address_finder(),
        &campaign_address,
        &receipt_address,
        &voter,
        approve,
        blockhash,
    )?;

    if let TransactionResult::Executed(_) = super::sign_and_submit(&client, tx, &[&keypair], dry_run)? {
        println!("✅ Vote submitted successfully!");
    }
    Ok(())
}
