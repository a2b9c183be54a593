use std::path::PathBuf;

use fundflow_client::TransactionResult;
use fundflow_sdk::{build_refund_tx, campaign_state, can_refund};
use solana_sdk::native_token::lamports_to_sol;
use solana_sdk::signer::Signer;

use crate::config::ProtocolConfig;
use crate::error::{CliError, CliResult};

pub fn execute(
    config: &ProtocolConfig,
    campaign_raw: String,
    keypair_path: PathBuf,
    dry_run: bool,
) -> CliResult<()> {
    let client = super::client(config);
    let lifecycle = config.lifecycle();
    let now_ms = super::unix_time_ms();
    let campaign_address = super::parse_campaign_address(&campaign_raw)?;
    let keypair = super::load_keypair(&keypair_path)?;
    let donor = keypair.pubkey();

    let campaign = client.expect_campaign(&campaign_address)?;
    if !can_refund(&campaign, now_ms, &lifecycle) {
        return Err(CliError::NotAllowed(format!(
            "refunds are not available: {}",
            campaign_state(&campaign, now_ms, &lifecycle).description()
        )));
    }

    let receipts: Vec<_> = client
        .get_donation_receipts(&donor)?
        .into_iter()
        .filter(|(_, receipt)| receipt.campaign == campaign_address)
        .collect();
    if receipts.is_empty() {
        return Err(CliError::NotAllowed(
            "no donation receipts for this campaign".to_string(),
        ));
    }

    let total: u64 = receipts.iter().map(|(_, receipt)| receipt.amount).sum();
    let receipt_addresses: Vec<_> = receipts.iter().map(|(address, _)| *address).collect();

    println!(
        "💰 Claiming refunds for {} donation(s) totalling {:.3} SOL from '{}'...",
        receipts.len(),
        lamports_to_sol(total),
        campaign.title
    );
    let blockhash = client.get_latest_blockhash()?;
    let tx = build_refund_tx(
        client.address_finder(),
        &campaign_address,
        &receipt_addresses,
        &donor,
        blockhash,
    )?;

    if let TransactionResult::Executed(_) = super::sign_and_submit(&client, tx, &[&keypair], dry_run)? {
        println!("✅ Refund claimed successfully!");
    }
    Ok(())
}
