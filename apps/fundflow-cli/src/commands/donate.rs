use std::path::PathBuf;

use fundflow_client::TransactionResult;
use fundflow_sdk::{build_donate_tx, campaign_state, CampaignState};
use solana_sdk::native_token::{lamports_to_sol, sol_to_lamports};
use solana_sdk::signer::Signer;

use crate::config::ProtocolConfig;
use crate::error::{CliError, CliResult};

pub fn execute(
    config: &ProtocolConfig,
    campaign_raw: String,
    amount: f64,
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
    let state = campaign_state(&campaign, now_ms, &lifecycle);
    if state != CampaignState::Funding {
        return Err(CliError::NotAllowed(format!(
            "campaign is not accepting donations: {}",
            state.description()
        )));
    }

    let amount_lamports = sol_to_lamports(amount);
    let balance = client.get_balance(&donor)?;
    if balance < amount_lamports {
        return Err(CliError::NotAllowed(format!(
            "insufficient balance: donating {amount} SOL but the wallet holds {:.3} SOL",
            lamports_to_sol(balance)
        )));
    }

    // The receipt PDA is seeded by the campaign's backer count at donation
    // time.
    let donation_index = campaign.backers.len() as u64;

    println!("💸 Donating {amount} SOL to '{}'...", campaign.title);
    let blockhash = client.get_latest_blockhash()?;
    let tx = build_donate_tx(
        client.address_finder(),
        &campaign_address,
        &donor,
        donation_index,
        amount_lamports,
        blockhash,
    )?;

    if let TransactionResult::Executed(_) = super::sign_and_submit(&client, tx, &[&keypair], dry_run)? {
        println!("✅ Successfully donated {amount} SOL!");
    }
    Ok(())
}
