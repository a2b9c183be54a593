use std::path::PathBuf;

use fundflow_client::TransactionResult;
use fundflow_sdk::{build_withdraw_tx, campaign_state, can_withdraw, is_creator};
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
    let creator = keypair.pubkey();

    let campaign = client.expect_campaign(&campaign_address)?;
    if !can_withdraw(&campaign, &creator, now_ms, &lifecycle) {
        let reason = if !is_creator(&campaign, &creator) {
            "only the campaign creator can withdraw".to_string()
        } else {
            format!(
                "withdrawal is not available: {}",
                campaign_state(&campaign, now_ms, &lifecycle).description()
            )
        };
        return Err(CliError::NotAllowed(reason));
    }

    println!(
        "🏦 Withdrawing {:.3} SOL from '{}'...",
        lamports_to_sol(campaign.raised),
        campaign.title
    );
    let blockhash = client.get_latest_blockhash()?;
    let tx = build_withdraw_tx(client.address_finder(), &campaign_address, &creator, blockhash)?;

    if let TransactionResult::Executed(_) = super::sign_and_submit(&client, tx, &[&keypair], dry_run)? {
        println!("✅ Funds withdrawn successfully!");
    }
    Ok(())
}
