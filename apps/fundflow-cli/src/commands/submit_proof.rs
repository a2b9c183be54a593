use std::path::PathBuf;

use fundflow_client::TransactionResult;
use fundflow_sdk::{build_submit_proof_tx, campaign_state, can_submit_proof, is_creator};
use solana_sdk::signer::Signer;

use crate::config::ProtocolConfig;
use crate::error::{CliError, CliResult};

pub fn execute(
    config: &ProtocolConfig,
    campaign_raw: String,
    proof_url: String,
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
    if !can_submit_proof(&campaign, &creator, now_ms, &lifecycle) {
        let reason = if !is_creator(&campaign, &creator) {
            "only the campaign creator can submit proof".to_string()
        } else if campaign.has_proof() {
            format!("proof has already been submitted: {}", campaign.proof_url)
        } else {
            format!(
                "the proof window is not open: {}",
                campaign_state(&campaign, now_ms, &lifecycle).description()
            )
        };
        return Err(CliError::NotAllowed(reason));
    }

    println!("📝 Submitting proof for '{}'...", campaign.title);
    let blockhash = client.get_latest_blockhash()?;
    let tx = build_submit_proof_tx(
        client.address_finder(),
        &campaign_address,
        &creator,
        proof_url,
        blockhash,
    )?;

    if let TransactionResult::Executed(_) = super::sign_and_submit(&client, tx, &[&keypair], dry_run)? {
        println!("✅ Proof submitted successfully!");
    }
    Ok(())
}
