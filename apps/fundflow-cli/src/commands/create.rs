use std::path::PathBuf;

use fundflow_client::TransactionResult;
use fundflow_sdk::{
    build_create_campaign_tx, title_fingerprint, CreateCampaignArgs, MS_PER_DAY,
};
use solana_sdk::native_token::sol_to_lamports;
use solana_sdk::signer::Signer;

use crate::config::ProtocolConfig;
use crate::error::{CliError, CliResult};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &ProtocolConfig,
    title: String,
    description: String,
    category: String,
    image_url: String,
    goal: f64,
    duration_days: u64,
    keypair_path: PathBuf,
    dry_run: bool,
) -> CliResult<()> {
    let client = super::client(config);
    let keypair = super::load_keypair(&keypair_path)?;
    let creator = keypair.pubkey();

    let fingerprint = title_fingerprint(&title);
    let (campaign_address, _) = client
        .address_finder()
        .find_campaign_address(&creator, &fingerprint);

    if client.get_campaign(&campaign_address)?.is_some() {
        return Err(CliError::NotAllowed(format!(
            "you already created a campaign titled '{title}'; pick another title"
        )));
    }

    let args = CreateCampaignArgs {
        title: title.clone(),
        description,
        category,
        image_url,
        goal: sol_to_lamports(goal),
        duration_ms: duration_days.saturating_mul(MS_PER_DAY),
    };

    println!(
        "🚀 Creating campaign '{title}' with a {goal} SOL goal over {duration_days} day(s)..."
    );
    let blockhash = client.get_latest_blockhash()?;
    let tx = build_create_campaign_tx(client.address_finder(), &creator, args, blockhash)?;

    if let TransactionResult::Executed(_) = super::sign_and_submit(&client, tx, &[&keypair], dry_run)? {
        println!("✅ Campaign created at {campaign_address}");
    }
    Ok(())
}
