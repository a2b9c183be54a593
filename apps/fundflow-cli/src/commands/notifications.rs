use std::path::PathBuf;
use std::time::Duration;

use fundflow_sdk::{format_time_remaining, time_remaining_ms};
use solana_sdk::native_token::lamports_to_sol;
use solana_sdk::signer::Signer;

use crate::config::ProtocolConfig;
use crate::error::CliResult;

pub fn execute(
    config: &ProtocolConfig,
    keypair_path: PathBuf,
    watch: bool,
    interval_secs: u64,
) -> CliResult<()> {
    let client = super::client(config);
    let lifecycle = config.lifecycle();
    let owner = super::load_keypair(&keypair_path)?.pubkey();

    loop {
        let now_ms = super::unix_time_ms();
        let notifications = client.scan_voting_notifications(&owner, now_ms, &lifecycle)?;

        if notifications.is_empty() {
            println!("🔔 No campaigns are waiting for your vote.");
        } else {
            println!(
                "🔔 {} campaign(s) waiting for your vote:\n",
                notifications.len()
            );
            for notification in &notifications {
                println!("{}", notification.campaign.title);
                println!("   Campaign:      {}", notification.campaign_address);
                println!(
                    "   Your donation: {:.3} SOL",
                    lamports_to_sol(notification.receipt.amount)
                );
                println!(
                    "   Voting closes in {}",
                    format_time_remaining(time_remaining_ms(
                        &notification.campaign,
                        now_ms,
                        &lifecycle
                    ))
                );
                println!();
            }
        }

        if !watch {
            return Ok(());
        }
        std::thread::sleep(Duration::from_secs(interval_secs.max(1)));
    }
}
