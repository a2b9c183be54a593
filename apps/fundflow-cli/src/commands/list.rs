use fundflow_sdk::{campaign_state, format_time_remaining, time_remaining_ms};
use solana_sdk::native_token::lamports_to_sol;

use crate::config::ProtocolConfig;
use crate::error::CliResult;

pub fn execute(config: &ProtocolConfig) -> CliResult<()> {
    let client = super::client(config);
    let lifecycle = config.lifecycle();
    let now_ms = super::unix_time_ms();

    println!("🔍 Fetching campaigns from {} ...", config.rpc_url);
    let mut campaigns = client.list_campaigns()?;
    if campaigns.is_empty() {
        println!("No campaigns found.");
        return Ok(());
    }
    campaigns.sort_by_key(|(_, campaign)| campaign.deadline_ms);

    println!("✅ Found {} campaign(s):\n", campaigns.len());
    for (address, campaign) in &campaigns {
        let state = campaign_state(campaign, now_ms, &lifecycle);
        let total = campaign.total_raised();
        let percent = if campaign.goal > 0 {
            total as f64 / campaign.goal as f64 * 100.0
        } else {
            100.0
        };

        println!("{} [{}]", campaign.title, state);
        println!("   Address:  {address}");
        println!("   Category: {}", campaign.category);
        println!(
            "   Raised:   {:.3} / {:.3} SOL ({percent:.0}%)",
            lamports_to_sol(total),
            lamports_to_sol(campaign.goal)
        );
        println!("   Backers:  {}", campaign.backers.len());
        println!("   Deadline: {}", super::format_timestamp(campaign.deadline_ms));
        if state.is_terminal() {
            println!("   {}", state.description());
        } else {
            println!(
                "   Time remaining: {}",
                format_time_remaining(time_remaining_ms(campaign, now_ms, &lifecycle))
            );
        }
        println!();
    }
    Ok(())
}
