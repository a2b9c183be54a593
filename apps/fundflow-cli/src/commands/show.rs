use std::path::PathBuf;

use fundflow_sdk::{
    campaign_state, can_refund, can_submit_proof, can_vote, can_withdraw, format_time_remaining,
    time_remaining_ms,
};
use solana_sdk::native_token::lamports_to_sol;
use solana_sdk::signer::Signer;

use crate::config::ProtocolConfig;
use crate::error::CliResult;

pub fn execute(
    config: &ProtocolConfig,
    campaign_raw: String,
    keypair: Option<PathBuf>,
) -> CliResult<()> {
    let client = super::client(config);
    let lifecycle = config.lifecycle();
    let now_ms = super::unix_time_ms();
    let campaign_address = super::parse_campaign_address(&campaign_raw)?;

    let campaign = client.expect_campaign(&campaign_address)?;
    let state = campaign_state(&campaign, now_ms, &lifecycle);
    let total = campaign.total_raised();

    println!("{} [{}]", campaign.title, state);
    println!("{}\n", campaign.description);
    println!("   Address:  {campaign_address}");
    println!("   Creator:  {}", campaign.creator);
    println!("   Category: {}", campaign.category);
    if !campaign.image_url.is_empty() {
        println!("   Image:    {}", campaign.image_url);
    }
    println!(
        "   Raised:   {:.3} / {:.3} SOL all-time, {:.3} SOL in escrow",
        lamports_to_sol(total),
        lamports_to_sol(campaign.goal),
        lamports_to_sol(campaign.raised)
    );
    if campaign.withdrawn_amount > 0 {
        println!(
            "   Paid out: {:.3} SOL",
            lamports_to_sol(campaign.withdrawn_amount)
        );
    }
    if campaign.refunded_amount > 0 {
        println!(
            "   Refunded: {:.3} SOL",
            lamports_to_sol(campaign.refunded_amount)
        );
    }
    println!("   Deadline: {}", super::format_timestamp(campaign.deadline_ms));
    if !state.is_terminal() {
        println!(
            "   Time remaining: {}",
            format_time_remaining(time_remaining_ms(&campaign, now_ms, &lifecycle))
        );
    }
    println!("\n   {}", state.description());

    if campaign.has_proof() {
        println!("\n   Proof: {}", campaign.proof_url);
        println!(
            "   Votes: {:.3} SOL approved of {:.3} SOL required ({:.0}% of {:.3} SOL raised)",
            lamports_to_sol(campaign.vote_amount),
            lamports_to_sol(total) * config.vote_threshold,
            config.vote_threshold * 100.0,
            lamports_to_sol(total)
        );
    }

    if campaign.backers.is_empty() {
        println!("\nNo donations yet.");
    } else {
        println!("\nBackers ({}):", campaign.backers.len());
        for (i, record) in campaign.backers.iter().enumerate() {
            println!(
                "   {}. {} donated {:.3} SOL on {}",
                i + 1,
                record.donor,
                lamports_to_sol(record.amount),
                super::format_timestamp(record.donated_at_ms)
            );
        }
    }

    let Some(keypair_path) = keypair else {
        return Ok(());
    };
    let actor = super::load_keypair(&keypair_path)?.pubkey();
    println!("\nActing as {actor}:");

    let mut anything = false;
    if can_submit_proof(&campaign, &actor, now_ms, &lifecycle) {
        println!("   🔑 You can submit proof of progress.");
        anything = true;
    }
    if can_withdraw(&campaign, &actor, now_ms, &lifecycle) {
        println!("   🔑 You can withdraw the escrowed funds.");
        anything = true;
    }

    let receipts: Vec<_> = client
        .get_donation_receipts(&actor)?
        .into_iter()
        .filter(|(_, receipt)| receipt.campaign == campaign_address)
        .collect();
    let unvoted = receipts.iter().filter(|(_, r)| !r.voted).count();

    if can_vote(&campaign, now_ms, &lifecycle) && unvoted > 0 {
        println!("   🔑 You can vote on the proof with {unvoted} receipt(s).");
        anything = true;
    }
    if can_refund(&campaign, now_ms, &lifecycle) && !receipts.is_empty() {
        let refundable: u64 = receipts.iter().map(|(_, r)| r.amount).sum();
        println!(
            "   🔑 You can claim refunds for {} donation(s) totalling {:.3} SOL.",
            receipts.len(),
            lamports_to_sol(refundable)
        );
        anything = true;
    }
    if !anything {
        println!("   No actions available right now.");
    }

    Ok(())
}
