//! Instruction builders for the crowdfund program.
//!
//! Each builder derives the accounts the program expects, encodes the
//! arguments with borsh behind the program's 8-byte instruction
//! discriminator (`sha256("global:<name>")[..8]`), and returns a ready
//! [`Instruction`]. No RPC calls happen here; callers supply any on-chain
//! data a builder needs (such as the donation index).

use std::io;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::address_finder::{title_fingerprint, AddressFinder};
use crate::state::discriminator;

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]
pub struct CreateCampaignArgs {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub goal: u64,
    pub duration_ms: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DonateArgs {
    pub amount: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmitProofArgs {
    pub proof_url: String,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteArgs {
    pub approve: bool,
}

fn instruction_data<T: BorshSerialize>(name: &str, args: &T) -> io::Result<Vec<u8>> {
    let mut data = discriminator("global", name).to_vec();
    data.extend(borsh::to_vec(args)?);
    Ok(data)
}

/// Open a new campaign. The campaign address is a PDA of the creator and the
/// title digest; the clock sysvar stamps the funding deadline.
pub fn build_create_campaign_ix(
    address_finder: &AddressFinder,
    creator: &Pubkey,
    args: CreateCampaignArgs,
) -> io::Result<Instruction> {
    let fingerprint = title_fingerprint(&args.title);
    let (campaign, _) = address_finder.find_campaign_address(creator, &fingerprint);

    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new(*creator, true),
            AccountMeta::new(campaign, false),
            AccountMeta::new_readonly(sysvar::clock::ID, false),
            AccountMeta::new_readonly(address_finder.system_program_id, false),
        ],
        data: instruction_data("create_campaign", &args)?,
    })
}

/// Donate `amount` lamports into the campaign's escrow. `donation_index`
/// must be the campaign's backer count at build time; it seeds the receipt
/// account the program initializes for this donation.
pub fn build_donate_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    donor: &Pubkey,
    donation_index: u64,
    amount: u64,
) -> io::Result<Instruction> {
    let (receipt, _) = address_finder.find_receipt_address(campaign, donor, donation_index);

    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new(*donor, true),
            AccountMeta::new(*campaign, false),
            AccountMeta::new(receipt, false),
            AccountMeta::new_readonly(sysvar::clock::ID, false),
            AccountMeta::new_readonly(address_finder.system_program_id, false),
        ],
        data: instruction_data("donate", &DonateArgs { amount })?,
    })
}

/// Record the creator's proof-of-progress URL.
pub fn build_submit_proof_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    creator: &Pubkey,
    proof_url: String,
) -> io::Result<Instruction> {
    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new_readonly(*creator, true),
            AccountMeta::new(*campaign, false),
            AccountMeta::new_readonly(sysvar::clock::ID, false),
        ],
        data: instruction_data("submit_proof", &SubmitProofArgs { proof_url })?,
    })
}

/// Cast the receipt's vote on the submitted proof.
pub fn build_vote_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    receipt: &Pubkey,
    voter: &Pubkey,
    approve: bool,
) -> io::Result<Instruction> {
    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new_readonly(*voter, true),
            AccountMeta::new(*campaign, false),
            AccountMeta::new(*receipt, false),
            AccountMeta::new_readonly(sysvar::clock::ID, false),
        ],
        data: instruction_data("vote", &VoteArgs { approve })?,
    })
}

/// Pay the escrowed funds out to the creator.
pub fn build_withdraw_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    creator: &Pubkey,
) -> io::Result<Instruction> {
    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new(*creator, true),
            AccountMeta::new(*campaign, false),
            AccountMeta::new_readonly(sysvar::clock::ID, false),
        ],
        data: discriminator("global", "withdraw").to_vec(),
    })
}

/// Return one receipt's donation to its holder.
pub fn build_refund_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    receipt: &Pubkey,
    donor: &Pubkey,
) -> io::Result<Instruction> {
    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new(*donor, true),
            AccountMeta::new(*campaign, false),
            AccountMeta::new(*receipt, false),
            AccountMeta::new_readonly(sysvar::clock::ID, false),
        ],
        data: discriminator("global", "refund").to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donate_ix_targets_program_with_discriminated_data() {
        let finder = AddressFinder::default();
        let campaign = Pubkey::new_unique();
        let donor = Pubkey::new_unique();

        let ix = build_donate_ix(&finder, &campaign, &donor, 3, 1_000_000_000).unwrap();

        assert_eq!(ix.program_id, finder.program_id);
        assert_eq!(ix.accounts.len(), 5);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, campaign);
        assert_eq!(&ix.data[..8], &discriminator("global", "donate"));
        assert_eq!(
            DonateArgs::try_from_slice(&ix.data[8..]).unwrap(),
            DonateArgs {
                amount: 1_000_000_000
            }
        );
    }

    #[test]
    fn donate_receipt_follows_donation_index() {
        let finder = AddressFinder::default();
        let campaign = Pubkey::new_unique();
        let donor = Pubkey::new_unique();

        let first = build_donate_ix(&finder, &campaign, &donor, 0, 1).unwrap();
        let second = build_donate_ix(&finder, &campaign, &donor, 1, 1).unwrap();
        assert_ne!(first.accounts[2].pubkey, second.accounts[2].pubkey);
    }

    #[test]
    fn create_campaign_ix_derives_campaign_from_title() {
        let finder = AddressFinder::default();
        let creator = Pubkey::new_unique();
        let args = CreateCampaignArgs {
            title: "Community solar array".to_string(),
            description: "Panels for the neighborhood roof".to_string(),
            category: "tech".to_string(),
            image_url: String::new(),
            goal: 100,
            duration_ms: 7 * 24 * 60 * 60 * 1000,
        };

        let ix = build_create_campaign_ix(&finder, &creator, args.clone()).unwrap();

        let (expected, _) =
            finder.find_campaign_address(&creator, &title_fingerprint(&args.title));
        assert_eq!(ix.accounts[1].pubkey, expected);
        assert_eq!(
            ix.accounts.last().unwrap().pubkey,
            finder.system_program_id
        );
        assert_eq!(&ix.data[..8], &discriminator("global", "create_campaign"));
    }

    #[test]
    fn vote_ix_encodes_choice() {
        let finder = AddressFinder::default();
        let campaign = Pubkey::new_unique();
        let receipt = Pubkey::new_unique();
        let voter = Pubkey::new_unique();

        let approve = build_vote_ix(&finder, &campaign, &receipt, &voter, true).unwrap();
        let reject = build_vote_ix(&finder, &campaign, &receipt, &voter, false).unwrap();

        assert_eq!(
            VoteArgs::try_from_slice(&approve.data[8..]).unwrap(),
            VoteArgs { approve: true }
        );
        assert_eq!(
            VoteArgs::try_from_slice(&reject.data[8..]).unwrap(),
            VoteArgs { approve: false }
        );
    }

    #[test]
    fn argless_instructions_carry_only_the_discriminator() {
        let finder = AddressFinder::default();
        let campaign = Pubkey::new_unique();
        let actor = Pubkey::new_unique();
        let receipt = Pubkey::new_unique();

        let withdraw = build_withdraw_ix(&finder, &campaign, &actor).unwrap();
        assert_eq!(withdraw.data, discriminator("global", "withdraw").to_vec());

        let refund = build_refund_ix(&finder, &campaign, &receipt, &actor).unwrap();
        assert_eq!(refund.data, discriminator("global", "refund").to_vec());
    }
}
