//! Unsigned-transaction wrappers over the instruction builders.
//!
//! Builders validate their inputs, assemble the message, and stamp the
//! caller-supplied blockhash. They never touch the network; fetching a
//! recent blockhash and signing stay with the caller.

use solana_sdk::{
    hash::Hash, instruction::Instruction, message::Message, pubkey::Pubkey,
    transaction::Transaction,
};
use thiserror::Error;

use crate::address_finder::AddressFinder;
use crate::instruction_builders::{
    build_create_campaign_ix, build_donate_ix, build_refund_ix, build_submit_proof_ix,
    build_vote_ix, build_withdraw_ix, CreateCampaignArgs,
};

#[derive(Debug, Error)]
pub enum TransactionBuilderError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("instruction encoding failed: {0}")]
    InstructionEncoding(#[from] std::io::Error),
}

pub type TransactionBuilderResult<T> = Result<T, TransactionBuilderError>;

fn into_transaction(
    instructions: &[Instruction],
    payer: &Pubkey,
    recent_blockhash: Hash,
) -> Transaction {
    let message = Message::new(instructions, Some(payer));
    let mut transaction = Transaction::new_unsigned(message);
    transaction.message.recent_blockhash = recent_blockhash;
    transaction
}

pub fn build_create_campaign_tx(
    address_finder: &AddressFinder,
    creator: &Pubkey,
    args: CreateCampaignArgs,
    recent_blockhash: Hash,
) -> TransactionBuilderResult<Transaction> {
    if args.title.is_empty() {
        return Err(TransactionBuilderError::InvalidInput(
            "campaign title must not be empty".to_string(),
        ));
    }
    if args.goal == 0 {
        return Err(TransactionBuilderError::InvalidInput(
            "campaign goal must be positive".to_string(),
        ));
    }
    if args.duration_ms == 0 {
        return Err(TransactionBuilderError::InvalidInput(
            "funding period must be positive".to_string(),
        ));
    }

    let ix = build_create_campaign_ix(address_finder, creator, args)?;
    Ok(into_transaction(&[ix], creator, recent_blockhash))
}

pub fn build_donate_tx(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    donor: &Pubkey,
    donation_index: u64,
    amount: u64,
    recent_blockhash: Hash,
) -> TransactionBuilderResult<Transaction> {
    if amount == 0 {
        return Err(TransactionBuilderError::InvalidInput(
            "donation amount must be positive".to_string(),
        ));
    }

    let ix = build_donate_ix(address_finder, campaign, donor, donation_index, amount)?;
    Ok(into_transaction(&[ix], donor, recent_blockhash))
}

pub fn build_submit_proof_tx(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    creator: &Pubkey,
    proof_url: String,
    recent_blockhash: Hash,
) -> TransactionBuilderResult<Transaction> {
    if proof_url.is_empty() {
        return Err(TransactionBuilderError::InvalidInput(
            "proof URL must not be empty".to_string(),
        ));
    }

    let ix = build_submit_proof_ix(address_finder, campaign, creator, proof_url)?;
    Ok(into_transaction(&[ix], creator, recent_blockhash))
}

pub fn build_vote_tx(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    receipt: &Pubkey,
    voter: &Pubkey,
    approve: bool,
    recent_blockhash: Hash,
) -> TransactionBuilderResult<Transaction> {
    let ix = build_vote_ix(address_finder, campaign, receipt, voter, approve)?;
    Ok(into_transaction(&[ix], voter, recent_blockhash))
}

pub fn build_withdraw_tx(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    creator: &Pubkey,
    recent_blockhash: Hash,
) -> TransactionBuilderResult<Transaction> {
    let ix = build_withdraw_ix(address_finder, campaign, creator)?;
    Ok(into_transaction(&[ix], creator, recent_blockhash))
}

/// One refund instruction per receipt, combined into a single transaction so
/// a donor reclaims everything in one signature.
pub fn build_refund_tx(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    receipts: &[Pubkey],
    donor: &Pubkey,
    recent_blockhash: Hash,
) -> TransactionBuilderResult<Transaction> {
    if receipts.is_empty() {
        return Err(TransactionBuilderError::InvalidInput(
            "no donation receipts to refund".to_string(),
        ));
    }

    let instructions = receipts
        .iter()
        .map(|receipt| build_refund_ix(address_finder, campaign, receipt, donor))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(into_transaction(&instructions, donor, recent_blockhash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{signature::Keypair, signer::Signer};

    fn sample_args() -> CreateCampaignArgs {
        CreateCampaignArgs {
            title: "Community solar array".to_string(),
            description: "Panels for the neighborhood roof".to_string(),
            category: "tech".to_string(),
            image_url: String::new(),
            goal: 100_000_000_000,
            duration_ms: 14 * 24 * 60 * 60 * 1000,
        }
    }

    #[test]
    fn create_campaign_tx_has_single_signer() {
        let creator = Keypair::new();
        let blockhash = Hash::new_unique();

        let tx = build_create_campaign_tx(
            &AddressFinder::default(),
            &creator.pubkey(),
            sample_args(),
            blockhash,
        )
        .unwrap();

        assert_eq!(tx.message.instructions.len(), 1);
        assert_eq!(tx.message.recent_blockhash, blockhash);
        assert_eq!(tx.message.header.num_required_signatures, 1);
    }

    #[test]
    fn create_campaign_tx_rejects_zero_goal() {
        let creator = Keypair::new();
        let args = CreateCampaignArgs {
            goal: 0,
            ..sample_args()
        };

        let err = build_create_campaign_tx(
            &AddressFinder::default(),
            &creator.pubkey(),
            args,
            Hash::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("goal"));
    }

    #[test]
    fn donate_tx_rejects_zero_amount() {
        let donor = Keypair::new();
        let campaign = Pubkey::new_unique();

        let result = build_donate_tx(
            &AddressFinder::default(),
            &campaign,
            &donor.pubkey(),
            0,
            0,
            Hash::default(),
        );
        assert!(matches!(
            result,
            Err(TransactionBuilderError::InvalidInput(_))
        ));
    }

    #[test]
    fn refund_tx_bundles_one_instruction_per_receipt() {
        let donor = Keypair::new();
        let campaign = Pubkey::new_unique();
        let receipts = vec![Pubkey::new_unique(), Pubkey::new_unique()];

        let tx = build_refund_tx(
            &AddressFinder::default(),
            &campaign,
            &receipts,
            &donor.pubkey(),
            Hash::default(),
        )
        .unwrap();
        assert_eq!(tx.message.instructions.len(), 2);
    }

    #[test]
    fn refund_tx_requires_receipts() {
        let donor = Keypair::new();
        let campaign = Pubkey::new_unique();

        let result = build_refund_tx(
            &AddressFinder::default(),
            &campaign,
            &[],
            &donor.pubkey(),
            Hash::default(),
        );
        assert!(matches!(
            result,
            Err(TransactionBuilderError::InvalidInput(_))
        ));
    }
}
