//! Client-side layouts of the crowdfund program's accounts.
//!
//! The program itself is deployed and maintained elsewhere; these structs
//! mirror its on-chain data so campaign and receipt accounts can be decoded
//! from raw RPC reads. Every account starts with an 8-byte discriminator
//! (`sha256("account:<Name>")[..8]`), followed by the borsh-encoded fields.

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub const ACCOUNT_DISCRIMINATOR_LEN: usize = 8;

/// First 8 bytes of `sha256("<namespace>:<name>")`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

#[derive(Debug, Error)]
pub enum AccountDecodeError {
    #[error("account data too short for discriminator")]
    TooShort,

    #[error("account discriminator mismatch")]
    DiscriminatorMismatch,

    #[error("account deserialization failed: {0}")]
    Deserialize(#[from] std::io::Error),
}

/// One donation, recorded on the campaign in chronological order.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackerRecord {
    pub donor: Pubkey,
    pub amount: u64,
    pub donated_at_ms: u64,
}

/// A single fundraising campaign.
///
/// `raised` holds only funds still in escrow; lamports paid out to the
/// creator or returned to donors move into `withdrawn_amount` and
/// `refunded_amount` respectively, so the all-time total contributed is the
/// sum of the three. All timestamps are unix milliseconds, all amounts
/// lamports.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq)]
pub struct CampaignAccount {
    pub creator: Pubkey,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub goal: u64,
    pub raised: u64,
    pub withdrawn_amount: u64,
    pub refunded_amount: u64,
    pub deadline_ms: u64,
    pub proof_url: String,
    pub vote_amount: u64,
    pub backers: Vec<BackerRecord>,
}

impl CampaignAccount {
    pub fn discriminator() -> [u8; 8] {
        discriminator("account", "CampaignAccount")
    }

    pub fn from_account_data(data: &[u8]) -> Result<Self, AccountDecodeError> {
        decode_account(data, Self::discriminator())
    }

    /// All-time total ever contributed, including funds already paid out or
    /// refunded.
    pub fn total_raised(&self) -> u64 {
        self.raised
            .saturating_add(self.withdrawn_amount)
            .saturating_add(self.refunded_amount)
    }

    pub fn has_proof(&self) -> bool {
        !self.proof_url.is_empty()
    }
}

/// Per-donation token held by the donor; `voted` is flipped exactly once by
/// the program when the holder casts a proof vote.
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DonationReceipt {
    pub campaign: Pubkey,
    pub donor: Pubkey,
    pub amount: u64,
    pub donated_at_ms: u64,
    pub voted: bool,
}

impl DonationReceipt {
    pub fn discriminator() -> [u8; 8] {
        discriminator("account", "DonationReceipt")
    }

    pub fn from_account_data(data: &[u8]) -> Result<Self, AccountDecodeError> {
        decode_account(data, Self::discriminator())
    }
}

fn decode_account<T: BorshDeserialize>(
    data: &[u8],
    expected_discriminator: [u8; 8],
) -> Result<T, AccountDecodeError> {
    if data.len() < ACCOUNT_DISCRIMINATOR_LEN {
        return Err(AccountDecodeError::TooShort);
    }
    if data[..ACCOUNT_DISCRIMINATOR_LEN] != expected_discriminator {
        return Err(AccountDecodeError::DiscriminatorMismatch);
    }
    Ok(T::try_from_slice(&data[ACCOUNT_DISCRIMINATOR_LEN..])?)
}

/// Whether raw account data carries the given discriminator.
pub fn has_discriminator(data: &[u8], expected: [u8; 8]) -> bool {
    data.len() >= ACCOUNT_DISCRIMINATOR_LEN && data[..ACCOUNT_DISCRIMINATOR_LEN] == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campaign() -> CampaignAccount {
        CampaignAccount {
            creator: Pubkey::new_unique(),
            title: "Community solar array".to_string(),
            description: "Panels for the neighborhood roof".to_string(),
            category: "tech".to_string(),
            image_url: "https://img.example/solar.png".to_string(),
            goal: 100_000_000_000,
            raised: 42_000_000_000,
            withdrawn_amount: 0,
            refunded_amount: 0,
            deadline_ms: 1_700_000_000_000,
            proof_url: String::new(),
            vote_amount: 0,
            backers: vec![BackerRecord {
                donor: Pubkey::new_unique(),
                amount: 42_000_000_000,
                donated_at_ms: 1_699_000_000_000,
            }],
        }
    }

    fn to_account_data<T: BorshSerialize>(value: &T, disc: [u8; 8]) -> Vec<u8> {
        let mut data = disc.to_vec();
        data.extend(borsh::to_vec(value).unwrap());
        data
    }

    #[test]
    fn campaign_decodes_from_account_data() {
        let campaign = sample_campaign();
        let data = to_account_data(&campaign, CampaignAccount::discriminator());

        let decoded = CampaignAccount::from_account_data(&data).unwrap();
        assert_eq!(decoded, campaign);
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let err = CampaignAccount::from_account_data(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, AccountDecodeError::TooShort));
    }

    #[test]
    fn decode_rejects_foreign_discriminator() {
        let receipt = DonationReceipt::default();
        let data = to_account_data(&receipt, DonationReceipt::discriminator());

        let err = CampaignAccount::from_account_data(&data).unwrap_err();
        assert!(matches!(err, AccountDecodeError::DiscriminatorMismatch));
    }

    #[test]
    fn total_raised_sums_all_buckets() {
        let campaign = CampaignAccount {
            raised: 10,
            withdrawn_amount: 20,
            refunded_amount: 5,
            ..CampaignAccount::default()
        };
        assert_eq!(campaign.total_raised(), 35);
    }

    #[test]
    fn receipt_round_trips() {
        let receipt = DonationReceipt {
            campaign: Pubkey::new_unique(),
            donor: Pubkey::new_unique(),
            amount: 7,
            donated_at_ms: 8,
            voted: true,
        };
        let data = to_account_data(&receipt, DonationReceipt::discriminator());

        assert_eq!(DonationReceipt::from_account_data(&data).unwrap(), receipt);
    }
}
