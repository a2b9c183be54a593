use sha2::{Digest, Sha256};
use solana_sdk::{pubkey, pubkey::Pubkey, system_program};

/// Deployed crowdfund program this client targets by default.
pub const CROWDFUND_PROGRAM_ID: Pubkey = pubkey!("FimYszAo6d4WboiABnVFC4is6vebkEzbqmNVL7gkwg3H");

pub const CAMPAIGN_SEED_PREFIX: &[u8] = b"campaign";
pub const RECEIPT_SEED_PREFIX: &[u8] = b"receipt";

/// Campaign addresses are seeded by the creator plus a title digest, so a
/// campaign is addressable before it exists and a creator cannot reuse a
/// title.
pub fn title_fingerprint(title: &str) -> [u8; 32] {
    Sha256::digest(title.as_bytes()).into()
}

/// Derives the program's PDAs.
pub struct AddressFinder {
    pub program_id: Pubkey,
    pub system_program_id: Pubkey,
}

impl AddressFinder {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            system_program_id: system_program::ID,
        }
    }

    pub fn find_campaign_address(
        &self,
        creator: &Pubkey,
        title_fingerprint: &[u8; 32],
    ) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                CAMPAIGN_SEED_PREFIX,
                creator.as_ref(),
                title_fingerprint.as_ref(),
            ],
            &self.program_id,
        )
    }

    /// Receipts are keyed by donation index (the campaign's backer count at
    /// donation time), so one donor can hold several.
    pub fn find_receipt_address(
        &self,
        campaign: &Pubkey,
        donor: &Pubkey,
        donation_index: u64,
    ) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                RECEIPT_SEED_PREFIX,
                campaign.as_ref(),
                donor.as_ref(),
                &donation_index.to_le_bytes(),
            ],
            &self.program_id,
        )
    }
}

impl Default for AddressFinder {
    fn default() -> Self {
        Self::new(CROWDFUND_PROGRAM_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_address_is_stable_per_creator_and_title() {
        let finder = AddressFinder::default();
        let creator = Pubkey::new_unique();
        let fp = title_fingerprint("Community solar array");

        let (a, _) = finder.find_campaign_address(&creator, &fp);
        let (b, _) = finder.find_campaign_address(&creator, &fp);
        assert_eq!(a, b);

        let (other, _) = finder.find_campaign_address(&creator, &title_fingerprint("Other"));
        assert_ne!(a, other);
    }

    #[test]
    fn receipt_addresses_differ_per_donation_index() {
        let finder = AddressFinder::default();
        let campaign = Pubkey::new_unique();
        let donor = Pubkey::new_unique();

        let (first, _) = finder.find_receipt_address(&campaign, &donor, 0);
        let (second, _) = finder.find_receipt_address(&campaign, &donor, 1);
        assert_ne!(first, second);
    }
}
