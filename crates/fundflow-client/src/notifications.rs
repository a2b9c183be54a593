//! Voting notifications: campaigns a donor still needs to vote on.
//!
//! A notification exists for each unvoted donation receipt whose campaign is
//! currently in its voting window. The pairing itself is pure; the client
//! method fetches the inputs and delegates, and callers decide the polling
//! cadence.

use fundflow_sdk::{
    campaign_state, CampaignAccount, CampaignState, DonationReceipt, LifecycleConfig,
};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::{client::FundflowClient, errors::ClientResult};

#[derive(Debug, Clone)]
pub struct VotingNotification {
    pub campaign_address: Pubkey,
    pub campaign: CampaignAccount,
    pub receipt_address: Pubkey,
    pub receipt: DonationReceipt,
}

/// Pair unvoted receipts with campaigns whose voting window is open at
/// `now_ms`. Receipts referencing unknown campaigns are ignored.
pub fn pending_vote_notifications(
    campaigns: &[(Pubkey, CampaignAccount)],
    receipts: &[(Pubkey, DonationReceipt)],
    now_ms: u64,
    config: &LifecycleConfig,
) -> Vec<VotingNotification> {
    let mut notifications = Vec::new();

    for (receipt_address, receipt) in receipts {
        if receipt.voted {
            continue;
        }
        let Some((campaign_address, campaign)) = campaigns
            .iter()
            .find(|(address, _)| *address == receipt.campaign)
        else {
            continue;
        };
        if campaign_state(campaign, now_ms, config) != CampaignState::Voting {
            continue;
        }
        notifications.push(VotingNotification {
            campaign_address: *campaign_address,
            campaign: campaign.clone(),
            receipt_address: *receipt_address,
            receipt: *receipt,
        });
    }

    notifications
}

impl FundflowClient {
    /// Scan for campaigns `owner` can still vote on.
    pub fn scan_voting_notifications(
        &self,
        owner: &Pubkey,
        now_ms: u64,
        config: &LifecycleConfig,
    ) -> ClientResult<Vec<VotingNotification>> {
        let receipts = self.get_donation_receipts(owner)?;
        if receipts.is_empty() {
            return Ok(Vec::new());
        }

        let campaigns = self.list_campaigns()?;
        let notifications = pending_vote_notifications(&campaigns, &receipts, now_ms, config);
        debug!(
            pending = notifications.len(),
            receipts = receipts.len(),
            "voting notification scan"
        );
        Ok(notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundflow_sdk::{MS_PER_DAY, PROOF_SUBMISSION_PERIOD_MS};

    const NOW: u64 = 1_750_000_000_000;

    fn voting_campaign() -> CampaignAccount {
        CampaignAccount {
            creator: Pubkey::new_unique(),
            goal: 100,
            raised: 200,
            deadline_ms: NOW - MS_PER_DAY,
            proof_url: "https://proof.example".to_string(),
            ..CampaignAccount::default()
        }
    }

    fn receipt_for(campaign: Pubkey, voted: bool) -> DonationReceipt {
        DonationReceipt {
            campaign,
            donor: Pubkey::new_unique(),
            amount: 10,
            donated_at_ms: NOW - 2 * MS_PER_DAY,
            voted,
        }
    }

    #[test]
    fn unvoted_receipt_of_voting_campaign_notifies() {
        let campaign_address = Pubkey::new_unique();
        let campaigns = vec![(campaign_address, voting_campaign())];
        let receipts = vec![(Pubkey::new_unique(), receipt_for(campaign_address, false))];

        let notifications = pending_vote_notifications(
            &campaigns,
            &receipts,
            NOW,
            &LifecycleConfig::default(),
        );
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].campaign_address, campaign_address);
    }

    #[test]
    fn voted_receipts_never_notify() {
        let campaign_address = Pubkey::new_unique();
        let campaigns = vec![(campaign_address, voting_campaign())];
        let receipts = vec![(Pubkey::new_unique(), receipt_for(campaign_address, true))];

        assert!(pending_vote_notifications(
            &campaigns,
            &receipts,
            NOW,
            &LifecycleConfig::default()
        )
        .is_empty());
    }

    #[test]
    fn non_voting_campaigns_never_notify() {
        let campaign_address = Pubkey::new_unique();
        let mut campaign = voting_campaign();
        // Still funding: voting has not started.
        campaign.deadline_ms = NOW + MS_PER_DAY;
        campaign.proof_url = String::new();

        let campaigns = vec![(campaign_address, campaign)];
        let receipts = vec![(Pubkey::new_unique(), receipt_for(campaign_address, false))];

        assert!(pending_vote_notifications(
            &campaigns,
            &receipts,
            NOW,
            &LifecycleConfig::default()
        )
        .is_empty());
    }

    #[test]
    fn receipts_for_unknown_campaigns_are_ignored() {
        let campaigns = vec![(Pubkey::new_unique(), voting_campaign())];
        let receipts = vec![(Pubkey::new_unique(), receipt_for(Pubkey::new_unique(), false))];

        assert!(pending_vote_notifications(
            &campaigns,
            &receipts,
            NOW,
            &LifecycleConfig::default()
        )
        .is_empty());
    }

    #[test]
    fn notifications_close_with_the_voting_window() {
        let campaign_address = Pubkey::new_unique();
        let campaign = voting_campaign();
        let voting_deadline = campaign.deadline_ms
            + PROOF_SUBMISSION_PERIOD_MS
            + fundflow_sdk::VOTING_PERIOD_MS;
        let campaigns = vec![(campaign_address, campaign)];
        let receipts = vec![(Pubkey::new_unique(), receipt_for(campaign_address, false))];

        let config = LifecycleConfig::default();
        assert_eq!(
            pending_vote_notifications(&campaigns, &receipts, voting_deadline, &config).len(),
            1
        );
        assert!(
            pending_vote_notifications(&campaigns, &receipts, voting_deadline + 1, &config)
                .is_empty()
        );
    }
}
