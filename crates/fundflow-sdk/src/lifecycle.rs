/*!
# Campaign Lifecycle

Pure derivation of a campaign's lifecycle state from an already-fetched
account snapshot and a reference clock. Nothing here performs I/O or keeps
state between calls, so views and pollers can re-evaluate the same snapshot
with a moving clock to animate countdowns.

The rules are evaluated in a fixed priority order and the first match wins.
The order is load-bearing: a withdrawn campaign after its deadline with no
proof satisfies several rules at once, and only the withdrawal rule may
decide it.

1. Funds withdrawn → `Successful`, terminal regardless of anything else.
2. Clock before the deadline → `Funding`.
3. All-time total below the goal → `Failed`.
4. No proof: inside the proof window → `ProofSubmission`, past it → `Failed`.
5. Proof present and the voting window still open → `Voting`.
6. Voting closed: approvals at or above the threshold share of the all-time
   total → `Successful`, otherwise `Rejected`.
*/

use std::fmt;

use solana_sdk::pubkey::Pubkey;

use crate::state::CampaignAccount;

pub const MS_PER_MINUTE: u64 = 60 * 1000;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Default length of the creator's proof submission window.
pub const PROOF_SUBMISSION_PERIOD_MS: u64 = 3 * MS_PER_DAY;

/// Default length of the donor voting window.
pub const VOTING_PERIOD_MS: u64 = 3 * MS_PER_DAY;

/// Default fraction of all raised funds that must approve the proof.
pub const VOTE_THRESHOLD: f64 = 0.51;

/// Timing windows and vote threshold applied during state resolution.
///
/// Always passed explicitly rather than read from ambient globals, so
/// resolution stays testable with varied parameters and a deployment can
/// match whatever constants its program instance was configured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleConfig {
    pub proof_submission_period_ms: u64,
    pub voting_period_ms: u64,
    /// Fraction in `(0, 1]` of the all-time raised total.
    pub vote_threshold: f64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            proof_submission_period_ms: PROOF_SUBMISSION_PERIOD_MS,
            voting_period_ms: VOTING_PERIOD_MS,
            vote_threshold: VOTE_THRESHOLD,
        }
    }
}

impl LifecycleConfig {
    fn proof_deadline_ms(&self, campaign: &CampaignAccount) -> u64 {
        campaign
            .deadline_ms
            .saturating_add(self.proof_submission_period_ms)
    }

    fn voting_deadline_ms(&self, campaign: &CampaignAccount) -> u64 {
        self.proof_deadline_ms(campaign)
            .saturating_add(self.voting_period_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignState {
    Funding,
    Failed,
    ProofSubmission,
    Voting,
    Successful,
    Rejected,
}

impl CampaignState {
    /// Fixed user-facing sentence for each state.
    pub fn description(&self) -> &'static str {
        match self {
            CampaignState::Funding => "Campaign is currently accepting donations",
            CampaignState::Failed => {
                "Campaign did not reach its goal or proof was not submitted. \
                 Donors can claim refunds."
            }
            CampaignState::ProofSubmission => "Waiting for creator to submit proof of progress",
            CampaignState::Voting => {
                "Voting period is active. Donors can vote on whether the creator \
                 is using funds properly."
            }
            CampaignState::Successful => "Campaign successful! The creator can withdraw funds.",
            CampaignState::Rejected => "Vote did not pass. Donors can claim refunds.",
        }
    }

    /// Whether the campaign can still move to another state as time passes.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CampaignState::Failed | CampaignState::Successful | CampaignState::Rejected
        )
    }
}

impl fmt::Display for CampaignState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CampaignState::Funding => "Funding",
            CampaignState::Failed => "Failed",
            CampaignState::ProofSubmission => "Proof submission",
            CampaignState::Voting => "Voting",
            CampaignState::Successful => "Successful",
            CampaignState::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// Resolve the campaign's lifecycle state at `now_ms`.
pub fn campaign_state(
    campaign: &CampaignAccount,
    now_ms: u64,
    config: &LifecycleConfig,
) -> CampaignState {
    // Withdrawal is proof of success and absorbs every later rule.
    if campaign.withdrawn_amount > 0 {
        return CampaignState::Successful;
    }

    if now_ms < campaign.deadline_ms {
        return CampaignState::Funding;
    }

    // Judge the goal against the all-time total, not just the escrow balance:
    // refunds and withdrawals must not make a funded campaign look short.
    let total_raised = campaign.total_raised();
    if total_raised < campaign.goal {
        return CampaignState::Failed;
    }

    if !campaign.has_proof() {
        return if now_ms > config.proof_deadline_ms(campaign) {
            CampaignState::Failed
        } else {
            CampaignState::ProofSubmission
        };
    }

    if now_ms <= config.voting_deadline_ms(campaign) {
        return CampaignState::Voting;
    }

    let vote_threshold = total_raised as f64 * config.vote_threshold;
    if campaign.vote_amount as f64 >= vote_threshold {
        CampaignState::Successful
    } else {
        CampaignState::Rejected
    }
}

/// Milliseconds until the current window's boundary, clamped to zero.
///
/// Terminal states have no window and report zero.
pub fn time_remaining_ms(campaign: &CampaignAccount, now_ms: u64, config: &LifecycleConfig) -> u64 {
    match campaign_state(campaign, now_ms, config) {
        CampaignState::Funding => campaign.deadline_ms.saturating_sub(now_ms),
        CampaignState::ProofSubmission => config.proof_deadline_ms(campaign).saturating_sub(now_ms),
        CampaignState::Voting => config.voting_deadline_ms(campaign).saturating_sub(now_ms),
        _ => 0,
    }
}

/// Coarse human rendering of a duration, largest applicable unit first:
/// days+hours at a day or more, hours+minutes at an hour or more, minutes
/// otherwise. The smaller unit is dropped when it is zero.
pub fn format_time_remaining(ms: u64) -> String {
    fn unit(value: u64, name: &str) -> String {
        if value == 1 {
            format!("1 {name}")
        } else {
            format!("{value} {name}s")
        }
    }

    let days = ms / MS_PER_DAY;
    let hours = (ms % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;

    if days > 0 {
        if hours > 0 {
            format!("{}, {}", unit(days, "day"), unit(hours, "hour"))
        } else {
            unit(days, "day")
        }
    } else if hours > 0 {
        if minutes > 0 {
            format!("{}, {}", unit(hours, "hour"), unit(minutes, "minute"))
        } else {
            unit(hours, "hour")
        }
    } else {
        unit(minutes, "minute")
    }
}

/// Single boundary for actor-vs-creator identity checks, so every permission
/// predicate compares the same way.
pub fn is_creator(campaign: &CampaignAccount, actor: &Pubkey) -> bool {
    campaign.creator == *actor
}

/// Creator may submit proof: proof window open, nothing submitted yet.
pub fn can_submit_proof(
    campaign: &CampaignAccount,
    actor: &Pubkey,
    now_ms: u64,
    config: &LifecycleConfig,
) -> bool {
    campaign_state(campaign, now_ms, config) == CampaignState::ProofSubmission
        && is_creator(campaign, actor)
        && !campaign.has_proof()
}

/// Voting window open. The caller must separately verify the actor holds an
/// unvoted donation receipt for this campaign.
pub fn can_vote(campaign: &CampaignAccount, now_ms: u64, config: &LifecycleConfig) -> bool {
    campaign_state(campaign, now_ms, config) == CampaignState::Voting
}

/// Creator may withdraw escrowed funds.
pub fn can_withdraw(
    campaign: &CampaignAccount,
    actor: &Pubkey,
    now_ms: u64,
    config: &LifecycleConfig,
) -> bool {
    campaign_state(campaign, now_ms, config) == CampaignState::Successful
        && is_creator(campaign, actor)
}

/// Donors may claim refunds. The caller must separately verify the actor
/// holds a donation receipt for this campaign.
pub fn can_refund(campaign: &CampaignAccount, now_ms: u64, config: &LifecycleConfig) -> bool {
    matches!(
        campaign_state(campaign, now_ms, config),
        CampaignState::Failed | CampaignState::Rejected
    )
}
