use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::path::Path;

use fundflow_sdk::{
    LifecycleConfig, CROWDFUND_PROGRAM_ID, PROOF_SUBMISSION_PERIOD_MS, VOTE_THRESHOLD,
    VOTING_PERIOD_MS,
};

use crate::error::{CliError, CliResult};

/// Protocol configuration file structure.
///
/// Every field is optional in the file; omitted fields keep the built-in
/// defaults. The lifecycle values must match the deployed program instance
/// or displayed states will disagree with what the program enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// RPC endpoint queried for campaign state
    pub rpc_url: String,

    /// Deployed crowdfund program
    pub program_id: Pubkey,

    /// Length of the creator's proof submission window, in milliseconds
    pub proof_submission_period_ms: u64,

    /// Length of the donor voting window, in milliseconds
    pub voting_period_ms: u64,

    /// Fraction in (0, 1] of all raised funds that must approve the proof
    pub vote_threshold: f64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            program_id: CROWDFUND_PROGRAM_ID,
            proof_submission_period_ms: PROOF_SUBMISSION_PERIOD_MS,
            voting_period_ms: VOTING_PERIOD_MS,
            vote_threshold: VOTE_THRESHOLD,
        }
    }
}

impl ProtocolConfig {
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            None => Self::default(),
            Some(path) => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if !(self.vote_threshold > 0.0 && self.vote_threshold <= 1.0) {
            return Err(CliError::InvalidConfig(format!(
                "vote_threshold {} outside (0, 1]",
                self.vote_threshold
            )));
        }
        Ok(())
    }

    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig {
            proof_submission_period_ms: self.proof_submission_period_ms,
            voting_period_ms: self.voting_period_ms,
            vote_threshold: self.vote_threshold,
        }
    }
}
