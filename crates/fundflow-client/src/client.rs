//! Blocking RPC client for the crowdfund program.

use fundflow_sdk::{
    has_discriminator, AddressFinder, CampaignAccount, DonationReceipt,
    ACCOUNT_DISCRIMINATOR_LEN,
};
use solana_client::{
    client_error::{ClientError as RpcClientError, ClientErrorKind},
    rpc_client::RpcClient,
    rpc_config::RpcSimulateTransactionConfig,
    rpc_request::RpcError,
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use tracing::{debug, info, warn};

use crate::{
    errors::{ClientError, ClientResult},
    types::{SimulationResult, TransactionResult},
};

/// Unified client for crowdfund reads and transaction submission.
pub struct FundflowClient {
    address_finder: AddressFinder,
    rpc_client: RpcClient,
}

impl FundflowClient {
    /// Client against the default program with confirmed commitment.
    pub fn new(rpc_url: String) -> Self {
        Self::with_address_finder_and_commitment(
            rpc_url,
            AddressFinder::default(),
            CommitmentConfig::confirmed(),
        )
    }

    pub fn with_address_finder(rpc_url: String, address_finder: AddressFinder) -> Self {
        Self::with_address_finder_and_commitment(
            rpc_url,
            address_finder,
            CommitmentConfig::confirmed(),
        )
    }

    pub fn with_address_finder_and_commitment(
        rpc_url: String,
        address_finder: AddressFinder,
        commitment: CommitmentConfig,
    ) -> Self {
        Self {
            address_finder,
            rpc_client: RpcClient::new_with_commitment(rpc_url, commitment),
        }
    }

    // ============================================================================
    // Reads
    // ============================================================================

    /// Fetch and decode one campaign. Absent accounts map to `None`.
    pub fn get_campaign(&self, campaign: &Pubkey) -> ClientResult<Option<CampaignAccount>> {
        let Some(data) = self.get_account_data_optional(campaign)? else {
            return Ok(None);
        };

        CampaignAccount::from_account_data(&data)
            .map(Some)
            .map_err(|e| ClientError::InvalidAccountData {
                address: *campaign,
                reason: e.to_string(),
            })
    }

    /// Fetch one campaign, erroring if it does not exist.
    pub fn expect_campaign(&self, campaign: &Pubkey) -> ClientResult<CampaignAccount> {
        self.get_campaign(campaign)?
            .ok_or(ClientError::CampaignNotFound(*campaign))
    }

    /// Every campaign account the program owns.
    ///
    /// The program also owns donation receipts, so accounts are filtered by
    /// discriminator; anything that then fails to decode is skipped with a
    /// warning rather than failing the whole listing.
    pub fn list_campaigns(&self) -> ClientResult<Vec<(Pubkey, CampaignAccount)>> {
        let accounts = self
            .rpc_client
            .get_program_accounts(&self.address_finder.program_id)?;
        debug!(total = accounts.len(), "fetched program accounts");

        let mut campaigns = Vec::new();
        for (address, account) in accounts {
            if !has_discriminator(&account.data, CampaignAccount::discriminator()) {
                continue;
            }
            match CampaignAccount::from_account_data(&account.data) {
                Ok(campaign) => campaigns.push((address, campaign)),
                Err(e) => warn!(%address, error = %e, "skipping undecodable campaign account"),
            }
        }
        debug!(campaigns = campaigns.len(), "decoded campaign accounts");
        Ok(campaigns)
    }

    /// Every donation receipt held by `owner`, most recent donation last.
    pub fn get_donation_receipts(
        &self,
        owner: &Pubkey,
    ) -> ClientResult<Vec<(Pubkey, DonationReceipt)>> {
        let accounts = self
            .rpc_client
            .get_program_accounts(&self.address_finder.program_id)?;

        let mut receipts = Vec::new();
        for (address, account) in accounts {
            if !has_discriminator(&account.data, DonationReceipt::discriminator()) {
                continue;
            }
            match DonationReceipt::from_account_data(&account.data) {
                Ok(receipt) if receipt.donor == *owner => receipts.push((address, receipt)),
                Ok(_) => {}
                Err(e) => warn!(%address, error = %e, "skipping undecodable receipt account"),
            }
        }
        receipts.sort_by_key(|(_, receipt)| receipt.donated_at_ms);
        debug!(receipts = receipts.len(), %owner, "decoded donation receipts");
        Ok(receipts)
    }

    pub fn get_balance(&self, address: &Pubkey) -> ClientResult<u64> {
        Ok(self.rpc_client.get_balance(address)?)
    }

    pub fn get_latest_blockhash(&self) -> ClientResult<Hash> {
        Ok(self.rpc_client.get_latest_blockhash()?)
    }

    fn get_account_data_optional(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>> {
        match self.rpc_client.get_account_data(address) {
            Ok(data) => {
                if data.len() < ACCOUNT_DISCRIMINATOR_LEN {
                    return Err(ClientError::InvalidAccountData {
                        address: *address,
                        reason: "account data too short for discriminator".to_string(),
                    });
                }
                Ok(Some(data))
            }
            Err(RpcClientError {
                kind: ClientErrorKind::RpcError(RpcError::ForUser(_)),
                ..
            })
            | Err(RpcClientError {
                kind: ClientErrorKind::RpcError(RpcError::RpcResponseError { .. }),
                ..
            }) => Ok(None),
            Err(e) => Err(ClientError::Rpc(e)),
        }
    }

    // ============================================================================
    // Transactions
    // ============================================================================

    /// Simulate without executing.
    pub fn simulate_transaction(&self, tx: &Transaction) -> ClientResult<SimulationResult> {
        let config = RpcSimulateTransactionConfig {
            sig_verify: true,
            replace_recent_blockhash: false,
            commitment: Some(self.rpc_client.commitment()),
            encoding: None,
            accounts: None,
            min_context_slot: None,
            inner_instructions: false,
        };

        let result = self
            .rpc_client
            .simulate_transaction_with_config(tx, config)?;
        Ok(SimulationResult::from(result.value))
    }

    /// Send a signed transaction and wait for confirmation, the gate the UI
    /// relied on before reporting success to the user.
    pub fn send_transaction(&self, tx: &Transaction) -> ClientResult<Signature> {
        let signature = self.rpc_client.send_and_confirm_transaction(tx)?;
        info!(%signature, "transaction confirmed");
        Ok(signature)
    }

    /// Simulate, then send unless `dry_run` is set. A failed simulation is
    /// surfaced as an error and nothing is sent; there are no automatic
    /// retries.
    pub fn simulate_and_send(
        &self,
        tx: &Transaction,
        dry_run: bool,
    ) -> ClientResult<TransactionResult> {
        let simulation = self.simulate_transaction(tx)?;

        if !simulation.success {
            for line in &simulation.logs {
                debug!(log = %line, "simulation log");
            }
            return Err(ClientError::SimulationFailed(
                simulation
                    .error
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        if dry_run {
            debug!(
                compute_units = simulation.compute_units.unwrap_or(0),
                "dry run, not sending"
            );
            return Ok(TransactionResult::Simulated(simulation));
        }

        let signature = self.send_transaction(tx)?;
        Ok(TransactionResult::Executed(signature))
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn address_finder(&self) -> &AddressFinder {
        &self.address_finder
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.address_finder.program_id
    }

    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }
}
