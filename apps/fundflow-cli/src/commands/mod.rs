pub mod create;
pub mod donate;
pub mod list;
pub mod notifications;
pub mod refund;
pub mod show;
pub mod submit_proof;
pub mod vote;
pub mod withdraw;

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use fundflow_client::{FundflowClient, TransactionResult};
use fundflow_sdk::AddressFinder;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    transaction::Transaction,
};

use crate::config::ProtocolConfig;
use crate::error::{CliError, CliResult};

pub(crate) fn client(config: &ProtocolConfig) -> FundflowClient {
    FundflowClient::with_address_finder(
        config.rpc_url.clone(),
        AddressFinder::new(config.program_id),
    )
}

pub(crate) fn unix_time_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

pub(crate) fn parse_campaign_address(raw: &str) -> CliResult<Pubkey> {
    Pubkey::from_str(raw).map_err(|_| CliError::InvalidAddress(raw.to_string()))
}

pub(crate) fn load_keypair(path: &Path) -> CliResult<Keypair> {
    read_keypair_file(path).map_err(|e| {
        CliError::InvalidConfig(format!(
            "failed to read keypair from '{}': {e}",
            path.display()
        ))
    })
}

pub(crate) fn format_timestamp(ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| format!("{ms} ms"))
}

/// Sign with the given keypairs, simulate, and send unless `dry_run`.
pub(crate) fn sign_and_submit(
    client: &FundflowClient,
    mut tx: Transaction,
    signers: &[&Keypair],
    dry_run: bool,
) -> CliResult<TransactionResult> {
    let blockhash = tx.message.recent_blockhash;
    tx.try_sign(signers, blockhash)
        .map_err(|e| CliError::Signing(e.to_string()))?;

    let result = client.simulate_and_send(&tx, dry_run)?;
    match &result {
        TransactionResult::Simulated(simulation) => {
            println!(
                "🧪 Dry run successful - transaction would consume {} compute units",
                simulation.compute_units.unwrap_or(0)
            );
        }
        TransactionResult::Executed(signature) => {
            println!("✅ Transaction confirmed: {signature}");
        }
    }
    Ok(result)
}
