//! Result types for transaction submission.

use solana_client::rpc_response::RpcSimulateTransactionResult;
use solana_sdk::signature::Signature;

/// Outcome of [`crate::FundflowClient::simulate_and_send`].
#[derive(Debug)]
pub enum TransactionResult {
    /// Dry-run mode: the transaction was simulated and never sent.
    Simulated(SimulationResult),
    /// The transaction was sent and confirmed.
    Executed(Signature),
}

/// Digest of an RPC simulation response.
#[derive(Debug)]
pub struct SimulationResult {
    pub success: bool,
    pub compute_units: Option<u64>,
    pub error: Option<String>,
    pub logs: Vec<String>,
}

impl From<RpcSimulateTransactionResult> for SimulationResult {
    fn from(result: RpcSimulateTransactionResult) -> Self {
        Self {
            success: result.err.is_none(),
            compute_units: result.units_consumed,
            error: result.err.as_ref().map(|e| e.to_string()),
            logs: result.logs.unwrap_or_default(),
        }
    }
}
