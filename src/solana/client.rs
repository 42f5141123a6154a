use anyhow::{anyhow, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use std::sync::Arc;
use std::time::Duration;

use crate::solana::ledger::SolanaLedger;

/// Create a Solana client with confirmed commitment
pub fn create_solana_client(rpc_url: &str) -> Result<Arc<RpcClient>> {
    let rpc_url = rpc_url.trim();
    if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
        return Err(anyhow!("Invalid RPC URL: {}", rpc_url));
    }

    let client = RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

    Ok(Arc::new(client))
}

/// Ledger handle for broadcasting and confirming swaps
pub fn create_ledger(rpc_url: &str, poll_interval: Duration) -> Result<SolanaLedger> {
    Ok(SolanaLedger::new(create_solana_client(rpc_url)?, poll_interval))
}
