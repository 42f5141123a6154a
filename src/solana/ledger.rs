use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{TransactionError, VersionedTransaction};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Latest block reference a transaction is confirmed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// Final status of a broadcast transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionConfirmation {
    Confirmed,
    Failed(TransactionError),
}

/// Ledger operations the swap flow needs
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Submit a signed transaction, returning its signature
    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature>;

    async fn get_latest_blockhash(&self) -> Result<LatestBlockhash>;

    /// Wait until the signature reaches `confirmed` or the blockhash expires
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        latest_blockhash: &LatestBlockhash,
    ) -> Result<TransactionConfirmation>;
}

/// `LedgerRpc` over the nonblocking Solana RPC client
pub struct SolanaLedger {
    client: Arc<RpcClient>,
    poll_interval: Duration,
}

impl SolanaLedger {
    pub fn new(client: Arc<RpcClient>, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }
}

#[async_trait]
impl LedgerRpc for SolanaLedger {
    async fn send_transaction(&self, transaction: &VersionedTransaction) -> Result<Signature> {
        info!("Calling network");

        self.client
            .send_transaction(transaction)
            .await
            .map_err(|e| anyhow!("Failed to send transaction: {}", e))
    }

    async fn get_latest_blockhash(&self) -> Result<LatestBlockhash> {
        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
            .await
            .map_err(|e| anyhow!("Failed to get latest blockhash: {}", e))?;

        Ok(LatestBlockhash {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        latest_blockhash: &LatestBlockhash,
    ) -> Result<TransactionConfirmation> {
        loop {
            let status = self
                .client
                .get_signature_status_with_commitment(signature, CommitmentConfig::confirmed())
                .await
                .map_err(|e| anyhow!("Failed to get signature status: {}", e))?;

            match status {
                Some(Ok(())) => return Ok(TransactionConfirmation::Confirmed),
                Some(Err(err)) => return Ok(TransactionConfirmation::Failed(err)),
                None => {}
            }

            let block_height = self
                .client
                .get_block_height_with_commitment(CommitmentConfig::confirmed())
                .await
                .map_err(|e| anyhow!("Failed to get block height: {}", e))?;

            if block_height > latest_blockhash.last_valid_block_height {
                return Err(anyhow!(
                    "Transaction {} expired: block height {} exceeded {}",
                    signature,
                    block_height,
                    latest_blockhash.last_valid_block_height
                ));
            }

            debug!("Waiting for confirmation of {}", signature);
            sleep(self.poll_interval).await;
        }
    }
}
