use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, info};
use reqwest::Client as HttpClient;
use solana_sdk::transaction::VersionedTransaction;
use std::time::Duration;

use crate::solana::jupiter::models::{BuildSwapRequest, BuildSwapResponse};
use crate::solana::jupiter::quote_service::check_for_api_error;

/// Builds unsigned swap transactions for a quote
#[async_trait]
pub trait SwapTransactionService: Send + Sync {
    /// Returns the base64-encoded transaction
    async fn build_swap_transaction(&self, request: &BuildSwapRequest) -> Result<String>;
}

/// Posts build requests to the caller's own swap API endpoint
pub struct HttpSwapTransactionService {
    http_client: HttpClient,
    endpoint: String,
}

impl HttpSwapTransactionService {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl SwapTransactionService for HttpSwapTransactionService {
    async fn build_swap_transaction(&self, request: &BuildSwapRequest) -> Result<String> {
        debug!(
            "Requesting swap transaction for wallet {} from {}",
            request.wallet_address, self.endpoint
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse swap API response: {}", e))?;

        let transaction = transaction_from_response(check_for_api_error(body)?)?;

        info!("Swap transaction received: tx_length={}", transaction.len());

        Ok(transaction)
    }
}

fn transaction_from_response(response: BuildSwapResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(anyhow!("{}", error));
    }

    response
        .transaction
        .ok_or_else(|| anyhow!("Swap API response did not include a transaction"))
}

/// Decode a base64 wire transaction
pub fn decode_transaction(transaction_base64: &str) -> Result<VersionedTransaction> {
    let raw = BASE64
        .decode(transaction_base64.trim())
        .map_err(|e| anyhow!("Failed to decode transaction: {}", e))?;

    bincode::deserialize(&raw).map_err(|e| anyhow!("Failed to deserialize transaction: {}", e))
}

/// Encode a transaction the way the build endpoint returns it
pub fn encode_transaction(transaction: &VersionedTransaction) -> Result<String> {
    let raw = bincode::serialize(transaction)
        .map_err(|e| anyhow!("Failed to serialize transaction: {}", e))?;

    Ok(BASE64.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::hash::Hash;
    use solana_sdk::message::{Message, VersionedMessage};
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::signature::Signature;

    fn unsigned_transaction() -> VersionedTransaction {
        let payer = Pubkey::new_unique();
        let message = Message::new_with_blockhash(&[], Some(&payer), &Hash::new_unique());

        VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::Legacy(message),
        }
    }

    #[test]
    fn test_transaction_wire_encoding() {
        let transaction = unsigned_transaction();
        let encoded = encode_transaction(&transaction).unwrap();

        let decoded = decode_transaction(&encoded).unwrap();
        assert_eq!(decoded, transaction);
    }

    #[test]
    fn test_decode_transaction_rejects_garbage() {
        assert!(decode_transaction("***").is_err());
        assert!(decode_transaction(&BASE64.encode([1u8, 2, 3])).is_err());
    }

    #[test]
    fn test_transaction_from_response() {
        let ok = BuildSwapResponse {
            transaction: Some("AQID".to_string()),
            error: None,
        };
        assert_eq!(transaction_from_response(ok).unwrap(), "AQID");

        let failed = BuildSwapResponse {
            transaction: None,
            error: Some("Insufficient balance".to_string()),
        };
        assert_eq!(
            transaction_from_response(failed).unwrap_err().to_string(),
            "Insufficient balance"
        );

        let empty = BuildSwapResponse {
            transaction: None,
            error: None,
        };
        assert!(transaction_from_response(empty).is_err());
    }
}
