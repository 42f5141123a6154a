use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::solana::jupiter::models::{QuoteParams, QuoteResponse};

// Error payload the quote API returns instead of a quote
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Fetches swap quotes
#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse>;
}

/// Quote service backed by the Jupiter quote API
pub struct JupiterQuoteService {
    http_client: Client,
    quote_api_url: String,
}

impl JupiterQuoteService {
    pub fn new(quote_api_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            http_client,
            quote_api_url: quote_api_url.to_string(),
        })
    }
}

/// Fail on an `{ "error": ... }` payload, otherwise deserialize into `D`
pub(crate) fn check_for_api_error<D>(value: serde_json::Value) -> Result<D>
where
    D: DeserializeOwned,
{
    if let Ok(ErrorResponse { error }) = serde_json::from_value::<ErrorResponse>(value.clone()) {
        Err(anyhow!("{}", error))
    } else {
        serde_json::from_value(value).map_err(|err| anyhow!("JSON deserialization error: {}", err))
    }
}

#[async_trait]
impl QuoteService for JupiterQuoteService {
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse> {
        debug!("Requesting quote with parameters: {:?}", params);

        let response = self
            .http_client
            .get(&self.quote_api_url)
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse quote response ({}): {}", status, e))?;

        let quote: QuoteResponse = check_for_api_error(body)
            .map_err(|e| anyhow!("Jupiter API error ({}): {}", status, e))?;

        info!(
            "Quote received successfully: input_amount={}, output_amount={}",
            quote.in_amount, quote.out_amount
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_for_api_error_surfaces_message() {
        let result: Result<QuoteResponse> =
            check_for_api_error(json!({ "error": "Could not find any route" }));

        assert_eq!(result.unwrap_err().to_string(), "Could not find any route");
    }

    #[test]
    fn test_check_for_api_error_parses_quote() {
        let value = serde_json::to_value(crate::solana::jupiter::models::fixtures::quote(
            "1500000000",
            "0.05",
        ))
        .unwrap();

        let quote: QuoteResponse = check_for_api_error(value).unwrap();
        assert_eq!(quote.out_amount, "1500000000");
    }

    #[test]
    fn test_check_for_api_error_rejects_malformed_quote() {
        let result: Result<QuoteResponse> = check_for_api_error(json!({ "outAmount": 5 }));
        assert!(result.is_err());
    }
}
