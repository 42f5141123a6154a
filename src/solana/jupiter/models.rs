// src/solana/jupiter/models.rs
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::solana::tokens::constants::DEFAULT_SLIPPAGE_MODE;

// Which side of the trade is fixed by the user
#[derive(Serialize, Deserialize, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SwapMode {
    #[default]
    ExactIn,
    ExactOut,
}

impl SwapMode {
    pub fn flip(self) -> Self {
        match self {
            Self::ExactIn => Self::ExactOut,
            Self::ExactOut => Self::ExactIn,
        }
    }
}

impl FromStr for SwapMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ExactIn" => Ok(Self::ExactIn),
            "ExactOut" => Ok(Self::ExactOut),
            _ => Err(anyhow!("Parse SwapMode error: Invalid value '{}'", s)),
        }
    }
}

impl fmt::Display for SwapMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::ExactIn => write!(f, "ExactIn"),
            Self::ExactOut => write!(f, "ExactOut"),
        }
    }
}

// Parameters of one quote request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub input_mint: String,
    pub output_mint: String,
    /// Base units of the fixed side
    pub amount: u128,
    pub slippage_bps: u16,
    pub platform_fee_bps: u16,
    pub fee_account: String,
    pub swap_mode: SwapMode,
}

impl QuoteParams {
    /// Query string pairs in the order the quote API documents them
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("inputMint", self.input_mint.clone()),
            ("outputMint", self.output_mint.clone()),
            ("amount", self.amount.to_string()),
            ("slippageBps", self.slippage_bps.to_string()),
            ("platformFeeBps", self.platform_fee_bps.to_string()),
            ("feeAccount", self.fee_account.clone()),
            ("swapMode", self.swap_mode.to_string()),
        ]
    }
}

/// Typed view of the quote fields the swap flow reads
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDetails {
    pub input_mint: String,
    pub in_amount: String,
    pub output_mint: String,
    pub out_amount: String,
    pub other_amount_threshold: String,
    pub swap_mode: String,
    pub slippage_bps: u16,
    #[serde(default)]
    pub platform_fee: Option<PlatformFee>,
    pub price_impact_pct: String,
    #[serde(default)]
    pub route_plan: Vec<RoutePlan>,
    #[serde(default)]
    pub context_slot: Option<u64>,
    #[serde(default)]
    pub time_taken: Option<f64>,
}

/// Quote snapshot returned by the API.
///
/// Serializes back to exactly the JSON it was parsed from, so the build
/// endpoint receives the quote untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct QuoteResponse {
    details: QuoteDetails,
    raw: Value,
}

impl QuoteResponse {
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl Deref for QuoteResponse {
    type Target = QuoteDetails;

    fn deref(&self) -> &QuoteDetails {
        &self.details
    }
}

impl TryFrom<Value> for QuoteResponse {
    type Error = serde_json::Error;

    fn try_from(raw: Value) -> std::result::Result<Self, Self::Error> {
        let details = QuoteDetails::deserialize(&raw)?;
        Ok(Self { details, raw })
    }
}

impl From<QuoteResponse> for Value {
    fn from(quote: QuoteResponse) -> Self {
        quote.raw
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFee {
    pub amount: String,
    pub fee_bps: u16,
}

// Route breakdown
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub swap_info: SwapInfo,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub amm_key: String,
    pub label: Option<String>,
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: String,
    pub out_amount: String,
    pub fee_amount: String,
    pub fee_mint: String,
}

// Body posted to the transaction-build endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSwapRequest {
    pub quote_response: QuoteResponse,
    pub wallet_address: String,
    /// Destination mint
    pub mint_address: String,
    pub slippage_mode: String,
    pub slippage_bps: u16,
    pub swap_mode: SwapMode,
}

impl BuildSwapRequest {
    pub fn new(
        quote_response: QuoteResponse,
        wallet_address: String,
        mint_address: String,
        slippage_bps: u16,
        swap_mode: SwapMode,
    ) -> Self {
        Self {
            quote_response,
            wallet_address,
            mint_address,
            slippage_mode: DEFAULT_SLIPPAGE_MODE.to_string(),
            slippage_bps,
            swap_mode,
        }
    }
}

// Build endpoint reply: a base64 transaction or an error
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSwapResponse {
    pub transaction: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn quote(out_amount: &str, price_impact_pct: &str) -> QuoteResponse {
        let value = serde_json::json!({
            "inputMint": "So11111111111111111111111111111111111111112",
            "inAmount": "1000000000",
            "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "outAmount": out_amount,
            "otherAmountThreshold": out_amount,
            "swapMode": "ExactIn",
            "slippageBps": 50,
            "priceImpactPct": price_impact_pct,
            "routePlan": [],
            "contextSlot": 1,
            "timeTaken": 0.01
        });

        serde_json::from_value(value).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_mode_strings() {
        assert_eq!(SwapMode::ExactIn.to_string(), "ExactIn");
        assert_eq!("ExactOut".parse::<SwapMode>().unwrap(), SwapMode::ExactOut);
        assert!("exact_in".parse::<SwapMode>().is_err());
        assert_eq!(SwapMode::ExactIn.flip(), SwapMode::ExactOut);
        assert_eq!(SwapMode::ExactOut.flip(), SwapMode::ExactIn);
    }

    #[test]
    fn test_quote_params_query_pairs() {
        let params = QuoteParams {
            input_mint: "in".to_string(),
            output_mint: "out".to_string(),
            amount: 1_000_000_000,
            slippage_bps: 50,
            platform_fee_bps: 80,
            fee_account: "fee".to_string(),
            swap_mode: SwapMode::ExactOut,
        };

        let pairs = params.query_pairs();
        assert!(pairs.contains(&("amount", "1000000000".to_string())));
        assert!(pairs.contains(&("platformFeeBps", "80".to_string())));
        assert!(pairs.contains(&("feeAccount", "fee".to_string())));
        assert!(pairs.contains(&("swapMode", "ExactOut".to_string())));
        assert_eq!(pairs.len(), 7);
    }

    #[test]
    fn test_quote_response_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "inputMint": "a",
            "inAmount": "1",
            "outputMint": "b",
            "outAmount": "2",
            "otherAmountThreshold": "2",
            "swapMode": "ExactIn",
            "slippageBps": 50,
            "priceImpactPct": "0.01",
            "routePlan": [{
                "swapInfo": {
                    "ammKey": "amm",
                    "label": "Whirlpool",
                    "inputMint": "a",
                    "outputMint": "b",
                    "inAmount": "1",
                    "outAmount": "2",
                    "feeAmount": "0",
                    "feeMint": "a"
                },
                "percent": 100
            }],
            "contextSlot": 10,
            "timeTaken": 0.5,
            "swapUsdValue": "150.2",
            "simplerRouteUsed": false
        });

        let quote: QuoteResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(quote.route_plan[0].swap_info.label.as_deref(), Some("Whirlpool"));
        assert_eq!(quote.raw().get("swapUsdValue"), Some(&Value::from("150.2")));

        assert_eq!(serde_json::to_value(&quote).unwrap(), raw);
    }

    #[test]
    fn test_quote_forwarded_unchanged() {
        // Nested unknown fields and no contextSlot/timeTaken
        let raw = serde_json::json!({
            "inputMint": "a",
            "inAmount": "1",
            "outputMint": "b",
            "outAmount": "2",
            "otherAmountThreshold": "2",
            "swapMode": "ExactIn",
            "slippageBps": 50,
            "platformFee": { "amount": "0", "feeBps": 80, "feeMint": "b" },
            "priceImpactPct": "0.01",
            "routePlan": [{
                "swapInfo": {
                    "ammKey": "amm",
                    "label": null,
                    "inputMint": "a",
                    "outputMint": "b",
                    "inAmount": "1",
                    "outAmount": "2",
                    "feeAmount": "0",
                    "feeMint": "a",
                    "poolVersion": 2
                },
                "percent": 100,
                "bps": 10000
            }]
        });

        let quote: QuoteResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(quote.context_slot, None);
        assert_eq!(quote.platform_fee.as_ref().map(|fee| fee.fee_bps), Some(80));

        let request = BuildSwapRequest::new(
            quote,
            "wallet".to_string(),
            "mint".to_string(),
            50,
            SwapMode::ExactIn,
        );
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["quoteResponse"], raw);
    }

    #[test]
    fn test_quote_rejects_missing_fields() {
        let result: Result<QuoteResponse, _> =
            serde_json::from_value(serde_json::json!({ "inputMint": "a" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_request_body_shape() {
        let request = BuildSwapRequest::new(
            fixtures::quote("1500000000", "0.05"),
            "wallet".to_string(),
            "mint".to_string(),
            100,
            SwapMode::ExactIn,
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["walletAddress"], "wallet");
        assert_eq!(body["mintAddress"], "mint");
        assert_eq!(body["slippageMode"], "auto");
        assert_eq!(body["slippageBps"], 100);
        assert_eq!(body["swapMode"], "ExactIn");
        assert_eq!(body["quoteResponse"]["outAmount"], "1500000000");
    }
}
