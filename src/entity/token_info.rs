use serde::{Deserialize, Serialize};

use crate::solana::tokens::constants::{
    SOL_DECIMALS, SOL_MINT, SSE_DECIMALS, SSE_MINT, USDC_DECIMALS, USDC_MINT,
};

/// A selectable token. Replaced wholesale whenever the selection changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String, // Mint address
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TokenInfo {
    pub fn new(address: &str, symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            address: address.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: &str) -> Self {
        self.image_url = Some(image_url.to_string());
        self
    }

    pub fn sol() -> Self {
        Self::new(SOL_MINT, "SOL", "Wrapped SOL", SOL_DECIMALS)
    }

    pub fn usdc() -> Self {
        Self::new(USDC_MINT, "USDC", "USD Coin", USDC_DECIMALS)
    }

    pub fn sse() -> Self {
        Self::new(SSE_MINT, "SSE", "SSE", SSE_DECIMALS)
    }
}
