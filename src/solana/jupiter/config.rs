use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::solana::tokens::constants::{
    CONFIRMATION_POLL_INTERVAL_MS, DEFAULT_SLIPPAGE_VALUE, JUPITER_QUOTE_API_URL,
    PLATFORM_FEE_ACCOUNT, PLATFORM_FEE_BPS, QUOTE_REFRESH_INTERVAL_MS,
};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Swap configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// URL of the quote endpoint
    pub quote_api_url: String,

    /// Caller-supplied endpoint that builds swap transactions
    pub api_endpoint: Option<String>,

    /// Ledger RPC endpoint. Swaps cannot execute without it.
    pub rpc_url: Option<String>,

    pub platform_fee_bps: u16,

    pub platform_fee_account: String,

    /// Slippage sent with quote requests
    pub default_slippage_bps: u16,

    pub refresh_interval_ms: u64,

    pub confirmation_poll_interval_ms: u64,

    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_api_url: JUPITER_QUOTE_API_URL.to_string(),
            api_endpoint: None,
            rpc_url: None,
            platform_fee_bps: PLATFORM_FEE_BPS,
            platform_fee_account: PLATFORM_FEE_ACCOUNT.to_string(),
            default_slippage_bps: DEFAULT_SLIPPAGE_VALUE,
            refresh_interval_ms: QUOTE_REFRESH_INTERVAL_MS,
            confirmation_poll_interval_ms: CONFIRMATION_POLL_INTERVAL_MS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load `.env`, then overlay `SWAP_*` environment variables on the defaults
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Self::load(config::Environment::with_prefix("SWAP"))
    }

    fn load(environment: config::Environment) -> Result<Self> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("quote_api_url", defaults.quote_api_url)?
            .set_default("platform_fee_bps", defaults.platform_fee_bps as i64)?
            .set_default("platform_fee_account", defaults.platform_fee_account)?
            .set_default("default_slippage_bps", defaults.default_slippage_bps as i64)?
            .set_default("refresh_interval_ms", defaults.refresh_interval_ms as i64)?
            .set_default(
                "confirmation_poll_interval_ms",
                defaults.confirmation_poll_interval_ms as i64,
            )?
            .set_default("http_timeout_secs", defaults.http_timeout_secs as i64)?
            .add_source(environment.try_parsing(true))
            .build()
            .and_then(|settings| settings.try_deserialize::<Config>())
            .map_err(|e| anyhow!("Failed to load swap configuration: {}", e))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn confirmation_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirmation_poll_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
