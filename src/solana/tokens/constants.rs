// Known token information
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const SSE_MINT: &str = "H4phNbsqjV5rqk8u6FUACTLB6rNZRTAPGnBb8KXJpump";

// Define token decimals
pub const SOL_DECIMALS: u8 = 9;
pub const USDC_DECIMALS: u8 = 6;
pub const SSE_DECIMALS: u8 = 6;

// Fallback precision for amount validation when no token is selected
pub const DEFAULT_DECIMALS: u8 = 6;

// Jupiter API constants
pub const DEFAULT_SLIPPAGE_MODE: &str = "auto";
pub const DEFAULT_SLIPPAGE_VALUE: u16 = 50; // 0.5%
pub const PLATFORM_FEE_BPS: u16 = 80;
pub const PLATFORM_FEE_ACCOUNT: &str = "8jTiTDW9ZbMHvAD9SZWvhPfRx5gUgK7HACMdgbFp2tUz";

// API endpoints
pub const JUPITER_QUOTE_API_URL: &str = "https://quote-api.jup.ag/v6/quote";

// Refresh intervals
pub const QUOTE_REFRESH_INTERVAL_MS: u64 = 15_000;
pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 500;
