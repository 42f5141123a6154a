// src/solana/jupiter/mod.rs
pub mod config;
pub mod models;
pub mod quote_service;
pub mod slippage;
pub mod swap_service;

// Re-exports for convenience
pub use models::{
    BuildSwapRequest, BuildSwapResponse, PlatformFee, QuoteDetails, QuoteParams, QuoteResponse,
    RoutePlan, SwapInfo, SwapMode,
};

pub use config::Config;
pub use quote_service::{JupiterQuoteService, QuoteService};
pub use slippage::calculate_auto_slippage;
pub use swap_service::{
    decode_transaction, encode_transaction, HttpSwapTransactionService, SwapTransactionService,
};
