// Re-export submodules
pub mod balance;
pub mod constants;

// Re-export commonly used items
pub use balance::get_raw_token_balance;
pub use constants::{SOL_MINT, SSE_MINT, USDC_MINT};
