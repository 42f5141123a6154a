// Re-export everything from submodules
pub mod client;
pub mod jupiter;
pub mod ledger;
pub mod tokens;
pub mod wallet;

// Re-export commonly used items
pub use client::{create_ledger, create_solana_client};
pub use ledger::{LatestBlockhash, LedgerRpc, SolanaLedger, TransactionConfirmation};
pub use tokens::constants::{SOL_MINT, SSE_MINT, USDC_MINT};
pub use tokens::get_raw_token_balance;
pub use wallet::{keypair_from_base58, keypair_from_mnemonic, KeypairWallet, WalletAdapter};
