#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SwapError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("No quote available")]
    NoQuote,

    #[error("RPC URL not provided")]
    RpcUrlMissing,

    #[error("Swap already in progress")]
    SwapInProgress,

    #[error("Failed to fetch quote: {0}")]
    QuoteFetch(String),

    #[error("{0}")]
    Build(String),

    #[error("{0}")]
    InvalidTransaction(String),

    #[error("{0}")]
    Signing(String),

    #[error("{0}")]
    Broadcast(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
