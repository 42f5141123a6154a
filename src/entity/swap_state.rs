use crate::solana::jupiter::QuoteResponse;

/// Observable phase of the swap flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwapStatus {
    #[default]
    Idle,
    LoadingQuote,
    QuoteReady,
    RefreshingQuote,
    Submitting,
    Confirmed,
    Error,
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Idle => "idle",
            SwapStatus::LoadingQuote => "loading-quote",
            SwapStatus::QuoteReady => "quote-ready",
            SwapStatus::RefreshingQuote => "refreshing-quote",
            SwapStatus::Submitting => "submitting",
            SwapStatus::Confirmed => "confirmed",
            SwapStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of everything a swap widget renders
#[derive(Debug, Clone, Default)]
pub struct SwapState {
    pub status: SwapStatus,
    pub quote_response: Option<QuoteResponse>,
    pub expected_output: String,
    pub price_impact: String,
    pub error: Option<String>,
    pub tx_signature: String,
}

impl SwapState {
    pub fn loading(&self) -> bool {
        matches!(self.status, SwapStatus::LoadingQuote | SwapStatus::Submitting)
    }

    pub fn is_quote_refreshing(&self) -> bool {
        self.status == SwapStatus::RefreshingQuote
    }

    pub fn is_fully_confirmed(&self) -> bool {
        self.status == SwapStatus::Confirmed
    }

    pub fn is_quote_in_flight(&self) -> bool {
        matches!(
            self.status,
            SwapStatus::LoadingQuote | SwapStatus::RefreshingQuote
        )
    }
}
