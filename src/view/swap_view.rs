use anyhow::Result;
use log::warn;
use std::io::Write;
use std::sync::Mutex;

use crate::entity::{SwapError, SwapResult, SwapState, SwapStatus, TokenInfo};
use crate::interactor::SwapEventListener;
use crate::utils::{format_amount, shorten_address};

pub trait SwapView: Send + Sync {
    fn display_quote(&self, amount: &str, state: &SwapState) -> Result<()>;
    fn display_swap_success(&self, result: &SwapResult) -> Result<()>;
    fn display_swap_error(&self, error_message: &str) -> Result<()>;
}

/// Plain-text rendering of the swap form for terminals and logs
pub struct ConsoleSwapView<W: Write + Send> {
    input_token: TokenInfo,
    output_token: TokenInfo,
    out: Mutex<W>,
}

impl ConsoleSwapView<std::io::Stdout> {
    pub fn stdout(input_token: TokenInfo, output_token: TokenInfo) -> Self {
        Self::new(input_token, output_token, std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSwapView<W> {
    pub fn new(input_token: TokenInfo, output_token: TokenInfo, out: W) -> Self {
        Self {
            input_token,
            output_token,
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> SwapView for ConsoleSwapView<W> {
    fn display_quote(&self, amount: &str, state: &SwapState) -> Result<()> {
        let text = match state.status {
            SwapStatus::Idle => "Enter an amount to get a quote".to_string(),
            SwapStatus::LoadingQuote => format!(
                "Getting quote for {} {} to {}...",
                amount, self.input_token.symbol, self.output_token.symbol
            ),
            SwapStatus::Error => format!(
                "❌ {}",
                state.error.as_deref().unwrap_or("Something went wrong")
            ),
            _ => {
                let refreshing = if state.is_quote_refreshing() {
                    " (refreshing)"
                } else {
                    ""
                };

                format!(
                    "{} {} → ~{} {}{}\n\
                    Price impact: {}%\n\
                    Route: {} → {}",
                    amount,
                    self.input_token.symbol,
                    format_amount(&state.expected_output, self.output_token.decimals),
                    self.output_token.symbol,
                    refreshing,
                    state.price_impact,
                    shorten_address(&self.input_token.address),
                    shorten_address(&self.output_token.address),
                )
            }
        };

        self.write(&text)
    }

    fn display_swap_success(&self, result: &SwapResult) -> Result<()> {
        self.write(&format!(
            "✅ Swap completed successfully!\n\
            Transaction signature: {}\n\
            Check transaction: https://explorer.solana.com/tx/{}",
            shorten_address(&result.signature),
            result.signature
        ))
    }

    fn display_swap_error(&self, error_message: &str) -> Result<()> {
        self.write(&format!(
            "❌ Error performing swap of {} to {}:\n{}",
            self.input_token.symbol, self.output_token.symbol, error_message
        ))
    }
}

impl<W: Write + Send> SwapEventListener for ConsoleSwapView<W> {
    fn on_success(&self, result: &SwapResult) {
        if let Err(e) = self.display_swap_success(result) {
            warn!("Failed to render swap result: {}", e);
        }
    }

    fn on_error(&self, error: &SwapError) {
        if let Err(e) = self.display_swap_error(&error.to_string()) {
            warn!("Failed to render swap error: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ConsoleSwapView<Vec<u8>> {
        ConsoleSwapView::new(TokenInfo::sol(), TokenInfo::usdc(), Vec::new())
    }

    fn rendered(view: ConsoleSwapView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_display_ready_quote() {
        let view = view();
        let state = SwapState {
            status: SwapStatus::QuoteReady,
            expected_output: "150.1234567".to_string(),
            price_impact: "0.05".to_string(),
            ..SwapState::default()
        };

        view.display_quote("1", &state).unwrap();

        let text = rendered(view);
        assert!(text.contains("1 SOL → ~150.123457 USDC"));
        assert!(text.contains("Price impact: 0.05%"));
        assert!(text.contains("So111...11112"));
        assert!(!text.contains("refreshing"));
    }

    #[test]
    fn test_display_refreshing_and_error() {
        let view = view();
        let refreshing = SwapState {
            status: SwapStatus::RefreshingQuote,
            expected_output: "150".to_string(),
            ..SwapState::default()
        };
        let failed = SwapState {
            status: SwapStatus::Error,
            error: Some("Failed to fetch quote".to_string()),
            ..SwapState::default()
        };

        view.display_quote("1", &refreshing).unwrap();
        view.display_quote("1", &failed).unwrap();

        let text = rendered(view);
        assert!(text.contains("(refreshing)"));
        assert!(text.contains("❌ Failed to fetch quote"));
    }

    #[test]
    fn test_listener_renders_outcomes() {
        let view = view();

        view.on_success(&SwapResult::confirmed("5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnb".to_string()));
        view.on_error(&SwapError::WalletNotConnected);

        let text = rendered(view);
        assert!(text.contains("Swap completed successfully"));
        assert!(text.contains("https://explorer.solana.com/tx/5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnb"));
        assert!(text.contains("Error performing swap of SOL to USDC:\nWallet not connected"));
    }
}
