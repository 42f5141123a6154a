//! Jupiter swap kit demo
//!
//! Quotes a SOL → USDC swap, keeps the quote fresh until Ctrl+C and, when
//! `SWAP_EXECUTE=true` and a wallet secret is configured, executes it.
use anyhow::Context;
use jupiter_swap_kit::interactor::{
    AmountPercentageInteractor, SwapEventListener, SwapInputsInteractor, SwapInteractor,
};
use jupiter_swap_kit::solana::jupiter::{calculate_auto_slippage, Config};
use jupiter_swap_kit::view::{ConsoleSwapView, SwapView};
use jupiter_swap_kit::{get_raw_token_balance, KeypairWallet, ServiceContainer, TokenInfo, WalletAdapter};
use log::{error, info, warn};
use std::env;
use std::sync::Arc;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting Jupiter swap kit demo v{}", jupiter_swap_kit::VERSION);

    let config = Config::from_env().context("Failed to load configuration")?;
    let container = ServiceContainer::new(config).context("Failed to wire services")?;

    let wallet = load_wallet()?;

    let view = Arc::new(ConsoleSwapView::stdout(TokenInfo::sol(), TokenInfo::usdc()));
    let interactor = container.swap_interactor(Some(view.clone() as Arc<dyn SwapEventListener>));
    interactor.set_wallet(wallet.clone());

    let mut inputs = SwapInputsInteractor::new(Some(TokenInfo::sol()), Some(TokenInfo::usdc()), "");

    let amount = match env::var("SWAP_AMOUNT") {
        Ok(amount) => amount,
        Err(_) => default_amount(&container, wallet.as_deref()).await,
    };

    if !inputs.handle_amount_change(&amount, true) {
        anyhow::bail!("Invalid swap amount: {}", amount);
    }

    interactor.set_inputs(inputs.swap_inputs()).await;

    let state = interactor.state();
    view.display_quote(inputs.input_amount(), &state)?;
    info!(
        "Slippage tier for {}% price impact: {} bps",
        state.price_impact,
        calculate_auto_slippage(&state.price_impact)
    );

    let execute = env::var("SWAP_EXECUTE").map(|v| v == "true").unwrap_or(false);
    if execute && wallet.is_some() {
        info!("Executing swap...");
        if let Err(e) = interactor.handle_swap().await {
            error!("Swap failed: {}", e);
        }
        return Ok(());
    }

    info!("Refreshing quote every {:?}. Press Ctrl+C to stop.", container.config().refresh_interval());
    let mut last_output = state.expected_output;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {
                let state = interactor.state();
                if state.expected_output != last_output && !state.is_quote_refreshing() {
                    view.display_quote(inputs.input_amount(), &state)?;
                    last_output = state.expected_output;
                }
            }
        }
    }

    info!("Stopping quote refresh...");
    interactor.stop_auto_refresh();

    Ok(())
}

fn load_wallet() -> anyhow::Result<Option<Arc<dyn WalletAdapter>>> {
    if let Ok(keypair) = env::var("SWAP_WALLET_KEYPAIR") {
        let wallet = KeypairWallet::from_base58(&keypair).context("Invalid SWAP_WALLET_KEYPAIR")?;
        info!("Wallet loaded: {}", wallet.public_key());
        return Ok(Some(Arc::new(wallet)));
    }

    if let Ok(phrase) = env::var("SWAP_WALLET_MNEMONIC") {
        let wallet = KeypairWallet::from_mnemonic(&phrase).context("Invalid SWAP_WALLET_MNEMONIC")?;
        info!("Wallet loaded: {}", wallet.public_key());
        return Ok(Some(Arc::new(wallet)));
    }

    warn!("No wallet configured, running in quote-only mode");
    Ok(None)
}

// A quarter of the wallet's SOL, or 1 SOL when the balance is unknown or empty
async fn default_amount(container: &ServiceContainer, wallet: Option<&dyn WalletAdapter>) -> String {
    let sol = TokenInfo::sol();

    let (Some(client), Some(wallet)) = (container.solana_client(), wallet) else {
        return FALLBACK_AMOUNT.to_string();
    };

    match get_raw_token_balance(&client, &wallet.public_key().to_string(), &sol.address).await {
        Ok(balance) => {
            let amount = quarter_of_balance(balance, sol.decimals);
            info!("Quoting {} SOL", amount);
            amount
        }
        Err(e) => {
            warn!("Failed to read balance: {}", e);
            FALLBACK_AMOUNT.to_string()
        }
    }
}

const FALLBACK_AMOUNT: &str = "1";

fn quarter_of_balance(balance: Option<u128>, decimals: u8) -> String {
    let amount = AmountPercentageInteractor::new(balance, decimals).get_amount_by_percentage(25);
    if amount == "0" {
        warn!("Wallet balance is empty, quoting {} instead", FALLBACK_AMOUNT);
        return FALLBACK_AMOUNT.to_string();
    }

    amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_of_balance() {
        assert_eq!(quarter_of_balance(Some(2_000_000_000), 9), "0.5");
    }

    #[test]
    fn test_empty_balance_falls_back_to_one() {
        assert_eq!(quarter_of_balance(Some(0), 9), "1");
        assert_eq!(quarter_of_balance(None, 9), "1");
        // 25% of one lamport rounds down to nothing
        assert_eq!(quarter_of_balance(Some(1), 9), "1");
    }
}
