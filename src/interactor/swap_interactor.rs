use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::entity::{SwapError, SwapResult, SwapState, SwapStatus};
use crate::services::{QuoteRefreshService, RefreshTarget};
use crate::solana::jupiter::{
    calculate_auto_slippage, decode_transaction, BuildSwapRequest, Config, QuoteParams,
    QuoteResponse, QuoteService, SwapMode, SwapTransactionService,
};
use crate::solana::ledger::{LedgerRpc, TransactionConfirmation};
use crate::solana::wallet::WalletAdapter;
use crate::utils::{from_smallest_unit, parse_base_units, to_smallest_unit};

/// Raw inputs of the swap flow, as entered in the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapInputs {
    pub input_mint: String,
    pub output_mint: String,
    /// Decimal amount of the fixed side (input for ExactIn, output for ExactOut)
    pub amount: String,
    pub input_decimals: Option<u8>,
    pub output_decimals: Option<u8>,
    pub swap_mode: SwapMode,
}

/// Inputs that passed validation and can be quoted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTarget {
    pub input_mint: String,
    pub output_mint: String,
    /// Base units of the fixed side
    pub amount: u128,
    pub input_decimals: u8,
    pub output_decimals: u8,
    pub swap_mode: SwapMode,
}

impl SwapInputs {
    /// `None` when a mint or decimals are missing or the amount is zero
    pub fn quote_target(&self) -> Option<QuoteTarget> {
        if self.input_mint.is_empty() || self.output_mint.is_empty() {
            return None;
        }

        let input_decimals = self.input_decimals?;
        let output_decimals = self.output_decimals?;

        let fixed_decimals = match self.swap_mode {
            SwapMode::ExactIn => input_decimals,
            SwapMode::ExactOut => output_decimals,
        };

        let amount = to_smallest_unit(&self.amount, fixed_decimals);
        if amount == 0 {
            return None;
        }

        Some(QuoteTarget {
            input_mint: self.input_mint.clone(),
            output_mint: self.output_mint.clone(),
            amount,
            input_decimals,
            output_decimals,
            swap_mode: self.swap_mode,
        })
    }
}

impl QuoteTarget {
    /// Amount of the side the user did not fix, as a display string
    fn expected_output(&self, quote: &QuoteResponse) -> Result<String> {
        let (raw, decimals) = match self.swap_mode {
            SwapMode::ExactIn => (&quote.out_amount, self.output_decimals),
            SwapMode::ExactOut => (&quote.in_amount, self.input_decimals),
        };

        let base_units =
            parse_base_units(raw).ok_or_else(|| anyhow!("Invalid amount in quote: {}", raw))?;

        Ok(from_smallest_unit(base_units, decimals))
    }
}

/// Swap lifecycle callbacks
pub trait SwapEventListener: Send + Sync {
    fn on_success(&self, _result: &SwapResult) {}

    fn on_error(&self, _error: &SwapError) {}
}

// Holds the single execution slot until dropped
struct ExecutionGuard<'a> {
    busy: &'a AtomicBool,
}

impl<'a> ExecutionGuard<'a> {
    fn acquire(busy: &'a AtomicBool) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { busy })
    }
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

// State shared with the refresh task
struct SwapCore {
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapTransactionService>,
    ledger: Option<Arc<dyn LedgerRpc>>,
    wallet: RwLock<Option<Arc<dyn WalletAdapter>>>,
    listener: Option<Arc<dyn SwapEventListener>>,
    platform_fee_bps: u16,
    platform_fee_account: String,
    quote_slippage_bps: u16,
    inputs: Mutex<SwapInputs>,
    state: Mutex<SwapState>,
    quote_seq: AtomicU64,
    executing: AtomicBool,
    // Set when new inputs arrive while a swap executes
    requote_pending: AtomicBool,
}

impl SwapCore {
    fn lock_state(&self) -> MutexGuard<'_, SwapState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_inputs(&self) -> MutexGuard<'_, SwapInputs> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_wallet(&self) -> Option<Arc<dyn WalletAdapter>> {
        self.wallet
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn quote_target(&self) -> Option<QuoteTarget> {
        self.lock_inputs().quote_target()
    }

    fn notify_error(&self, error: &SwapError) {
        if let Some(listener) = &self.listener {
            listener.on_error(error);
        }
    }

    fn reset_state(&self) {
        // Responses still in flight belong to the cleared inputs
        self.quote_seq.fetch_add(1, Ordering::SeqCst);
        *self.lock_state() = SwapState::default();
    }

    async fn fetch_quote(&self) {
        let Some(target) = self.quote_target() else {
            self.reset_state();
            return;
        };

        if self.executing.load(Ordering::Acquire) {
            debug!("Swap in progress, deferring quote request");
            self.requote_pending.store(true, Ordering::SeqCst);
            return;
        }

        let seq = self.quote_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.lock_state();
            state.status = if state.quote_response.is_some() {
                SwapStatus::RefreshingQuote
            } else {
                SwapStatus::LoadingQuote
            };
        }

        let params = QuoteParams {
            input_mint: target.input_mint.clone(),
            output_mint: target.output_mint.clone(),
            amount: target.amount,
            slippage_bps: self.quote_slippage_bps,
            platform_fee_bps: self.platform_fee_bps,
            fee_account: self.platform_fee_account.clone(),
            swap_mode: target.swap_mode,
        };

        let result = match self.quote_service.get_quote(&params).await {
            Ok(quote) => target
                .expected_output(&quote)
                .map(|expected_output| (quote, expected_output)),
            Err(e) => Err(e),
        };

        let mut state = self.lock_state();
        if self.quote_seq.load(Ordering::SeqCst) != seq {
            debug!("Discarding stale quote response #{}", seq);
            return;
        }

        match result {
            Ok((quote, expected_output)) => {
                state.expected_output = expected_output;
                state.price_impact = quote.price_impact_pct.clone();
                state.quote_response = Some(quote);
                state.error = None;
                state.status = SwapStatus::QuoteReady;
            }
            Err(e) => {
                error!("Quote fetch error: {}", e);
                state.error = Some("Failed to fetch quote".to_string());
                state.status = SwapStatus::Error;
                drop(state);

                self.notify_error(&SwapError::QuoteFetch(e.to_string()));
            }
        }
    }

    async fn refresh_quote(&self) {
        let in_flight = self.lock_state().is_quote_in_flight();
        if in_flight || self.executing.load(Ordering::Acquire) {
            debug!("Quote request already in flight, skipping refresh");
            return;
        }

        self.fetch_quote().await;
    }

    // Record a failure of the current attempt and report it
    fn fail(&self, error: SwapError) -> SwapError {
        {
            let mut state = self.lock_state();
            state.error = Some(error.to_string());
            state.status = SwapStatus::Error;
        }

        self.notify_error(&error);
        error
    }

    async fn execute_swap(&self) -> std::result::Result<SwapResult, SwapError> {
        let Some(_guard) = ExecutionGuard::acquire(&self.executing) else {
            warn!("Rejecting swap: another swap is still executing");
            let error = SwapError::SwapInProgress;
            self.notify_error(&error);
            return Err(error);
        };

        let wallet = match self.current_wallet() {
            Some(wallet) if wallet.is_connected() => wallet,
            _ => return Err(self.fail(SwapError::WalletNotConnected)),
        };

        let current_quote = {
            let state = self.lock_state();
            state
                .quote_response
                .clone()
                .map(|quote| (quote, state.price_impact.clone()))
        };
        let Some((quote, price_impact)) = current_quote else {
            return Err(self.fail(SwapError::NoQuote));
        };

        let Some(ledger) = self.ledger.clone() else {
            return Err(self.fail(SwapError::RpcUrlMissing));
        };

        {
            let mut state = self.lock_state();
            state.status = SwapStatus::Submitting;
            state.error = None;
            state.tx_signature.clear();
        }

        match self
            .submit_swap(wallet.as_ref(), ledger.as_ref(), quote, &price_impact)
            .await
        {
            Ok(result) => {
                info!("Swap confirmed: {}", result.signature);
                self.lock_state().status = SwapStatus::Confirmed;

                if let Some(listener) = &self.listener {
                    listener.on_success(&result);
                }

                Ok(result)
            }
            Err(error) => {
                error!("Swap error: {}", error);
                Err(self.fail(error))
            }
        }
    }

    async fn submit_swap(
        &self,
        wallet: &dyn WalletAdapter,
        ledger: &dyn LedgerRpc,
        quote: QuoteResponse,
        price_impact: &str,
    ) -> std::result::Result<SwapResult, SwapError> {
        let (output_mint, swap_mode) = {
            let inputs = self.lock_inputs();
            (inputs.output_mint.clone(), inputs.swap_mode)
        };

        let slippage_bps = calculate_auto_slippage(price_impact);
        let request = BuildSwapRequest::new(
            quote,
            wallet.public_key().to_string(),
            output_mint,
            slippage_bps,
            swap_mode,
        );

        debug!(
            "Requesting swap transaction: wallet={}, slippage_bps={}",
            request.wallet_address, slippage_bps
        );

        let transaction_base64 = self
            .swap_service
            .build_swap_transaction(&request)
            .await
            .map_err(|e| SwapError::Build(e.to_string()))?;

        let transaction = decode_transaction(&transaction_base64)
            .map_err(|e| SwapError::InvalidTransaction(e.to_string()))?;

        let signed_transaction = wallet
            .sign_transaction(transaction)
            .await
            .map_err(|e| SwapError::Signing(e.to_string()))?;

        let signature = ledger
            .send_transaction(&signed_transaction)
            .await
            .map_err(|e| SwapError::Broadcast(e.to_string()))?;

        info!("Transaction signature: {}", signature);
        self.lock_state().tx_signature = signature.to_string();

        let latest_blockhash = ledger
            .get_latest_blockhash()
            .await
            .map_err(|e| SwapError::Broadcast(e.to_string()))?;

        let confirmation = ledger
            .confirm_transaction(&signature, &latest_blockhash)
            .await
            .map_err(|e| SwapError::TransactionFailed(e.to_string()))?;

        match confirmation {
            TransactionConfirmation::Confirmed => Ok(SwapResult::confirmed(signature.to_string())),
            TransactionConfirmation::Failed(err) => {
                Err(SwapError::TransactionFailed(err.to_string()))
            }
        }
    }
}

#[async_trait]
impl RefreshTarget for SwapCore {
    async fn on_refresh_tick(&self) {
        if self.quote_target().is_none() || self.lock_state().is_fully_confirmed() {
            return;
        }

        self.refresh_quote().await;
    }
}

/// Drives quoting, periodic re-quoting and swap execution for one swap form
#[async_trait]
pub trait SwapInteractor: Send + Sync {
    /// Current snapshot
    fn state(&self) -> SwapState;

    fn inputs(&self) -> SwapInputs;

    fn set_wallet(&self, wallet: Option<Arc<dyn WalletAdapter>>);

    /// Replace the inputs. Resets to idle when they are incomplete, otherwise
    /// quotes them and restarts the refresh timer.
    async fn set_inputs(&self, inputs: SwapInputs);

    /// Re-quote now unless a quote request is already in flight
    async fn refresh_quote(&self);

    /// Clear the quote and every derived field
    fn reset_state(&self);

    /// Build, sign, broadcast and confirm a swap for the current quote
    async fn handle_swap(&self) -> std::result::Result<SwapResult, SwapError>;

    /// Start periodic re-quoting. No-op while inputs are invalid or the swap is confirmed.
    fn start_auto_refresh(&self) -> Result<()>;

    fn stop_auto_refresh(&self);

    fn is_auto_refreshing(&self) -> bool;
}

pub struct SwapInteractorImpl {
    core: Arc<SwapCore>,
    refresh_service: Mutex<QuoteRefreshService>,
}

impl SwapInteractorImpl {
    /// `ledger` is `None` when no RPC endpoint is configured; quoting still works
    pub fn new(
        config: &Config,
        quote_service: Arc<dyn QuoteService>,
        swap_service: Arc<dyn SwapTransactionService>,
        ledger: Option<Arc<dyn LedgerRpc>>,
        listener: Option<Arc<dyn SwapEventListener>>,
    ) -> Self {
        let core = SwapCore {
            quote_service,
            swap_service,
            ledger,
            wallet: RwLock::new(None),
            listener,
            platform_fee_bps: config.platform_fee_bps,
            platform_fee_account: config.platform_fee_account.clone(),
            quote_slippage_bps: config.default_slippage_bps,
            inputs: Mutex::new(SwapInputs::default()),
            state: Mutex::new(SwapState::default()),
            quote_seq: AtomicU64::new(0),
            executing: AtomicBool::new(false),
            requote_pending: AtomicBool::new(false),
        };

        Self {
            core: Arc::new(core),
            refresh_service: Mutex::new(QuoteRefreshService::new(config.refresh_interval())),
        }
    }

    fn lock_refresh_service(&self) -> MutexGuard<'_, QuoteRefreshService> {
        self.refresh_service
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn restart_auto_refresh(&self) {
        if let Err(e) = self.start_auto_refresh() {
            warn!("Quote auto-refresh not started: {}", e);
        }
    }
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    fn state(&self) -> SwapState {
        self.core.lock_state().clone()
    }

    fn inputs(&self) -> SwapInputs {
        self.core.lock_inputs().clone()
    }

    fn set_wallet(&self, wallet: Option<Arc<dyn WalletAdapter>>) {
        *self
            .core
            .wallet
            .write()
            .unwrap_or_else(PoisonError::into_inner) = wallet;
    }

    async fn set_inputs(&self, inputs: SwapInputs) {
        {
            let mut current = self.core.lock_inputs();
            if *current == inputs {
                return;
            }
            *current = inputs;
        }

        self.stop_auto_refresh();

        if self.core.quote_target().is_none() {
            self.core.reset_state();
            return;
        }

        self.core.fetch_quote().await;
        self.restart_auto_refresh();
    }

    async fn refresh_quote(&self) {
        self.core.refresh_quote().await;
    }

    fn reset_state(&self) {
        self.core.reset_state();
    }

    async fn handle_swap(&self) -> std::result::Result<SwapResult, SwapError> {
        let result = self.core.execute_swap().await;

        if result.is_ok() {
            self.stop_auto_refresh();
        }

        // A rejected call does not own the quote requests skipped by the running swap
        if !matches!(result, Err(SwapError::SwapInProgress))
            && self.core.requote_pending.swap(false, Ordering::SeqCst)
        {
            info!("Inputs changed during the swap, requesting a new quote");
            self.core.fetch_quote().await;
            self.restart_auto_refresh();
        }

        result
    }

    fn start_auto_refresh(&self) -> Result<()> {
        if self.core.quote_target().is_none() || self.core.lock_state().is_fully_confirmed() {
            return Ok(());
        }

        let target: Arc<dyn RefreshTarget> = self.core.clone();
        self.lock_refresh_service().start(target)
    }

    fn stop_auto_refresh(&self) {
        self.lock_refresh_service().stop();
    }

    fn is_auto_refreshing(&self) -> bool {
        self.lock_refresh_service().is_running()
    }
}
