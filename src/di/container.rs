use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;

use crate::interactor::{SwapEventListener, SwapInteractorImpl};
use crate::solana::client::create_solana_client;
use crate::solana::jupiter::{
    BuildSwapRequest, Config, HttpSwapTransactionService, JupiterQuoteService, QuoteService,
    SwapTransactionService,
};
use crate::solana::ledger::{LedgerRpc, SolanaLedger};

// Stand-in when no build endpoint is configured; quoting keeps working
struct UnconfiguredSwapService;

#[async_trait]
impl SwapTransactionService for UnconfiguredSwapService {
    async fn build_swap_transaction(&self, _request: &BuildSwapRequest) -> Result<String> {
        Err(anyhow!("Swap API endpoint not provided"))
    }
}

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Core services
    solana_client: Option<Arc<RpcClient>>,
    ledger: Option<Arc<dyn LedgerRpc>>,

    // Jupiter services
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapTransactionService>,

    // Configuration
    config: Config,
}

impl ServiceContainer {
    /// Wire services from configuration. RPC and build endpoint are optional.
    pub fn new(config: Config) -> Result<Self> {
        let quote_service = Arc::new(JupiterQuoteService::new(
            &config.quote_api_url,
            config.http_timeout(),
        )?) as Arc<dyn QuoteService>;

        let swap_service = match config.api_endpoint.as_deref() {
            Some(endpoint) => Arc::new(HttpSwapTransactionService::new(
                endpoint,
                config.http_timeout(),
            )?) as Arc<dyn SwapTransactionService>,
            None => {
                warn!("SWAP_API_ENDPOINT is not set, swaps cannot be built");
                Arc::new(UnconfiguredSwapService) as Arc<dyn SwapTransactionService>
            }
        };

        let solana_client = match config.rpc_url.as_deref() {
            Some(rpc_url) => Some(create_solana_client(rpc_url)?),
            None => None,
        };

        let ledger = solana_client.clone().map(|client| {
            Arc::new(SolanaLedger::new(client, config.confirmation_poll_interval()))
                as Arc<dyn LedgerRpc>
        });

        info!(
            "Services wired: quote API {}, RPC {}",
            config.quote_api_url,
            if ledger.is_some() { "configured" } else { "missing" }
        );

        Ok(Self {
            solana_client,
            ledger,
            quote_service,
            swap_service,
            config,
        })
    }

    /// Orchestrator for one swap form
    pub fn swap_interactor(
        &self,
        listener: Option<Arc<dyn SwapEventListener>>,
    ) -> SwapInteractorImpl {
        SwapInteractorImpl::new(
            &self.config,
            self.quote_service.clone(),
            self.swap_service.clone(),
            self.ledger.clone(),
            listener,
        )
    }

    // Accessor methods

    pub fn solana_client(&self) -> Option<Arc<RpcClient>> {
        self.solana_client.clone()
    }

    pub fn ledger(&self) -> Option<Arc<dyn LedgerRpc>> {
        self.ledger.clone()
    }

    pub fn quote_service(&self) -> Arc<dyn QuoteService> {
        self.quote_service.clone()
    }

    pub fn swap_service(&self) -> Arc<dyn SwapTransactionService> {
        self.swap_service.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
