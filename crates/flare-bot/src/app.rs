//! Main application orchestration.
//!
//! Coordinates all components:
//! - Ledger seeding and journal restore
//! - Price sources for the configured mode
//! - Onchain helpers and the Flare API client
//! - Background price refresh
//! - Dashboard server

use std::sync::Arc;
use std::time::Duration;

use flare_chain::{
    parse_address, BalanceReader, ChainReader, DexTxBuilder, FdcClient, FlareApiClient,
    FlareApiEndpoints, FtsoReader, OneInchClient, RpcClient, TokenDirectory,
};
use flare_chat::ChatBot;
use flare_core::{ChatRecord, Symbol, TradeRecord};
use flare_dashboard::{ChainServices, DashboardState, Journal};
use flare_feed::{CoinGeckoSource, FtsoSource, PriceAggregator, PriceSource, SimulatedSource};
use flare_ledger::Ledger;
use flare_persistence::read_recent;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, OperatingMode};
use crate::error::{AppError, AppResult};

const TRADES_PREFIX: &str = "trades";
const CHAT_PREFIX: &str = "chat";

/// Main application.
pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Create a new application from a validated configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the ledger with demo balances and journaled history.
    pub fn build_ledger(&self) -> AppResult<Ledger> {
        let ledger = Ledger::new();
        ledger.seed_default_tokens(!self.config.is_demo());

        if self.config.is_demo() {
            let holdings = self.config.starting_holdings()?;
            if !holdings.is_empty() {
                ledger.seed_holdings(&holdings);
                info!(count = holdings.len(), "Demo holdings seeded");
            }
        }

        let persistence = &self.config.persistence;
        if persistence.enabled {
            let trades: Vec<TradeRecord> =
                read_recent(&persistence.data_dir, TRADES_PREFIX, persistence.restore_limit)?;
            let chats: Vec<ChatRecord> =
                read_recent(&persistence.data_dir, CHAT_PREFIX, persistence.restore_limit)?;
            info!(trades = trades.len(), chats = chats.len(), "Journal restored");
            ledger.restore_trades(trades);
            ledger.restore_chats(chats);
        }

        Ok(ledger)
    }

    /// Price sources in fallback order for the configured mode.
    pub fn build_sources(
        &self,
        ledger: &Ledger,
        reader: Arc<dyn ChainReader>,
    ) -> AppResult<Vec<Arc<dyn PriceSource>>> {
        let mut sources: Vec<Arc<dyn PriceSource>> = Vec::new();
        match self.config.mode {
            OperatingMode::Demo => {
                sources.push(Arc::new(SimulatedSource::new(ledger.prices())));
            }
            OperatingMode::Live => {
                let registry = parse_address(&self.config.chain.contract_registry)?;
                sources.push(Arc::new(FtsoSource::new(FtsoReader::new(reader, registry))));
                if !self.config.prices.ftso_only {
                    sources.push(Arc::new(CoinGeckoSource::new()?));
                }
            }
        }
        Ok(sources)
    }

    /// RPC-backed swap builder, balance reader and connectivity check.
    pub fn build_chain_services(&self, reader: Arc<dyn ChainReader>) -> AppResult<ChainServices> {
        let chain = &self.config.chain;

        let mut tokens = TokenDirectory::flare_defaults();
        for (symbol, address) in &chain.token_addresses {
            let symbol = Symbol::new(symbol)
                .map_err(|e| AppError::Config(format!("chain.token_addresses: {e}")))?;
            tokens.insert(symbol, address)?;
        }

        let mut builder = DexTxBuilder::new(Arc::clone(&reader), tokens.clone(), chain.chain_id)
            .with_dex_address(&chain.dex_contract_address)?
            .with_aggregator(Arc::new(OneInchClient::new()?));
        if chain.fdc_enabled() {
            builder = builder.with_attestor(Arc::new(FdcClient::new(
                chain.fdc_url.clone(),
                chain.fdc_api_key.clone(),
            )?));
        } else {
            debug!("FDC API key not set, wallet attestation disabled");
        }
        if chain.dex_contract_address.trim().is_empty() {
            warn!("DEX contract address not set, onchain swaps will be rejected");
        }

        Ok(ChainServices {
            balances: Arc::new(BalanceReader::new(Arc::clone(&reader), tokens)),
            builder: Arc::new(builder),
            reader,
            prefer_oneinch: chain.use_oneinch,
        })
    }

    /// Assemble the dashboard state from configuration.
    pub fn build_state(&self) -> AppResult<DashboardState> {
        let ledger = self.build_ledger()?;
        let reader: Arc<dyn ChainReader> =
            Arc::new(RpcClient::new(self.config.chain.flare_rpc_url.clone())?);

        let sources = self.build_sources(&ledger, Arc::clone(&reader))?;
        let aggregator = PriceAggregator::new(sources);
        info!(sources = ?aggregator.source_names(), "Price sources configured");

        let persistence = &self.config.persistence;
        let journal = if persistence.enabled {
            Journal::open(&persistence.data_dir, persistence.buffer_size)
        } else {
            Journal::disabled()
        };

        let state = DashboardState::new(ledger.clone(), Arc::new(aggregator))
            .with_chat(ChatBot::new(ledger))
            .with_chain(self.build_chain_services(reader)?)
            .with_flare_api(FlareApiClient::new(FlareApiEndpoints::default())?)
            .with_journal(journal);
        Ok(state)
    }

    /// Run until Ctrl-C.
    pub async fn run(self) -> AppResult<()> {
        let state = self.build_state()?;
        info!(mode = ?self.config.mode, "Starting application");

        // Live prices stay at zero until a source answers.
        if !self.config.is_demo() && !state.flare_connected().await {
            warn!(rpc = %self.config.chain.flare_rpc_url, "Flare RPC not reachable, prices will fall back");
        }

        let refresh = spawn_price_refresh(
            state.clone(),
            Duration::from_secs(self.config.prices.refresh_interval_secs),
        );

        let result = flare_dashboard::run_server(
            state.clone(),
            self.config.dashboard.clone(),
            shutdown_signal(),
        )
        .await;

        info!("Shutting down");
        refresh.abort();
        state.flush_journal();

        result.map_err(AppError::from)
    }
}

/// Refresh ledger prices on a fixed interval; the first refresh runs immediately.
fn spawn_price_refresh(state: DashboardState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let updated = state.refresh_prices().await;
            debug!(updated, "Background price refresh");
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
