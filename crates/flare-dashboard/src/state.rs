//! Dashboard state management.
//!
//! DashboardState aggregates the ledger, price feed, chat bot, onchain
//! builders and wallet session behind one cloneable handle for the handlers.
//! Onchain services are optional: without them the dashboard still runs the
//! simulated ledger, and the onchain routes answer with `ChainUnavailable`.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, warn};

use flare_chain::{
    BalanceReader, BridgeQuoter, ChainReader, ChainResult, CrossChainQuote, DexTxBuilder,
    FlareApiClient, PreparedTx,
};
use flare_chat::{ChatBot, ChatReply};
use flare_core::{Amount, ChatRecord, Symbol, TradeKind, TradeRecord, TradeStatus};
use flare_feed::PriceAggregator;
use flare_ledger::{Ledger, TradeOutcome, TradeRequest};
use flare_persistence::JsonLinesWriter;
use flare_telemetry::Metrics;

use crate::error::{DashboardError, DashboardResult};
use crate::types::{
    CrossChainBody, DashboardMessage, DashboardSnapshot, DexSwapBody, LiquidityBody, QuoteBody,
    TokenQuote, TradeBody,
};
use crate::wallet::WalletSessions;

/// Recent trades shown on the dashboard.
const DASHBOARD_TRADES: usize = 5;

/// Flare RPC access used by the onchain routes.
#[derive(Clone)]
pub struct ChainServices {
    pub reader: Arc<dyn ChainReader>,
    pub builder: Arc<DexTxBuilder>,
    pub balances: Arc<BalanceReader>,
    /// Use 1inch routing when a swap request does not say.
    pub prefer_oneinch: bool,
}

/// Append-only trade log and chat transcript on disk.
#[derive(Default)]
pub struct Journal {
    trades: Option<JsonLinesWriter<TradeRecord>>,
    chats: Option<JsonLinesWriter<ChatRecord>>,
}

impl Journal {
    /// Journal that discards everything.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn open(dir: impl AsRef<Path>, buffer_size: usize) -> Self {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "Journal enabled");
        Self {
            trades: Some(JsonLinesWriter::new(dir, "trades", buffer_size)),
            chats: Some(JsonLinesWriter::new(dir, "chat", buffer_size)),
        }
    }

    pub fn record_trade(&mut self, trade: &TradeRecord) {
        if let Some(writer) = &mut self.trades {
            if let Err(e) = writer.append(trade.clone()) {
                warn!(error = %e, "Failed to journal trade");
            }
        }
    }

    pub fn record_chat(&mut self, chat: &ChatRecord) {
        if let Some(writer) = &mut self.chats {
            if let Err(e) = writer.append(chat.clone()) {
                warn!(error = %e, "Failed to journal chat message");
            }
        }
    }

    pub fn flush(&mut self) {
        for result in [
            self.trades.as_mut().map(|w| w.flush()),
            self.chats.as_mut().map(|w| w.flush()),
        ]
        .into_iter()
        .flatten()
        {
            if let Err(e) = result {
                warn!(error = %e, "Failed to flush journal");
            }
        }
    }
}

/// Shared state behind every handler.
#[derive(Clone)]
pub struct DashboardState {
    ledger: Ledger,
    aggregator: Arc<PriceAggregator>,
    chat: Arc<ChatBot>,
    quoter: BridgeQuoter,
    chain: Option<ChainServices>,
    flare_api: Option<Arc<FlareApiClient>>,
    wallet: WalletSessions,
    journal: Arc<Mutex<Journal>>,
}

impl DashboardState {
    pub fn new(ledger: Ledger, aggregator: Arc<PriceAggregator>) -> Self {
        Self {
            chat: Arc::new(ChatBot::new(ledger.clone())),
            ledger,
            aggregator,
            quoter: BridgeQuoter::new(),
            chain: None,
            flare_api: None,
            wallet: WalletSessions::new(),
            journal: Arc::new(Mutex::new(Journal::disabled())),
        }
    }

    pub fn with_chat(mut self, chat: ChatBot) -> Self {
        self.chat = Arc::new(chat);
        self
    }

    pub fn with_chain(mut self, chain: ChainServices) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn with_flare_api(mut self, client: FlareApiClient) -> Self {
        self.flare_api = Some(Arc::new(client));
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Arc::new(Mutex::new(journal));
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn wallet(&self) -> &WalletSessions {
        &self.wallet
    }

    pub fn flare_api(&self) -> Option<&FlareApiClient> {
        self.flare_api.as_deref()
    }

    fn chain(&self) -> DashboardResult<&ChainServices> {
        self.chain.as_ref().ok_or(DashboardError::ChainUnavailable)
    }

    pub fn flush_journal(&self) {
        self.journal.lock().flush();
    }

    // ---------------------------------------------------------------------
    // Snapshots
    // ---------------------------------------------------------------------

    pub fn collect_snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            timestamp_ms: Utc::now().timestamp_millis(),
            tokens: self.ledger.tokens(),
            portfolio: self.ledger.holdings(),
            recent_trades: self.ledger.recent_trades(DASHBOARD_TRADES),
            total_value: self.ledger.total_value(),
            price_source: self.aggregator.cache().latest().map(|s| s.source),
            wallet: self.wallet.status(),
        }
    }

    pub fn token_quotes(&self) -> Vec<TokenQuote> {
        self.ledger.tokens().iter().map(TokenQuote::from).collect()
    }

    pub fn price_message(&self) -> DashboardMessage {
        DashboardMessage::Prices {
            timestamp_ms: Utc::now().timestamp_millis(),
            tokens: self.token_quotes(),
            total_value: self.ledger.total_value(),
        }
    }

    // ---------------------------------------------------------------------
    // Prices
    // ---------------------------------------------------------------------

    /// Pull prices from the aggregator into the ledger.
    ///
    /// Returns the number of tokens repriced; zero when every source failed.
    pub async fn refresh_prices(&self) -> usize {
        let prices = self.aggregator.fetch().await;
        if prices.is_empty() {
            return 0;
        }
        let updated = self.ledger.apply_prices(&prices);
        let total = self.ledger.total_value();
        Metrics::portfolio_value(total.to_f64().unwrap_or(0.0));
        debug!(updated, %total, "Ledger repriced");
        updated
    }

    // ---------------------------------------------------------------------
    // Simulated trading and chat
    // ---------------------------------------------------------------------

    pub fn execute_trade(&self, body: &TradeBody) -> DashboardResult<TradeOutcome> {
        let kind: TradeKind = body.kind.parse()?;
        let token = Symbol::new(&body.token)?;
        let from = body
            .from_token
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(Symbol::new)
            .transpose()?;

        let request = TradeRequest {
            kind,
            token,
            amount: body.amount,
            from_token: from,
        };
        let result = self.ledger.execute_trade(&request);
        Metrics::trade(kind.as_str(), result.is_ok());

        let outcome = result?;
        self.journal.lock().record_trade(&outcome.trade);
        Ok(outcome)
    }

    pub fn chat(&self, message: &str) -> DashboardResult<ChatReply> {
        let message = message.trim();
        let reply = self.chat.respond(message)?;
        let record = reply.to_record(message);

        let mut journal = self.journal.lock();
        if let Some(trade) = &reply.trade {
            journal.record_trade(trade);
        }
        journal.record_chat(&record);
        drop(journal);

        self.ledger.record_chat(record);
        Ok(reply)
    }

    // ---------------------------------------------------------------------
    // Bridge and onchain
    // ---------------------------------------------------------------------

    pub fn quote(&self, body: &QuoteBody) -> DashboardResult<CrossChainQuote> {
        let from = Symbol::new(&body.from_token)?;
        let to = Symbol::new(&body.to_token)?;
        let quote = self.quoter.quote(
            &body.from_chain,
            &body.to_chain,
            &from,
            &to,
            body.amount,
            &self.ledger.prices(),
        )?;
        Ok(quote)
    }

    /// Record a quoted bridge transfer as pending for the connected wallet.
    pub fn submit_cross_chain(&self, body: &QuoteBody) -> DashboardResult<(CrossChainQuote, TradeRecord)> {
        let wallet = self.wallet.require()?;
        let quote = self.quote(body)?;

        let price = self.ledger.token(&quote.to_token).map(|t| t.price).unwrap_or_default();
        let record = TradeRecord::new(
            TradeKind::CrossChain,
            Some(quote.from_token.clone()),
            quote.to_token.clone(),
            quote.amount_in,
            price,
            quote.usd_value,
        )
        .with_wallet(wallet)
        .with_status(TradeStatus::Pending);

        self.ledger.record_external_trade(record.clone());
        self.journal.lock().record_trade(&record);
        Metrics::trade(TradeKind::CrossChain.as_str(), true);
        Ok((quote, record))
    }

    pub async fn prepare_dex_swap(&self, body: &DexSwapBody) -> DashboardResult<PreparedTx> {
        let wallet = self.wallet.require()?;
        let chain = self.chain()?;
        let from = Symbol::new(&body.from_token)?;
        let to = Symbol::new(&body.to_token)?;
        let use_oneinch = body.use_oneinch.unwrap_or(chain.prefer_oneinch);

        let result = chain
            .builder
            .build_swap(&from, &to, body.amount, &wallet, use_oneinch)
            .await;
        let tx = self.prepared(result, "swap")?;
        self.record_pending(TradeKind::Swap, Some(from), to, body.amount, &wallet);
        Ok(tx)
    }

    pub async fn prepare_cross_chain(&self, body: &CrossChainBody) -> DashboardResult<PreparedTx> {
        let wallet = self.wallet.require()?;
        let chain = self.chain()?;
        let from = Symbol::new(&body.from_token)?;
        let to = Symbol::new(&body.to_token)?;
        let recipient = body
            .recipient
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(&wallet);

        let result = chain
            .builder
            .build_cross_chain(&from, body.amount, &body.destination_chain, &to, &wallet, recipient)
            .await;
        let tx = self.prepared(result, "cross_chain")?;
        self.record_pending(TradeKind::CrossChain, Some(from), to, body.amount, &wallet);
        Ok(tx)
    }

    pub async fn prepare_add_liquidity(&self, body: &LiquidityBody) -> DashboardResult<PreparedTx> {
        let wallet = self.wallet.require()?;
        let chain = self.chain()?;
        let a = Symbol::new(&body.token_a)?;
        let b = Symbol::new(&body.token_b)?;

        let result = chain
            .builder
            .build_add_liquidity(&a, &b, body.amount_a, body.amount_b, &wallet)
            .await;
        self.prepared(result, "add_liquidity")
    }

    fn prepared(
        &self,
        result: ChainResult<PreparedTx>,
        kind: &str,
    ) -> DashboardResult<PreparedTx> {
        Metrics::prepared_tx(kind, result.is_ok());
        let tx = result?;
        info!(kind, to = %tx.to, nonce = tx.nonce, "{}", tx.summary);
        Ok(tx)
    }

    fn record_pending(&self, kind: TradeKind, from: Option<Symbol>, to: Symbol, amount: Amount, wallet: &str) {
        let price = self.ledger.token(&to).map(|t| t.price).unwrap_or_default();
        let total = from
            .as_ref()
            .and_then(|f| self.ledger.token(f))
            .map(|t| amount.saturating_value_at(t.price))
            .unwrap_or_else(|| amount.saturating_value_at(price));
        let record = TradeRecord::new(kind, from, to, amount, price, total)
            .with_wallet(wallet)
            .with_status(TradeStatus::Pending);
        self.ledger.record_external_trade(record.clone());
        self.journal.lock().record_trade(&record);
    }

    // ---------------------------------------------------------------------
    // Wallet
    // ---------------------------------------------------------------------

    pub async fn flare_connected(&self) -> bool {
        match &self.chain {
            Some(chain) => chain.reader.is_connected().await,
            None => false,
        }
    }

    /// Replace simulated holdings with the connected wallet's onchain balances.
    ///
    /// Returns the number of balances read. Tokens whose balance cannot be
    /// read are skipped.
    pub async fn sync_wallet_holdings(&self) -> DashboardResult<usize> {
        let wallet = self.wallet.require()?;
        let chain = self.chain()?;

        let mut balances = Vec::new();
        for token in self.ledger.tokens() {
            match chain.balances.wallet_balance(&wallet, &token.symbol).await {
                Ok(balance) => balances.push((token.symbol, Amount::new(balance))),
                Err(e) => debug!(symbol = %token.symbol, error = %e, "Skipping wallet balance"),
            }
        }
        if balances.is_empty() {
            return Ok(0);
        }

        let read = balances.len();
        self.ledger.sync_holdings(&balances);
        info!(wallet, read, "Holdings synced from wallet");
        Ok(read)
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("tokens", &self.ledger.tokens().len())
            .field("onchain", &self.chain.is_some())
            .field("wallet_connected", &self.wallet.current().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_feed::{PriceMap, PriceSource};
    use flare_core::Price;
    use rust_decimal_macros::dec;

    const WALLET: &str = "0x00000000000000000000000000000000000000AA";

    struct FixedSource(PriceMap);

    #[async_trait::async_trait]
    impl PriceSource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch(&self) -> flare_feed::FeedResult<PriceMap> {
            Ok(self.0.clone())
        }
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn state_with(prices: PriceMap) -> DashboardState {
        let aggregator = PriceAggregator::new(vec![Arc::new(FixedSource(prices))]);
        DashboardState::new(Ledger::seeded(), Arc::new(aggregator))
    }

    fn trade_body(kind: &str, token: &str, amount: rust_decimal::Decimal, from: Option<&str>) -> TradeBody {
        TradeBody {
            kind: kind.into(),
            token: token.into(),
            amount: Amount::new(amount),
            from_token: from.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_refresh_prices_updates_ledger() {
        let state = state_with(PriceMap::from([(sym("ETH"), Price::new(dec!(3520)))]));
        assert_eq!(state.refresh_prices().await, 1);

        let eth = state.ledger().token(&sym("ETH")).unwrap();
        assert_eq!(eth.price.inner(), dec!(3520));
        assert_eq!(eth.change_24h, dec!(10));
        assert_eq!(state.collect_snapshot().price_source, Some("fixed"));
    }

    #[tokio::test]
    async fn test_refresh_with_no_prices_keeps_table() {
        let state = state_with(PriceMap::new());
        assert_eq!(state.refresh_prices().await, 0);
        assert_eq!(
            state.ledger().token(&sym("ETH")).unwrap().price.inner(),
            dec!(3200)
        );
    }

    #[test]
    fn test_execute_trade_paths() {
        let state = state_with(PriceMap::new());

        let outcome = state.execute_trade(&trade_body("buy", "flr", dec!(1000), None)).unwrap();
        assert_eq!(outcome.trade.kind, TradeKind::Buy);

        let outcome = state
            .execute_trade(&trade_body("swap", "WFLR", dec!(400), Some("FLR")))
            .unwrap();
        assert_eq!(outcome.received.inner(), dec!(400));

        let err = state.execute_trade(&trade_body("hold", "FLR", dec!(1), None)).unwrap_err();
        assert!(matches!(err, DashboardError::Core(_)));

        let err = state.execute_trade(&trade_body("sell", "FLR", dec!(0), None)).unwrap_err();
        assert_eq!(err.to_string(), "Amount must be greater than 0");

        let snapshot = state.collect_snapshot();
        assert_eq!(snapshot.recent_trades.len(), 2);
        assert_eq!(snapshot.recent_trades[0].kind, TradeKind::Swap);
    }

    #[test]
    fn test_chat_records_transcript() {
        let state = state_with(PriceMap::new()).with_chat(ChatBot::with_seed(Ledger::new(), 1));
        assert!(matches!(state.chat("  "), Err(DashboardError::Chat(_))));

        state.chat("help").unwrap();
        let history = state.ledger().recent_chats(20);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "help");
    }

    #[test]
    fn test_chat_trade_is_journaled() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::seeded();
        let aggregator = PriceAggregator::new(vec![]);
        let state = DashboardState::new(ledger.clone(), Arc::new(aggregator))
            .with_journal(Journal::open(dir.path(), 1));

        let reply = state.chat("buy 10 flr").unwrap();
        assert!(reply.trade.is_some());
        state.flush_journal();

        let trades: Vec<TradeRecord> = flare_persistence::read_recent(dir.path(), "trades", 10).unwrap();
        assert_eq!(trades.len(), 1);
        let chats: Vec<ChatRecord> = flare_persistence::read_recent(dir.path(), "chat", 10).unwrap();
        assert_eq!(chats[0].trade_executed.as_deref(), Some("Bought 10 FLR"));
    }

    #[test]
    fn test_cross_chain_requires_wallet() {
        let state = state_with(PriceMap::new());
        let body = QuoteBody {
            from_chain: "flare".into(),
            to_chain: "polygon".into(),
            from_token: "USDT".into(),
            to_token: "USDT".into(),
            amount: Amount::new(dec!(100)),
        };
        assert!(state.quote(&body).is_ok());
        assert!(matches!(
            state.submit_cross_chain(&body),
            Err(DashboardError::WalletRequired)
        ));

        state.wallet().connect(WALLET, 14).unwrap();
        let (_, record) = state.submit_cross_chain(&body).unwrap();
        assert_eq!(record.status, TradeStatus::Pending);
        assert_eq!(record.wallet_address.as_deref(), Some(WALLET));
        assert_eq!(state.ledger().recent_trades(1)[0].id, record.id);
    }

    #[tokio::test]
    async fn test_onchain_routes_need_chain_services() {
        let state = state_with(PriceMap::new());
        state.wallet().connect(WALLET, 14).unwrap();
        let body = DexSwapBody {
            from_token: "FLR".into(),
            to_token: "WFLR".into(),
            amount: Amount::new(dec!(1)),
            use_oneinch: None,
        };
        assert!(matches!(
            state.prepare_dex_swap(&body).await,
            Err(DashboardError::ChainUnavailable)
        ));
        assert!(!state.flare_connected().await);
    }
}
