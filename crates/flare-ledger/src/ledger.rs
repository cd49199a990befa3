//! Mock ledger state and trade simulation.
//!
//! All mutation happens under a single write lock, so a trade either applies
//! every balance change and its log row, or none of them.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use flare_core::{Amount, ChatRecord, Holding, Price, Symbol, Token, TradeKind, TradeRecord};

use crate::catalog::DEFAULT_TOKENS;
use crate::error::{LedgerError, LedgerResult};
use crate::history::PriceHistory;
use crate::portfolio::PortfolioSummary;

/// Default number of trade rows kept in memory.
const DEFAULT_MAX_TRADES: usize = 1_000;
/// Default number of chat exchanges kept in memory.
const DEFAULT_MAX_CHATS: usize = 200;

/// A simulated trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub kind: TradeKind,
    /// Token bought, sold, or received in a swap.
    pub token: Symbol,
    pub amount: Amount,
    /// Token given up in a swap, or payment token for a buy.
    pub from_token: Option<Symbol>,
}

impl TradeRequest {
    pub fn buy(token: Symbol, amount: Amount) -> Self {
        Self { kind: TradeKind::Buy, token, amount, from_token: None }
    }

    pub fn sell(token: Symbol, amount: Amount) -> Self {
        Self { kind: TradeKind::Sell, token, amount, from_token: None }
    }

    pub fn swap(from: Symbol, to: Symbol, amount: Amount) -> Self {
        Self { kind: TradeKind::Swap, token: to, amount, from_token: Some(from) }
    }

    pub fn paying_with(mut self, payment: Option<Symbol>) -> Self {
        self.from_token = payment;
        self
    }
}

/// Result of a successful simulated trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub message: String,
    pub trade: TradeRecord,
    /// Quantity credited to the target holding (zero for sells).
    pub received: Amount,
}

#[derive(Debug, Default)]
struct LedgerInner {
    tokens: BTreeMap<Symbol, Token>,
    holdings: BTreeMap<Symbol, Holding>,
    /// Oldest first.
    trades: VecDeque<TradeRecord>,
    /// Oldest first.
    chats: VecDeque<ChatRecord>,
}

impl LedgerInner {
    fn priced(&self, symbol: &Symbol) -> LedgerResult<Price> {
        let token = self
            .tokens
            .get(symbol)
            .ok_or_else(|| LedgerError::TokenNotFound(symbol.to_string()))?;
        if !token.price.is_positive() {
            return Err(LedgerError::NoPrice(symbol.to_string()));
        }
        Ok(token.price)
    }

    fn balance(&self, symbol: &Symbol) -> Amount {
        self.holdings
            .get(symbol)
            .map(|h| h.balance)
            .unwrap_or(Amount::ZERO)
    }

    fn ensure_balance(&self, symbol: &Symbol, requested: Amount) -> LedgerResult<()> {
        let available = self.balance(symbol);
        if available < requested {
            return Err(LedgerError::InsufficientBalance {
                symbol: symbol.to_string(),
                available,
                requested,
            });
        }
        Ok(())
    }

    /// Copy of a holding, or an empty one when none exists yet.
    fn holding(&self, symbol: &Symbol) -> Holding {
        self.holdings
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| Holding::empty(symbol.clone()))
    }

    fn holding_mut(&mut self, symbol: &Symbol) -> &mut Holding {
        self.holdings
            .entry(symbol.clone())
            .or_insert_with(|| Holding::empty(symbol.clone()))
    }
}

/// Shared handle to the mock ledger.
#[derive(Clone)]
pub struct Ledger {
    inner: Arc<RwLock<LedgerInner>>,
    max_trades: usize,
    max_chats: usize,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger (no tokens).
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(LedgerInner::default())),
            max_trades: DEFAULT_MAX_TRADES,
            max_chats: DEFAULT_MAX_CHATS,
        }
    }

    /// Create a ledger holding the default token set at demo prices.
    pub fn seeded() -> Self {
        let ledger = Self::new();
        ledger.seed_default_tokens(false);
        ledger
    }

    /// Insert the default tokens if the table is empty.
    ///
    /// With `live` set, prices start at zero until the first fetch.
    /// Returns true when tokens were inserted.
    pub fn seed_default_tokens(&self, live: bool) -> bool {
        let mut inner = self.inner.write();
        if !inner.tokens.is_empty() {
            debug!("Tokens already initialized");
            return false;
        }
        for entry in DEFAULT_TOKENS.iter() {
            let token = entry.to_token(live);
            inner.tokens.insert(token.symbol.clone(), token);
        }
        info!(count = inner.tokens.len(), live, "Token table seeded");
        true
    }

    /// Give the demo portfolio starting balances, bought at current prices.
    pub fn seed_holdings(&self, balances: &[(Symbol, Amount)]) {
        let mut inner = self.inner.write();
        for (symbol, amount) in balances {
            let price = inner
                .tokens
                .get(symbol)
                .map(|t| t.price)
                .unwrap_or(Price::ZERO);
            if let Err(e) = inner.holding_mut(symbol).credit(*amount, price) {
                warn!(%symbol, error = %e, "Skipping starting balance");
            }
        }
    }

    // ---------------------------------------------------------------------
    // Token table
    // ---------------------------------------------------------------------

    pub fn token(&self, symbol: &Symbol) -> Option<Token> {
        self.inner.read().tokens.get(symbol).cloned()
    }

    /// All tokens, ordered by symbol.
    pub fn tokens(&self) -> Vec<Token> {
        self.inner.read().tokens.values().cloned().collect()
    }

    /// Current price map for every token with a positive price.
    pub fn prices(&self) -> HashMap<Symbol, Price> {
        self.inner
            .read()
            .tokens
            .values()
            .filter(|t| t.price.is_positive())
            .map(|t| (t.symbol.clone(), t.price))
            .collect()
    }

    /// Apply fetched prices. Unknown symbols and non-positive prices are ignored.
    ///
    /// Returns the number of tokens updated.
    pub fn apply_prices(&self, prices: &HashMap<Symbol, Price>) -> usize {
        let mut inner = self.inner.write();
        let mut updated = 0;
        for (symbol, price) in prices {
            if !price.is_positive() {
                continue;
            }
            if let Some(token) = inner.tokens.get_mut(symbol) {
                token.reprice(*price);
                updated += 1;
            }
        }
        debug!(updated, "Applied token prices");
        updated
    }

    // ---------------------------------------------------------------------
    // Trades
    // ---------------------------------------------------------------------

    /// Simulate a trade against the ledger.
    pub fn execute_trade(&self, request: &TradeRequest) -> LedgerResult<TradeOutcome> {
        if !request.amount.is_positive() {
            return Err(LedgerError::AmountNotPositive);
        }

        let mut inner = self.inner.write();
        let outcome = match request.kind {
            TradeKind::Buy => Self::simulate_buy(&mut inner, request)?,
            TradeKind::Sell => Self::simulate_sell(&mut inner, request)?,
            TradeKind::Swap => Self::simulate_swap(&mut inner, request)?,
            TradeKind::CrossChain => return Err(LedgerError::Unsupported(TradeKind::CrossChain)),
        };

        inner.trades.push_back(outcome.trade.clone());
        while inner.trades.len() > self.max_trades {
            inner.trades.pop_front();
        }

        info!(
            kind = %outcome.trade.kind,
            token = %outcome.trade.to_token,
            amount = %outcome.trade.amount,
            total_value = %outcome.trade.total_value,
            "Simulated trade executed"
        );
        Ok(outcome)
    }

    fn simulate_buy(inner: &mut LedgerInner, request: &TradeRequest) -> LedgerResult<TradeOutcome> {
        let price = inner.priced(&request.token)?;
        let total_value = request
            .amount
            .value_at(price)
            .ok_or(LedgerError::AmountOutOfRange)?;

        // Reject before any balance moves.
        inner
            .holding(&request.token)
            .credit(request.amount, price)
            .map_err(|_| LedgerError::AmountOutOfRange)?;

        // Optional payment token is debited by the equivalent value.
        if let Some(payment) = &request.from_token {
            let payment_price = inner.priced(payment)?;
            let cost = request
                .amount
                .convert(price, payment_price)
                .ok_or(LedgerError::AmountOutOfRange)?;
            inner.ensure_balance(payment, cost)?;
            inner.holding_mut(payment).debit(cost);
        }

        inner
            .holding_mut(&request.token)
            .credit(request.amount, price)
            .map_err(|_| LedgerError::AmountOutOfRange)?;

        let trade = TradeRecord::new(
            TradeKind::Buy,
            request.from_token.clone(),
            request.token.clone(),
            request.amount,
            price,
            total_value,
        );
        Ok(TradeOutcome {
            message: format!(
                "Bought {} {} for ${:.2}",
                request.amount, request.token, total_value
            ),
            trade,
            received: request.amount,
        })
    }

    fn simulate_sell(inner: &mut LedgerInner, request: &TradeRequest) -> LedgerResult<TradeOutcome> {
        let price = inner.priced(&request.token)?;
        inner.ensure_balance(&request.token, request.amount)?;
        let total_value = request
            .amount
            .value_at(price)
            .ok_or(LedgerError::AmountOutOfRange)?;
        inner.holding_mut(&request.token).debit(request.amount);

        let trade = TradeRecord::new(
            TradeKind::Sell,
            None,
            request.token.clone(),
            request.amount,
            price,
            total_value,
        );
        Ok(TradeOutcome {
            message: format!(
                "Sold {} {} for ${:.2}",
                request.amount, request.token, total_value
            ),
            trade,
            received: Amount::ZERO,
        })
    }

    fn simulate_swap(inner: &mut LedgerInner, request: &TradeRequest) -> LedgerResult<TradeOutcome> {
        let from = request.from_token.as_ref().ok_or(LedgerError::MissingFromToken)?;
        if *from == request.token {
            return Err(LedgerError::SameToken(from.to_string()));
        }
        let from_price = inner.priced(from)?;
        let to_price = inner.priced(&request.token)?;
        inner.ensure_balance(from, request.amount)?;

        let received = request
            .amount
            .convert(from_price, to_price)
            .ok_or(LedgerError::AmountOutOfRange)?;
        let total_value = request
            .amount
            .value_at(from_price)
            .ok_or(LedgerError::AmountOutOfRange)?;

        let mut target = inner.holding(&request.token);
        target
            .credit(received, to_price)
            .map_err(|_| LedgerError::AmountOutOfRange)?;

        inner.holding_mut(from).debit(request.amount);
        inner.holdings.insert(request.token.clone(), target);
        let trade = TradeRecord::new(
            TradeKind::Swap,
            Some(from.clone()),
            request.token.clone(),
            request.amount,
            to_price,
            total_value,
        );
        Ok(TradeOutcome {
            message: format!(
                "Swapped {} {} for {} {}",
                request.amount,
                from,
                Amount::new(received.inner().round_dp(6)),
                request.token
            ),
            trade,
            received,
        })
    }

    /// Append a trade built outside the simulator (e.g., a prepared onchain swap).
    pub fn record_external_trade(&self, record: TradeRecord) {
        let mut inner = self.inner.write();
        inner.trades.push_back(record);
        while inner.trades.len() > self.max_trades {
            inner.trades.pop_front();
        }
    }

    /// Most recent trades, newest first.
    pub fn recent_trades(&self, limit: usize) -> Vec<TradeRecord> {
        self.inner
            .read()
            .trades
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Replace the in-memory trade log (used when restoring from disk).
    pub fn restore_trades(&self, trades: Vec<TradeRecord>) {
        let mut inner = self.inner.write();
        inner.trades = trades.into_iter().collect();
        while inner.trades.len() > self.max_trades {
            inner.trades.pop_front();
        }
    }

    // ---------------------------------------------------------------------
    // Holdings
    // ---------------------------------------------------------------------

    /// Holdings with a positive balance.
    pub fn holdings(&self) -> Vec<Holding> {
        self.inner
            .read()
            .holdings
            .values()
            .filter(|h| h.balance.is_positive())
            .cloned()
            .collect()
    }

    pub fn balance(&self, symbol: &Symbol) -> Amount {
        self.inner.read().balance(symbol)
    }

    /// Replace holdings with real wallet balances, priced at current token prices.
    pub fn sync_holdings(&self, balances: &[(Symbol, Amount)]) {
        let mut inner = self.inner.write();
        inner.holdings.clear();
        for (symbol, amount) in balances {
            if !amount.is_positive() {
                continue;
            }
            let price = inner
                .tokens
                .get(symbol)
                .map(|t| t.price)
                .unwrap_or(Price::ZERO);
            if let Err(e) = inner.holding_mut(symbol).credit(*amount, price) {
                warn!(%symbol, error = %e, "Skipping wallet balance");
            }
        }
        info!(holdings = inner.holdings.len(), "Portfolio synced with wallet balances");
    }

    /// Σ balance × current price over holdings with a known token.
    pub fn total_value(&self) -> Decimal {
        let inner = self.inner.read();
        inner
            .holdings
            .values()
            .filter_map(|h| inner.tokens.get(&h.symbol).map(|t| h.value_at(t.price)))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        let inner = self.inner.read();
        PortfolioSummary::build(inner.holdings.values(), &inner.tokens)
    }

    // ---------------------------------------------------------------------
    // Chart data
    // ---------------------------------------------------------------------

    /// Synthetic 24-hour series ending at the token's current price, labelled in local time.
    pub fn price_history<R: Rng>(
        &self,
        symbol: &Symbol,
        rng: &mut R,
    ) -> LedgerResult<PriceHistory> {
        let token = self
            .token(symbol)
            .ok_or_else(|| LedgerError::TokenNotFound(symbol.to_string()))?;
        Ok(PriceHistory::generate(token.price, chrono::Local::now(), rng))
    }

    // ---------------------------------------------------------------------
    // Chat transcript
    // ---------------------------------------------------------------------

    pub fn record_chat(&self, record: ChatRecord) {
        let mut inner = self.inner.write();
        inner.chats.push_back(record);
        while inner.chats.len() > self.max_chats {
            inner.chats.pop_front();
        }
    }

    /// Most recent chat exchanges, oldest first.
    pub fn recent_chats(&self, limit: usize) -> Vec<ChatRecord> {
        let inner = self.inner.read();
        let skip = inner.chats.len().saturating_sub(limit);
        inner.chats.iter().skip(skip).cloned().collect()
    }

    /// Replace the in-memory transcript (used when restoring from disk).
    pub fn restore_chats(&self, chats: Vec<ChatRecord>) {
        let mut inner = self.inner.write();
        inner.chats = chats.into_iter().collect();
        while inner.chats.len() > self.max_chats {
            inner.chats.pop_front();
        }
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Ledger")
            .field("tokens", &inner.tokens.len())
            .field("holdings", &inner.holdings.len())
            .field("trades", &inner.trades.len())
            .field("chats", &inner.chats.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn amt(d: Decimal) -> Amount {
        Amount::new(d)
    }

    #[test]
    fn test_seed_is_idempotent() {
        let ledger = Ledger::new();
        assert!(ledger.seed_default_tokens(false));
        assert!(!ledger.seed_default_tokens(false));
        assert_eq!(ledger.tokens().len(), 7);
    }

    #[test]
    fn test_buy_credits_holding_and_logs_trade() {
        let ledger = Ledger::seeded();
        let outcome = ledger
            .execute_trade(&TradeRequest::buy(sym("USDT"), amt(dec!(100))))
            .unwrap();

        assert_eq!(outcome.trade.kind, TradeKind::Buy);
        assert_eq!(outcome.trade.total_value, dec!(100));
        assert_eq!(outcome.message, "Bought 100 USDT for $100.00");
        assert_eq!(ledger.balance(&sym("USDT")).inner(), dec!(100));
        assert_eq!(ledger.recent_trades(5).len(), 1);
    }

    #[test]
    fn test_buy_with_payment_token_debits_payment() {
        let ledger = Ledger::seeded();
        ledger.seed_holdings(&[(sym("USDT"), amt(dec!(10000)))]);

        ledger
            .execute_trade(
                &TradeRequest::buy(sym("ETH"), amt(dec!(1))).paying_with(Some(sym("USDT"))),
            )
            .unwrap();

        assert_eq!(ledger.balance(&sym("USDT")).inner(), dec!(6800));
        assert_eq!(ledger.balance(&sym("ETH")).inner(), dec!(1));
    }

    #[test]
    fn test_buy_with_insufficient_payment_fails_without_side_effects() {
        let ledger = Ledger::seeded();
        ledger.seed_holdings(&[(sym("USDT"), amt(dec!(10)))]);

        let err = ledger
            .execute_trade(
                &TradeRequest::buy(sym("ETH"), amt(dec!(1))).paying_with(Some(sym("USDT"))),
            )
            .unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert!(ledger.balance(&sym("ETH")).is_zero());
        assert!(ledger.recent_trades(5).is_empty());
    }

    #[test]
    fn test_sell_requires_balance() {
        let ledger = Ledger::seeded();
        let err = ledger
            .execute_trade(&TradeRequest::sell(sym("ETH"), amt(dec!(1))))
            .unwrap_err();
        assert!(err.to_string().starts_with("Insufficient ETH balance"));

        ledger.seed_holdings(&[(sym("ETH"), amt(dec!(2)))]);
        let outcome = ledger
            .execute_trade(&TradeRequest::sell(sym("ETH"), amt(dec!(0.5))))
            .unwrap();
        assert_eq!(outcome.trade.total_value, dec!(1600));
        assert_eq!(ledger.balance(&sym("ETH")).inner(), dec!(1.5));
    }

    #[test]
    fn test_swap_converts_at_price_ratio() {
        let ledger = Ledger::seeded();
        ledger.seed_holdings(&[(sym("USDT"), amt(dec!(100)))]);

        let outcome = ledger
            .execute_trade(&TradeRequest::swap(sym("USDT"), sym("METIS"), amt(dec!(90))))
            .unwrap();

        assert_eq!(outcome.received.inner(), dec!(2));
        assert_eq!(outcome.trade.total_value, dec!(90));
        assert_eq!(outcome.trade.from_token, Some(sym("USDT")));
        assert_eq!(ledger.balance(&sym("USDT")).inner(), dec!(10));
        assert_eq!(ledger.balance(&sym("METIS")).inner(), dec!(2));
    }

    #[test]
    fn test_swap_validation() {
        let ledger = Ledger::seeded();
        let missing_from = TradeRequest {
            kind: TradeKind::Swap,
            token: sym("WFLR"),
            amount: amt(dec!(1)),
            from_token: None,
        };
        assert_eq!(
            ledger.execute_trade(&missing_from).unwrap_err().to_string(),
            "From token required for swap"
        );

        let same = TradeRequest::swap(sym("FLR"), sym("FLR"), amt(dec!(1)));
        assert!(matches!(
            ledger.execute_trade(&same).unwrap_err(),
            LedgerError::SameToken(_)
        ));
    }

    #[test]
    fn test_rejects_bad_amount_and_unknown_token() {
        let ledger = Ledger::seeded();
        assert_eq!(
            ledger
                .execute_trade(&TradeRequest::buy(sym("FLR"), Amount::ZERO))
                .unwrap_err()
                .to_string(),
            "Amount must be greater than 0"
        );
        assert_eq!(
            ledger
                .execute_trade(&TradeRequest::buy(sym("DOGE"), amt(dec!(1))))
                .unwrap_err()
                .to_string(),
            "Token DOGE not found"
        );
    }

    #[test]
    fn test_oversized_amount_is_rejected_without_side_effects() {
        let ledger = Ledger::seeded();
        ledger.seed_holdings(&[(sym("FLR"), amt(dec!(1000)))]);
        let huge = amt(dec!(10000000000000000000000000000));

        for request in [
            TradeRequest::buy(sym("ETH"), huge),
            TradeRequest::buy(sym("ETH"), huge).paying_with(Some(sym("FLR"))),
            TradeRequest::sell(sym("ETH"), huge),
        ] {
            let err = ledger.execute_trade(&request).unwrap_err();
            assert!(!matches!(err, LedgerError::AmountNotPositive), "{err}");
        }
        let err = ledger
            .execute_trade(&TradeRequest::buy(sym("ETH"), huge))
            .unwrap_err();
        assert_eq!(err.to_string(), "Amount is too large to trade");

        assert!(ledger.balance(&sym("ETH")).is_zero());
        assert_eq!(ledger.balance(&sym("FLR")).inner(), dec!(1000));
        assert!(ledger.recent_trades(5).is_empty());
    }

    #[test]
    fn test_swap_overflow_keeps_balances() {
        let ledger = Ledger::seeded();
        let mut tiny = HashMap::new();
        tiny.insert(sym("APE"), Price::new(dec!(0.0000000000000000000001)));
        ledger.apply_prices(&tiny);
        ledger.seed_holdings(&[(sym("ETH"), amt(dec!(10000000)))]);

        let err = ledger
            .execute_trade(&TradeRequest::swap(sym("ETH"), sym("APE"), amt(dec!(10000000))))
            .unwrap_err();

        assert!(matches!(err, LedgerError::AmountOutOfRange));
        assert_eq!(ledger.balance(&sym("ETH")).inner(), dec!(10000000));
        assert!(ledger.balance(&sym("APE")).is_zero());
    }

    #[test]
    fn test_zero_price_blocks_trading() {
        let ledger = Ledger::new();
        ledger.seed_default_tokens(true);
        let err = ledger
            .execute_trade(&TradeRequest::buy(sym("FLR"), amt(dec!(1))))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NoPrice(_)));
    }

    #[test]
    fn test_apply_prices_updates_change() {
        let ledger = Ledger::seeded();
        let mut prices = HashMap::new();
        prices.insert(sym("ETH"), Price::new(dec!(3360)));
        prices.insert(sym("DOGE"), Price::new(dec!(0.1)));
        prices.insert(sym("APE"), Price::ZERO);

        assert_eq!(ledger.apply_prices(&prices), 1);
        let eth = ledger.token(&sym("ETH")).unwrap();
        assert_eq!(eth.change_24h, dec!(5));
        assert_eq!(ledger.token(&sym("APE")).unwrap().price.inner(), dec!(1.35));
    }

    #[test]
    fn test_recent_trades_newest_first() {
        let ledger = Ledger::seeded();
        ledger
            .execute_trade(&TradeRequest::buy(sym("FLR"), amt(dec!(1))))
            .unwrap();
        ledger
            .execute_trade(&TradeRequest::buy(sym("ETH"), amt(dec!(1))))
            .unwrap();

        let recent = ledger.recent_trades(5);
        assert_eq!(recent[0].to_token, sym("ETH"));
        assert_eq!(recent[1].to_token, sym("FLR"));
    }

    #[test]
    fn test_chat_transcript_oldest_first_and_bounded() {
        let ledger = Ledger::new();
        for i in 0..25 {
            ledger.record_chat(ChatRecord::new(format!("msg {i}"), "ok", None));
        }
        let recent = ledger.recent_chats(20);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].message, "msg 5");
        assert_eq!(recent[19].message, "msg 24");
    }

    #[test]
    fn test_sync_holdings_replaces_and_skips_zero() {
        let ledger = Ledger::seeded();
        ledger.seed_holdings(&[(sym("APE"), amt(dec!(10)))]);

        ledger.sync_holdings(&[(sym("WFLR"), amt(dec!(50))), (sym("ETH"), Amount::ZERO)]);

        let holdings = ledger.holdings();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].symbol, sym("WFLR"));
        assert_eq!(holdings[0].avg_buy_price.inner(), dec!(0.0235));
    }

    #[test]
    fn test_total_value() {
        let ledger = Ledger::seeded();
        ledger.seed_holdings(&[(sym("USDT"), amt(dec!(100))), (sym("ETH"), amt(dec!(1)))]);
        assert_eq!(ledger.total_value(), dec!(3300));
    }
}
