//! Conversational responder.
//!
//! Turns a parsed [`Intent`] into reply text, running simulated trades and
//! bridge quotes against the shared ledger along the way.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use flare_chain::{gas_info, BridgeQuoter};
use flare_core::{Amount, Chain, ChatRecord, Symbol, TradeRecord};
use flare_ledger::{catalog, Ledger, LedgerError, LedgerResult, TradeOutcome, TradeRequest};
use flare_telemetry::Metrics;

use crate::error::{ChatError, ChatResult};
use crate::intent::{parse_intent, Intent};
use crate::replies;

/// Reply to one chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    /// Short description of the trade or quote the message triggered.
    pub trade_executed: Option<String>,
    /// Ledger row for a simulated trade the message executed.
    pub trade: Option<TradeRecord>,
    pub intent: &'static str,
}

impl ChatReply {
    /// Transcript row for this exchange.
    pub fn to_record(&self, message: &str) -> ChatRecord {
        ChatRecord::new(message, self.response.clone(), self.trade_executed.clone())
    }
}

struct Answer {
    text: String,
    summary: Option<String>,
    trade: Option<TradeRecord>,
}

impl Answer {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            summary: None,
            trade: None,
        }
    }

    fn noted(text: String, summary: String) -> Self {
        Self {
            text,
            summary: Some(summary),
            trade: None,
        }
    }

    fn traded(text: String, summary: String, trade: TradeRecord) -> Self {
        Self {
            text,
            summary: Some(summary),
            trade: Some(trade),
        }
    }
}

/// Regex-driven trading assistant.
pub struct ChatBot {
    ledger: Ledger,
    quoter: BridgeQuoter,
    rng: Mutex<StdRng>,
}

impl ChatBot {
    pub fn new(ledger: Ledger) -> Self {
        Self::with_rng(ledger, StdRng::from_entropy())
    }

    /// Deterministic canned-reply selection.
    pub fn with_seed(ledger: Ledger, seed: u64) -> Self {
        Self::with_rng(ledger, StdRng::seed_from_u64(seed))
    }

    fn with_rng(ledger: Ledger, rng: StdRng) -> Self {
        Self {
            ledger,
            quoter: BridgeQuoter::new(),
            rng: Mutex::new(rng),
        }
    }

    pub fn respond(&self, message: &str) -> ChatResult<ChatReply> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let intent = parse_intent(message);
        let label = intent.label();
        Metrics::chat_message(label);

        let answer = self.reply(intent);
        debug!(intent = label, summary = ?answer.summary, "Chat reply ready");

        Ok(ChatReply {
            response: answer.text,
            trade_executed: answer.summary,
            trade: answer.trade,
            intent: label,
        })
    }

    fn reply(&self, intent: Intent) -> Answer {
        match intent {
            Intent::Bridge {
                amount,
                token,
                from_chain,
                to_chain,
            } => self.bridge(amount, &token, from_chain.as_deref(), to_chain),
            Intent::Quote {
                amount,
                token,
                from_chain,
                to_chain,
            } => self.quote(amount, &token, from_chain.as_deref(), &to_chain),
            Intent::Buy {
                amount,
                token,
                pay_with,
                chain,
            } => self.buy(amount, &token, pay_with.as_deref(), chain.as_deref()),
            Intent::Sell { amount, token } => self.sell(amount, &token),
            Intent::Swap {
                amount,
                from,
                to,
                chain,
            } => self.swap(amount, &from, &to, chain.as_deref()),
            Intent::Wrap { amount, from, to } => self.wrap(amount, &from, to.as_deref()),
            Intent::Price { token } => self.price(&token),
            Intent::Balance => self.portfolio(),
            Intent::Gas { chain } => Answer::text(gas_reply(chain)),
            Intent::Chains => Answer::text(replies::SUPPORTED_CHAINS),
            Intent::Greeting => Answer::text(self.pick(&replies::GREETINGS)),
            Intent::Thanks => Answer::text(self.pick(&replies::THANKS)),
            Intent::Help => Answer::text(replies::HELP),
            Intent::FlareInfo => Answer::text(replies::FLARE_INFO),
            Intent::MarketInfo => Answer::text(replies::MARKET_INFO),
            Intent::Tips => Answer::text(replies::TIPS),
            Intent::Fallback => Answer::text(self.pick(&replies::FALLBACKS)),
        }
    }

    fn pick(&self, options: &[&'static str]) -> &'static str {
        options.choose(&mut *self.rng.lock()).copied().unwrap_or_default()
    }

    fn bridge(
        &self,
        amount: Amount,
        token: &str,
        from_chain: Option<&str>,
        to_chain: Chain,
    ) -> Answer {
        // Stablecoins keep their identity across chains; everything else arrives as ETH.
        let to_token = if token == "USDT" || token == "USDC" { token } else { "ETH" };
        let quote = match (Symbol::new(token), Symbol::new(to_token)) {
            (Ok(from), Ok(to)) => self.quoter.quote(
                from_chain.unwrap_or("flare"),
                to_chain.key(),
                &from,
                &to,
                amount,
                &self.ledger.prices(),
            ),
            _ => return Answer::text(format!("❌ Cross-chain quote failed: Token {token} not found")),
        };
        let quote = match quote {
            Ok(q) => q,
            Err(e) => {
                warn!(error = %e, "Chat bridge quote failed");
                return Answer::text(format!("❌ Cross-chain quote failed: {e}"));
            }
        };

        let response = format!(
            "🌉 **Cross-Chain Swap Quote:**

**Route:** {} → {}
**Trade:** {amount} {token} → {:.6} {to_token}

**💰 Fees Breakdown:**
• Bridge Fee: ${:.2}
• Gas Estimate: ${:.2}
• Total Fees: ${:.2}

**📊 Trade Details:**
• Price Impact: {:.2}%
• Est. Time: {}
• Route: {}

Would you like me to execute this cross-chain swap? Just say \"execute\" or \"confirm\"!",
            quote.from_chain.display_name(),
            quote.to_chain.display_name(),
            quote.amount_out.inner(),
            quote.bridge_fee,
            quote.gas_estimate,
            quote.total_fee_usd,
            quote.price_impact,
            quote.estimated_time,
            quote.route.name,
        );
        Answer::noted(
            response,
            format!("Cross-chain quote: {amount} {token} to {to_token}"),
        )
    }

    fn quote(
        &self,
        amount: Amount,
        token: &str,
        from_chain: Option<&str>,
        to_chain: &str,
    ) -> Answer {
        let from_chain = from_chain.unwrap_or("flare");
        let result = Symbol::new(token)
            .map_err(|e| e.to_string())
            .and_then(|symbol| {
                self.quoter
                    .quote(from_chain, to_chain, &symbol, &symbol, amount, &self.ledger.prices())
                    .map_err(|e| e.to_string())
            });
        match result {
            Ok(quote) => Answer::text(format!(
                "💰 Cross-chain transfer quote: {amount} {token} from {from_chain} to {to_chain} will cost ${:.2} in fees and take approximately {}.",
                quote.total_fee_usd, quote.estimated_time
            )),
            Err(e) => Answer::text(format!("❌ Unable to get quote: {e}")),
        }
    }

    fn trade(&self, request: LedgerResult<TradeRequest>) -> LedgerResult<TradeOutcome> {
        let request = request?;
        let result = self.ledger.execute_trade(&request);
        Metrics::trade(request.kind.as_str(), result.is_ok());
        result
    }

    fn buy(
        &self,
        amount: Amount,
        token: &str,
        pay_with: Option<&str>,
        chain: Option<&str>,
    ) -> Answer {
        if let Some(chain) = chain.filter(|c| *c != "flare") {
            return Answer::text(format!(
                "🔗 I can help you buy {token} on {}! However, cross-chain purchases require connecting to that network. For now, I'll execute this on Flare Network. Use 'bridge' commands for cross-chain transfers.",
                title_case(chain)
            ));
        }

        let request = symbol(token).and_then(|t| {
            let payment = pay_with.map(symbol).transpose()?;
            Ok(TradeRequest::buy(t, amount).paying_with(payment))
        });
        match self.trade(request) {
            Ok(outcome) => Answer::traded(
                format!(
                    "✅ **Purchase Successful!**

Bought **{amount} {token}** for ${:.2}! 🎉

Your new {token} tokens are now safely in your portfolio. Want to see your updated balance? Just ask me \"show balance\"!",
                    outcome.trade.total_value
                ),
                format!("Bought {amount} {token}"),
                outcome.trade,
            ),
            Err(e) => Answer::text(format!(
                "❌ Purchase failed: {e} 😔 Don't worry though, try adjusting the amount or check your balance!"
            )),
        }
    }

    fn sell(&self, amount: Amount, token: &str) -> Answer {
        let request = symbol(token).map(|t| TradeRequest::sell(t, amount));
        match self.trade(request) {
            Ok(outcome) => Answer::traded(
                format!(
                    "💰 **Sale Completed!**

Successfully sold **{amount} {token}** for ${:.2}!

The funds have been added to your account. Great timing on that trade! 📈",
                    outcome.trade.total_value
                ),
                format!("Sold {amount} {token}"),
                outcome.trade,
            ),
            Err(e) => Answer::text(format!(
                "❌ Sale failed: {e} 😕 This might be due to insufficient balance or market conditions."
            )),
        }
    }

    fn swap(
        &self,
        amount: Amount,
        from: &str,
        to: &str,
        chain: Option<&str>,
    ) -> Answer {
        let request = symbol(from)
            .and_then(|f| Ok(TradeRequest::swap(f, symbol(to)?, amount)));
        match self.trade(request) {
            Ok(outcome) => Answer::traded(
                format!(
                    "🔄 **Swap Executed Successfully!**

Swapped **{amount} {from}** → **{to}** on {} Network!

This was a smart move! The swap has been completed and your new tokens are ready. Want to see how this affected your portfolio? 📊",
                    title_case(chain.unwrap_or("flare"))
                ),
                format!("Swapped {amount} {from} for {to}"),
                outcome.trade,
            ),
            Err(e) => Answer::text(format!(
                "❌ Swap failed: {e} 🤔 This could be due to insufficient liquidity or balance issues."
            )),
        }
    }

    fn wrap(&self, amount: Amount, from: &str, to: Option<&str>) -> Answer {
        let to = to.unwrap_or(if from == "FLR" { "WFLR" } else { "FLR" });
        let action = match (from, to) {
            ("FLR", "WFLR") => "Wrapped",
            ("WFLR", "FLR") => "Unwrapped",
            _ => return Answer::text(replies::WRAP_PAIR_ONLY),
        };

        let request = symbol(from)
            .and_then(|f| Ok(TradeRequest::swap(f, symbol(to)?, amount)));
        match self.trade(request) {
            Ok(outcome) => Answer::traded(
                format!(
                    "🔄 **{action} Successfully!**

{action} **{amount} {from}** to **{to}**!

Your {to} tokens are now ready for DeFi protocols! Wrapping/unwrapping is essential for participating in the DeFi ecosystem. 🌟"
                ),
                format!("{action} {amount} {from} to {to}"),
                outcome.trade,
            ),
            Err(e) => Answer::text(format!("❌ {e} 😞")),
        }
    }

    fn price(&self, token: &str) -> Answer {
        let Some(info) = Symbol::new(token).ok().and_then(|s| self.ledger.token(&s)) else {
            return Answer::text(format!(
                "❌ **Token {token} not found!** 🤔

**Supported tokens:** {}

Try asking about one of these, or let me know if you'd like me to add support for more tokens! I'm always learning! 🧠✨",
                catalog::supported_symbols()
            ));
        };

        let change = info.change_24h.to_f64().unwrap_or(0.0);
        let emoji = if change >= 0.0 { "📈" } else { "📉" };
        let trend = if change > 2.0 {
            "bullish"
        } else if change < -2.0 {
            "bearish"
        } else {
            "stable"
        };
        let quip = if change < -5.0 {
            "Great time to buy the dip! 🎯"
        } else if change > 5.0 {
            "Nice gains! 🚀"
        } else {
            "Steady as she goes! ⚖️"
        };

        Answer::text(format!(
            "💰 **{} ({}) Price:**

**${:.6}** {emoji} **{change:+.2}%** (24h)

The market is looking **{trend}** for {} right now! {quip}

Want to make a trade? Just tell me what you'd like to do!",
            info.name,
            info.symbol,
            info.price.inner(),
            info.symbol,
        ))
    }

    fn portfolio(&self) -> Answer {
        let summary = self.ledger.portfolio_summary();
        if summary.is_empty() {
            return Answer::text(replies::EMPTY_PORTFOLIO);
        }

        let mut text = String::from("📊 **Your Portfolio:**\n\n");
        for line in &summary.lines {
            let pnl = line.pnl_percent.to_f64().unwrap_or(0.0);
            let emoji = if pnl > 0.0 {
                "📈"
            } else if pnl < 0.0 {
                "📉"
            } else {
                "➡️"
            };
            text.push_str(&format!(
                "• **{:.4} {}** = ${:.2} {emoji} {pnl:+.1}%\n",
                line.balance.inner(),
                line.symbol,
                line.current_value,
            ));
        }

        text.push_str(&format!("\n💎 **Total Value: ${:.2}**", summary.total_value));
        if let Some(best) = summary.best_performer() {
            text.push_str(&format!(
                "\n🏆 **Best Performer: {}** ({:+.1}%)",
                best.symbol,
                best.pnl_percent.to_f64().unwrap_or(0.0)
            ));
        }
        text.push_str(if summary.total_value > Decimal::ONE_THOUSAND {
            "\n\n🎉 Great portfolio! Keep up the good work!"
        } else {
            "\n\n📈 Nice start! Ready to grow this portfolio?"
        });

        Answer::text(text)
    }
}

fn gas_reply(chain: Chain) -> String {
    let Some(info) = gas_info(chain) else {
        return replies::FALLBACKS[0].to_string();
    };
    let closing = if chain == Chain::Flare {
        "Flare Network offers some of the lowest fees in crypto! Perfect for frequent trading. 🎯"
    } else {
        "Consider using Flare Network for lower fees when possible!"
    };
    format!(
        "⛽ **Gas Fees on {}:**

💰 **Cost:** {}
⚡ **Speed:** {}
📝 **Note:** {}

{closing}",
        chain.display_name(),
        info.cost,
        info.speed,
        info.note,
    )
}

fn symbol(raw: &str) -> LedgerResult<Symbol> {
    Symbol::new(raw).map_err(|_| LedgerError::TokenNotFound(raw.to_string()))
}

fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn bot_with(balances: &[(&str, Decimal)]) -> (ChatBot, Ledger) {
        let ledger = Ledger::seeded();
        let balances: Vec<_> = balances
            .iter()
            .map(|(s, a)| (sym(s), Amount::new(*a)))
            .collect();
        ledger.seed_holdings(&balances);
        (ChatBot::with_seed(ledger.clone(), 7), ledger)
    }

    #[test]
    fn test_empty_message_rejected() {
        let (bot, _) = bot_with(&[]);
        let err = bot.respond("   ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a message.");
    }

    #[test]
    fn test_buy_updates_ledger() {
        let (bot, ledger) = bot_with(&[]);
        let reply = bot.respond("buy 100 wflr").unwrap();

        assert_eq!(reply.intent, "buy");
        assert_eq!(reply.trade_executed.as_deref(), Some("Bought 100 WFLR"));
        assert_eq!(reply.trade.as_ref().unwrap().to_token, sym("WFLR"));
        assert!(reply.response.contains("for $2.35"));
        assert_eq!(ledger.balance(&sym("WFLR")).inner(), dec!(100));
    }

    #[test]
    fn test_buy_on_other_chain_is_not_executed() {
        let (bot, ledger) = bot_with(&[]);
        let reply = bot.respond("buy 1 eth on polygon").unwrap();

        assert!(reply.response.contains("buy ETH on Polygon"));
        assert!(reply.response.contains("requires connecting to that network"));
        assert!(reply.trade_executed.is_none());
        assert!(ledger.balance(&sym("ETH")).is_zero());
    }

    #[test]
    fn test_sell_insufficient_balance() {
        let (bot, _) = bot_with(&[("ETH", dec!(1))]);
        let reply = bot.respond("sell 5 eth").unwrap();

        assert!(reply.response.starts_with("❌ Sale failed: Insufficient ETH balance"));
        assert!(reply.trade_executed.is_none());
    }

    #[test]
    fn test_oversized_amounts_fail_gracefully() {
        let (bot, ledger) = bot_with(&[]);

        let reply = bot.respond("buy 10000000000000000000000000000 eth").unwrap();
        assert_eq!(reply.intent, "buy");
        assert!(reply.response.starts_with("❌ Purchase failed: Amount is too large to trade"));
        assert!(reply.trade_executed.is_none());
        assert!(ledger.balance(&sym("ETH")).is_zero());

        let reply = bot
            .respond("bridge 10000000000000000000000000000 eth to polygon")
            .unwrap();
        assert!(reply.response.starts_with("❌ Cross-chain quote failed: Amount out of range"));
    }

    #[test]
    fn test_swap_and_unknown_token() {
        let (bot, ledger) = bot_with(&[("USDT", dec!(100))]);

        let reply = bot.respond("swap 10 usdt for eth").unwrap();
        assert_eq!(reply.trade_executed.as_deref(), Some("Swapped 10 USDT for ETH"));
        assert!(reply.response.contains("on Flare Network"));
        assert_eq!(ledger.balance(&sym("USDT")).inner(), dec!(90));

        let reply = bot.respond("swap 10 usdt for doge").unwrap();
        assert!(reply.response.contains("Token DOGE not found"));
    }

    #[test]
    fn test_wrap_pairs() {
        let (bot, ledger) = bot_with(&[("FLR", dec!(500))]);

        let reply = bot.respond("wrap 200 flr").unwrap();
        assert_eq!(reply.trade_executed.as_deref(), Some("Wrapped 200 FLR to WFLR"));
        assert_eq!(ledger.balance(&sym("WFLR")).inner(), dec!(200));

        let reply = bot.respond("wrap 5 eth to usdt").unwrap();
        assert_eq!(reply.response, replies::WRAP_PAIR_ONLY);
    }

    #[test]
    fn test_bridge_quote_reply() {
        let (bot, _) = bot_with(&[]);
        let reply = bot.respond("bridge 50 usdt to eth").unwrap();

        assert_eq!(reply.intent, "bridge");
        assert!(reply.response.contains("**Route:** Flare → Ethereum"));
        assert!(reply.response.contains("Route: LayerZero"));
        assert_eq!(
            reply.trade_executed.as_deref(),
            Some("Cross-chain quote: 50 USDT to USDT")
        );
        assert!(reply.trade.is_none());
    }

    #[test]
    fn test_quote_to_unknown_chain() {
        let (bot, _) = bot_with(&[]);
        let reply = bot.respond("quote 100 flr to mars").unwrap();
        assert_eq!(reply.response, "❌ Unable to get quote: Unsupported chain: mars");
    }

    #[test]
    fn test_price_reply() {
        let (bot, _) = bot_with(&[]);
        let reply = bot.respond("price of eth").unwrap();
        assert!(reply.response.contains("Ethereum (ETH) Price"));
        assert!(reply.response.contains("$3200.000000"));
        assert!(reply.response.contains("**stable**"));

        let reply = bot.respond("price of doge").unwrap();
        assert!(reply.response.contains("Token DOGE not found"));
        assert!(reply.response.contains("FLR, WFLR, ETH"));
    }

    #[test]
    fn test_portfolio_reply() {
        let (bot, _) = bot_with(&[]);
        assert_eq!(bot.respond("balance").unwrap().response, replies::EMPTY_PORTFOLIO);

        let (bot, _) = bot_with(&[("ETH", dec!(1))]);
        let reply = bot.respond("show my portfolio").unwrap().response;
        assert!(reply.contains("• **1.0000 ETH** = $3200.00 ➡️ +0.0%"));
        assert!(reply.contains("Total Value: $3200.00"));
        assert!(reply.contains("Best Performer: ETH"));
        assert!(reply.contains("Great portfolio!"));
    }

    #[test]
    fn test_gas_reply() {
        let (bot, _) = bot_with(&[]);
        let reply = bot.respond("gas on flare").unwrap().response;
        assert!(reply.contains("Gas Fees on Flare"));
        assert!(reply.contains("Ultra-low fees!"));
        assert!(reply.contains("lowest fees in crypto"));
    }

    #[test]
    fn test_canned_replies() {
        let (bot, _) = bot_with(&[]);
        assert!(replies::GREETINGS.contains(&bot.respond("hello").unwrap().response.as_str()));
        assert!(replies::THANKS.contains(&bot.respond("thanks").unwrap().response.as_str()));
        assert!(replies::FALLBACKS.contains(&bot.respond("qwerty").unwrap().response.as_str()));
        assert_eq!(bot.respond("help").unwrap().response, replies::HELP);
    }

    #[test]
    fn test_to_record() {
        let (bot, _) = bot_with(&[]);
        let reply = bot.respond("buy 1 eth").unwrap();
        let record = reply.to_record("buy 1 eth");
        assert_eq!(record.message, "buy 1 eth");
        assert_eq!(record.trade_executed.as_deref(), Some("Bought 1 ETH"));
    }
}
