//! Portfolio valuation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use flare_core::{Amount, Holding, Price, Symbol, Token};

/// One valued holding.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioLine {
    pub symbol: Symbol,
    pub name: String,
    pub balance: Amount,
    pub avg_buy_price: Price,
    pub current_price: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_basis: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pnl: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pnl_percent: Decimal,
}

/// Portfolio totals and per-holding lines.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub lines: Vec<PortfolioLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pnl_percent: Decimal,
}

fn pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part.checked_div(whole)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

impl PortfolioSummary {
    /// Value every holding with a positive balance and a known token.
    pub fn build<'a>(
        holdings: impl IntoIterator<Item = &'a Holding>,
        tokens: &BTreeMap<Symbol, Token>,
    ) -> Self {
        let mut lines = Vec::new();
        let mut total_value = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;

        for holding in holdings {
            if !holding.balance.is_positive() {
                continue;
            }
            let Some(token) = tokens.get(&holding.symbol) else {
                continue;
            };

            let current_value = holding.value_at(token.price);
            let cost_basis = holding.cost_basis();
            let pnl = current_value.saturating_sub(cost_basis);

            total_value = total_value.saturating_add(current_value);
            total_cost = total_cost.saturating_add(cost_basis);

            lines.push(PortfolioLine {
                symbol: holding.symbol.clone(),
                name: token.name.clone(),
                balance: holding.balance,
                avg_buy_price: holding.avg_buy_price,
                current_price: token.price,
                current_value,
                cost_basis,
                pnl,
                pnl_percent: pct(pnl, cost_basis),
            });
        }

        let total_pnl = total_value.saturating_sub(total_cost);
        Self {
            lines,
            total_value,
            total_cost,
            total_pnl,
            total_pnl_percent: pct(total_pnl, total_cost),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Holding with the highest P&L percentage.
    pub fn best_performer(&self) -> Option<&PortfolioLine> {
        self.lines.iter().max_by(|a, b| a.pnl_percent.cmp(&b.pnl_percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn token(s: &str, price: Decimal) -> (Symbol, Token) {
        (sym(s), Token::new(sym(s), s, "0x0", Price::new(price)))
    }

    fn holding(s: &str, balance: Decimal, avg: Decimal) -> Holding {
        let mut h = Holding::empty(sym(s));
        h.credit(Amount::new(balance), Price::new(avg)).unwrap();
        h
    }

    #[test]
    fn test_summary_pnl() {
        let tokens: BTreeMap<_, _> = [token("ETH", dec!(3300)), token("APE", dec!(1))]
            .into_iter()
            .collect();
        let holdings = vec![
            holding("ETH", dec!(1), dec!(3000)),
            holding("APE", dec!(100), dec!(2)),
        ];

        let summary = PortfolioSummary::build(&holdings, &tokens);

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].pnl, dec!(300));
        assert_eq!(summary.lines[0].pnl_percent, dec!(10));
        assert_eq!(summary.lines[1].pnl_percent, dec!(-50));
        assert_eq!(summary.total_value, dec!(3400));
        assert_eq!(summary.total_cost, dec!(3200));
        assert_eq!(summary.total_pnl, dec!(200));
        assert_eq!(summary.best_performer().unwrap().symbol, sym("ETH"));
    }

    #[test]
    fn test_zero_cost_basis_gives_zero_percent() {
        let tokens: BTreeMap<_, _> = [token("FLR", dec!(0.02))].into_iter().collect();
        let holdings = vec![holding("FLR", dec!(10), dec!(0))];

        let summary = PortfolioSummary::build(&holdings, &tokens);
        assert_eq!(summary.lines[0].pnl_percent, Decimal::ZERO);
        assert_eq!(summary.total_pnl_percent, Decimal::ZERO);
    }

    #[test]
    fn test_skips_unknown_and_empty() {
        let tokens: BTreeMap<_, _> = [token("ETH", dec!(3000))].into_iter().collect();
        let holdings = vec![holding("DOGE", dec!(5), dec!(1)), Holding::empty(sym("ETH"))];

        let summary = PortfolioSummary::build(&holdings, &tokens);
        assert!(summary.is_empty());
        assert!(summary.best_performer().is_none());
    }
}
