//! Intent recognition.
//!
//! Patterns are tried in a fixed order against the lowercased message and the
//! first match wins. Later patterns are looser, so order matters: "swap 5 flr
//! to polygon" is a bridge, "swap 5 flr for wflr" is a swap.

use flare_chain::gas_info;
use flare_core::{Amount, Chain};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($re).expect("valid pattern"));
    };
}

pattern!(BRIDGE, r"(?:bridge|swap|send|transfer) (\d+\.?\d*) (\w+) (?:from (\w+) )?to (\w+)(?: (?:chain|network))?");
pattern!(QUOTE, r"(?:quote|price|cost|fee).* (\d+\.?\d*) (\w+) (?:from (\w+) )?to (\w+)");
pattern!(BUY, r"(?:buy|purchase|get|acquire) (\d+\.?\d*) (\w+)(?:\s+(?:with|using)\s+(\w+))?(?:\s+on\s+(\w+))?");
pattern!(SELL, r"(?:sell|dump|liquidate) (\d+\.?\d*) (\w+)(?:\s+on\s+(\w+))?");
pattern!(SWAP, r"(?:swap|exchange|trade) (\d+\.?\d*) (\w+) (?:for|to) (\w+)(?:\s+on\s+(\w+))?");
pattern!(WRAP, r"(?:wrap|unwrap) (\d+\.?\d*) (\w+)(?: to (\w+))?");
pattern!(PRICE, r"(?:price|cost|value|worth).* (\w+)(?:\s+on\s+(\w+))?");
pattern!(BALANCE, r"(?:balance|holdings?|portfolio|wallet)");
pattern!(GAS, r"(?:gas|fees?|cost).* (?:on )?(\w+)");
pattern!(CHAINS, r"(?:chains?|networks?|supported)");
pattern!(GREETING, r"(?:hi|hello|hey|good\s+(?:morning|afternoon|evening)|greetings?)");
pattern!(HELP, r"help|commands?|what.* (?:can|do)|how.* work");
pattern!(THANKS, r"thanks?|thank you|thx|appreciate");

const TOPIC_WORDS: [&str; 6] = ["market", "defi", "crypto", "blockchain", "flare", "oracle"];
const TIPS_WORDS: [&str; 5] = ["advanced", "tips", "strategy", "optimize", "best"];

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Bridge {
        amount: Amount,
        token: String,
        from_chain: Option<String>,
        to_chain: Chain,
    },
    Quote {
        amount: Amount,
        token: String,
        from_chain: Option<String>,
        to_chain: String,
    },
    Buy {
        amount: Amount,
        token: String,
        pay_with: Option<String>,
        chain: Option<String>,
    },
    Sell {
        amount: Amount,
        token: String,
    },
    Swap {
        amount: Amount,
        from: String,
        to: String,
        chain: Option<String>,
    },
    Wrap {
        amount: Amount,
        from: String,
        to: Option<String>,
    },
    Price {
        token: String,
    },
    Balance,
    Gas {
        chain: Chain,
    },
    Chains,
    Greeting,
    Thanks,
    Help,
    FlareInfo,
    MarketInfo,
    Tips,
    Fallback,
}

impl Intent {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bridge { .. } => "bridge",
            Self::Quote { .. } => "quote",
            Self::Buy { .. } => "buy",
            Self::Sell { .. } => "sell",
            Self::Swap { .. } => "swap",
            Self::Wrap { .. } => "wrap",
            Self::Price { .. } => "price",
            Self::Balance => "balance",
            Self::Gas { .. } => "gas",
            Self::Chains => "chains",
            Self::Greeting => "greeting",
            Self::Thanks => "thanks",
            Self::Help => "help",
            Self::FlareInfo => "flare_info",
            Self::MarketInfo => "market_info",
            Self::Tips => "tips",
            Self::Fallback => "fallback",
        }
    }
}

fn amount(caps: &Captures<'_>, idx: usize) -> Option<Amount> {
    caps.get(idx)?
        .as_str()
        .trim_end_matches('.')
        .parse()
        .ok()
}

fn upper(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx).map(|m| m.as_str().to_uppercase())
}

fn lower(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx).map(|m| m.as_str().to_lowercase())
}

fn parse_bridge(msg: &str) -> Option<Intent> {
    let caps = BRIDGE.captures(msg)?;
    // Only a recognizable chain makes this a bridge; "swap 5 flr to wflr" is a swap.
    let to_chain = Chain::parse_alias(caps.get(4)?.as_str())?;
    Some(Intent::Bridge {
        amount: amount(&caps, 1)?,
        token: upper(&caps, 2)?,
        from_chain: lower(&caps, 3),
        to_chain,
    })
}

fn parse_quote(msg: &str) -> Option<Intent> {
    let caps = QUOTE.captures(msg)?;
    Some(Intent::Quote {
        amount: amount(&caps, 1)?,
        token: upper(&caps, 2)?,
        from_chain: lower(&caps, 3),
        to_chain: lower(&caps, 4)?,
    })
}

fn parse_buy(msg: &str) -> Option<Intent> {
    let caps = BUY.captures(msg)?;
    Some(Intent::Buy {
        amount: amount(&caps, 1)?,
        token: upper(&caps, 2)?,
        pay_with: upper(&caps, 3),
        chain: lower(&caps, 4),
    })
}

fn parse_sell(msg: &str) -> Option<Intent> {
    let caps = SELL.captures(msg)?;
    Some(Intent::Sell {
        amount: amount(&caps, 1)?,
        token: upper(&caps, 2)?,
    })
}

fn parse_swap(msg: &str) -> Option<Intent> {
    let caps = SWAP.captures(msg)?;
    Some(Intent::Swap {
        amount: amount(&caps, 1)?,
        from: upper(&caps, 2)?,
        to: upper(&caps, 3)?,
        chain: lower(&caps, 4),
    })
}

fn parse_wrap(msg: &str) -> Option<Intent> {
    let caps = WRAP.captures(msg)?;
    Some(Intent::Wrap {
        amount: amount(&caps, 1)?,
        from: upper(&caps, 2)?,
        to: upper(&caps, 3),
    })
}

fn parse_price(msg: &str) -> Option<Intent> {
    let caps = PRICE.captures(msg)?;
    Some(Intent::Price {
        token: upper(&caps, 1)?,
    })
}

fn parse_gas(msg: &str) -> Option<Intent> {
    let caps = GAS.captures(msg)?;
    // Chains without a gas profile fall through to the conversational intents.
    let chain = Chain::parse_alias(caps.get(1)?.as_str()).filter(|c| gas_info(*c).is_some())?;
    Some(Intent::Gas { chain })
}

fn parse_topic(msg: &str) -> Option<Intent> {
    if !TOPIC_WORDS.iter().any(|w| msg.contains(w)) {
        return None;
    }
    if msg.contains("flare") || msg.contains("ftso") || msg.contains("oracle") {
        Some(Intent::FlareInfo)
    } else if msg.contains("market") {
        Some(Intent::MarketInfo)
    } else {
        None
    }
}

/// Classify a chat message.
pub fn parse_intent(message: &str) -> Intent {
    let msg = message.trim().to_lowercase();

    let parsers: [fn(&str) -> Option<Intent>; 9] = [
        parse_bridge,
        parse_quote,
        parse_buy,
        parse_sell,
        parse_swap,
        parse_wrap,
        parse_price,
        |m| BALANCE.is_match(m).then_some(Intent::Balance),
        parse_gas,
    ];
    if let Some(intent) = parsers.iter().find_map(|p| p(&msg)) {
        return intent;
    }

    if CHAINS.is_match(&msg) {
        Intent::Chains
    } else if GREETING.is_match(&msg) {
        Intent::Greeting
    } else if THANKS.is_match(&msg) {
        Intent::Thanks
    } else if HELP.is_match(&msg) {
        Intent::Help
    } else if let Some(topic) = parse_topic(&msg) {
        topic
    } else if TIPS_WORDS.iter().any(|w| msg.contains(w)) {
        Intent::Tips
    } else {
        Intent::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amt(d: rust_decimal::Decimal) -> Amount {
        Amount::new(d)
    }

    #[test]
    fn test_bridge_with_alias() {
        assert_eq!(
            parse_intent("Bridge 50 USDT to eth"),
            Intent::Bridge {
                amount: amt(dec!(50)),
                token: "USDT".into(),
                from_chain: None,
                to_chain: Chain::Ethereum,
            }
        );
    }

    #[test]
    fn test_bridge_with_source_chain() {
        match parse_intent("send 1.5 eth from flare to polygon network") {
            Intent::Bridge {
                amount,
                from_chain,
                to_chain,
                ..
            } => {
                assert_eq!(amount, amt(dec!(1.5)));
                assert_eq!(from_chain.as_deref(), Some("flare"));
                assert_eq!(to_chain, Chain::Polygon);
            }
            other => panic!("unexpected intent {other:?}"),
        }
    }

    #[test]
    fn test_swap_to_token_is_not_bridge() {
        assert_eq!(
            parse_intent("swap 100 usdt to wflr"),
            Intent::Swap {
                amount: amt(dec!(100)),
                from: "USDT".into(),
                to: "WFLR".into(),
                chain: None,
            }
        );
    }

    #[test]
    fn test_quote() {
        assert_eq!(
            parse_intent("quote 100 FLR to Polygon"),
            Intent::Quote {
                amount: amt(dec!(100)),
                token: "FLR".into(),
                from_chain: None,
                to_chain: "polygon".into(),
            }
        );
    }

    #[test]
    fn test_buy_with_payment_and_chain() {
        assert_eq!(
            parse_intent("buy 10 eth with usdt on polygon"),
            Intent::Buy {
                amount: amt(dec!(10)),
                token: "ETH".into(),
                pay_with: Some("USDT".into()),
                chain: Some("polygon".into()),
            }
        );
    }

    #[test]
    fn test_sell_and_trailing_dot() {
        assert_eq!(
            parse_intent("sell 5. wflr"),
            Intent::Sell {
                amount: amt(dec!(5)),
                token: "WFLR".into(),
            }
        );
    }

    #[test]
    fn test_swap_for() {
        assert!(matches!(
            parse_intent("swap 100 USDT for WFLR"),
            Intent::Swap { .. }
        ));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            parse_intent("wrap 200 flr to wflr"),
            Intent::Wrap {
                amount: amt(dec!(200)),
                from: "FLR".into(),
                to: Some("WFLR".into()),
            }
        );
        assert_eq!(
            parse_intent("unwrap 3 wflr"),
            Intent::Wrap {
                amount: amt(dec!(3)),
                from: "WFLR".into(),
                to: None,
            }
        );
    }

    #[test]
    fn test_information_intents() {
        assert_eq!(
            parse_intent("what is the price of eth"),
            Intent::Price { token: "ETH".into() }
        );
        assert_eq!(parse_intent("show my balance"), Intent::Balance);
        assert_eq!(
            parse_intent("gas fees on ethereum"),
            Intent::Gas { chain: Chain::Ethereum }
        );
        assert_eq!(parse_intent("gas on coston"), Intent::Fallback);
        assert_eq!(parse_intent("supported chains"), Intent::Chains);
    }

    #[test]
    fn test_conversational_intents() {
        assert_eq!(parse_intent("Hello!"), Intent::Greeting);
        assert_eq!(parse_intent("thank you"), Intent::Thanks);
        assert_eq!(parse_intent("help"), Intent::Help);
        assert_eq!(parse_intent("tell me about ftso oracles"), Intent::FlareInfo);
        assert_eq!(parse_intent("market update"), Intent::MarketInfo);
        assert_eq!(parse_intent("any tips?"), Intent::Tips);
        assert_eq!(parse_intent("xyzzy"), Intent::Fallback);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Intent::Fallback.label(), "fallback");
        assert_eq!(parse_intent("hi").label(), "greeting");
    }
}
