//! Prometheus metrics.
//!
//! # Panics
//!
//! Registration uses `unwrap()`: a failure means duplicate metric names, a
//! startup bug that should crash immediately. It only happens during static
//! initialization.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge, register_gauge_vec, register_histogram_vec,
    register_int_gauge, CounterVec, Encoder, Gauge, GaugeVec, HistogramVec, IntGauge,
    TextEncoder,
};

use crate::error::{TelemetryError, TelemetryResult};

/// Price refresh attempts per source.
/// Labels: source (ftso/coingecko/simulated), outcome (ok/empty/error)
pub static PRICE_FETCH_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "flare_price_fetch_total",
        "Price refresh attempts per source",
        &["source", "outcome"]
    )
    .unwrap()
});

pub static PRICE_FETCH_LATENCY_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "flare_price_fetch_latency_ms",
        "Price source round trip in milliseconds",
        &["source"],
        vec![10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0]
    )
    .unwrap()
});

/// Latest USD price per token.
pub static TOKEN_PRICE_USD: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!("flare_token_price_usd", "Latest token price in USD", &["symbol"])
        .unwrap()
});

/// Labels: kind (buy/sell/swap/cross_chain), outcome (ok/rejected)
pub static TRADES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "flare_trades_total",
        "Simulated trades by kind and outcome",
        &["kind", "outcome"]
    )
    .unwrap()
});

pub static CHAT_MESSAGES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "flare_chat_messages_total",
        "Chat messages by recognized intent",
        &["intent"]
    )
    .unwrap()
});

/// Labels: kind (wrap/swap/one_inch_swap/cross_chain_swap/add_liquidity), outcome (ok/error)
pub static PREPARED_TX_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "flare_prepared_tx_total",
        "Unsigned transactions assembled for the wallet",
        &["kind", "outcome"]
    )
    .unwrap()
});

pub static PORTFOLIO_VALUE_USD: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!("flare_portfolio_value_usd", "Mock portfolio value in USD").unwrap()
});

pub static WALLET_CONNECTED: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!("flare_wallet_connected", "Wallet session state (1=connected)").unwrap()
});

pub static WS_CLIENTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("flare_ws_clients", "Open dashboard WebSocket connections").unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    pub fn price_fetch(source: &str, outcome: &str, latency_ms: f64) {
        PRICE_FETCH_TOTAL
            .with_label_values(&[source, outcome])
            .inc();
        PRICE_FETCH_LATENCY_MS
            .with_label_values(&[source])
            .observe(latency_ms);
    }

    pub fn token_price(symbol: &str, price: f64) {
        TOKEN_PRICE_USD.with_label_values(&[symbol]).set(price);
    }

    pub fn trade(kind: &str, ok: bool) {
        let outcome = if ok { "ok" } else { "rejected" };
        TRADES_TOTAL.with_label_values(&[kind, outcome]).inc();
    }

    pub fn chat_message(intent: &str) {
        CHAT_MESSAGES_TOTAL.with_label_values(&[intent]).inc();
    }

    pub fn prepared_tx(kind: &str, ok: bool) {
        let outcome = if ok { "ok" } else { "error" };
        PREPARED_TX_TOTAL.with_label_values(&[kind, outcome]).inc();
    }

    pub fn portfolio_value(usd: f64) {
        PORTFOLIO_VALUE_USD.set(usd);
    }

    pub fn wallet_connected(connected: bool) {
        WALLET_CONNECTED.set(if connected { 1.0 } else { 0.0 });
    }

    pub fn ws_client_opened() {
        WS_CLIENTS.inc();
    }

    pub fn ws_client_closed() {
        WS_CLIENTS.dec();
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let families = prometheus::gather();
        let mut buf = Vec::new();
        TextEncoder::new().encode(&families, &mut buf)?;
        String::from_utf8(buf).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
