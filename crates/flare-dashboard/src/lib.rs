//! flare-dashboard - Web dashboard and REST API for the Flare trading assistant.
//!
//! This crate serves the browser UI and everything it talks to:
//!
//! - Pages for the overview, trading, portfolio and chat views
//! - REST API over the simulated ledger, the chat assistant and bridge quotes
//! - Unsigned transaction preparation for a connected wallet
//! - WebSocket price stream (configurable interval, 5s by default)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        flare-bot process                         │
//! │                                                                 │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐     │
//! │  │   Ledger     │  │ PriceAggregator│  │ ChainServices    │     │
//! │  │  (Arc<>)     │  │  (Arc<>)       │  │ (optional)       │     │
//! │  └──────┬───────┘  └───────┬────────┘  └────────┬─────────┘     │
//! │         └──────────────────┼────────────────────┘               │
//! │                            ▼                                    │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │        DashboardState (+ ChatBot, WalletSessions)          │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────┼────────────────────────────────┐  │
//! │  │       axum HTTP Server (port 5000)                        │  │
//! │  │  GET  /, /trading, /portfolio, /chat → HTML pages         │  │
//! │  │  GET  /api/dashboard          → JSON snapshot             │  │
//! │  │  POST /api/execute_trade      → simulated trade           │  │
//! │  │  POST /api/chat               → assistant reply           │  │
//! │  │  POST /api/execute_dex_swap   → unsigned transaction      │  │
//! │  │  GET  /ws                     → price stream              │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use flare_dashboard::{run_server, DashboardConfig, DashboardState};
//!
//! let state = DashboardState::new(ledger, Arc::new(aggregator));
//! let config = DashboardConfig::default();
//! run_server(state, config, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! ```

mod broadcast;
mod config;
mod error;
mod extract;
mod server;
mod state;
mod types;
mod wallet;

pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult, Failure};
pub use server::{create_router, run_server, AppState};
pub use state::{ChainServices, DashboardState, Journal};
pub use types::{
    DashboardMessage, DashboardSnapshot, TokenList, TokenQuote, TradeBody, TradeResponse,
};
pub use wallet::{WalletChain, WalletConfig, WalletSessions, WalletStatus, WALLET_CHAINS};
