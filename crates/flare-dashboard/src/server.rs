//! HTTP server implementation using axum.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures_util::stream::StreamExt;
use futures_util::SinkExt;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use flare_chain::{supported_chains, validate_address, FlareApiClient, PreparedTx};
use flare_chat::ChatError;
use flare_core::Symbol;
use flare_telemetry::Metrics;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::extract::ApiJson;
use crate::state::DashboardState;
use crate::types::{
    Ack, ChatBody, ChatResponse, CrossChainBody, DashboardMessage, DashboardSnapshot, DexSwapBody,
    FdcRequestBody, LiquidityBody, PreparedTxResponse, QuoteBody, QuoteResponse, TokenList, TradeBody,
    TradeResponse, WalletConnectBody,
};
use crate::wallet::{WalletConfig, WalletStatus};

/// Chat messages returned by `/api/chat/history`.
const CHAT_HISTORY_LIMIT: usize = 20;

/// Connection limiter to prevent too many concurrent WebSocket connections.
pub struct ConnectionLimiter {
    current: AtomicUsize,
    max: usize,
}

impl ConnectionLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            max,
        }
    }

    /// Reserve a slot; the slot is released when the guard drops.
    pub fn try_acquire(self: &Arc<Self>) -> Option<ConnectionGuard> {
        loop {
            let current = self.current.load(Ordering::Acquire);
            if current >= self.max {
                return None;
            }
            if self
                .current
                .compare_exchange(current, current + 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                Metrics::ws_client_opened();
                return Some(ConnectionGuard {
                    limiter: Arc::clone(self),
                });
            }
        }
    }

    pub fn current_count(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }
}

pub struct ConnectionGuard {
    limiter: Arc<ConnectionLimiter>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.limiter.current.fetch_sub(1, Ordering::Release);
        Metrics::ws_client_closed();
    }
}

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    dashboard: DashboardState,
    broadcast_tx: broadcast::Sender<String>,
    connection_limiter: Arc<ConnectionLimiter>,
    config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(
        dashboard: DashboardState,
        broadcast_tx: broadcast::Sender<String>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            dashboard,
            broadcast_tx,
            connection_limiter: Arc::new(ConnectionLimiter::new(config.max_connections)),
            config: Arc::new(config),
        }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(|| page(include_str!("../static/index.html"))))
        .route("/trading", get(|| page(include_str!("../static/trading.html"))))
        .route("/portfolio", get(|| page(include_str!("../static/portfolio.html"))))
        .route("/chat", get(|| page(include_str!("../static/chat.html"))))
        .route("/static/app.js", get(serve_script))
        // Ledger
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/tokens", get(get_tokens))
        .route("/api/refresh_prices", get(refresh_prices))
        .route("/api/price_data/{symbol}", get(get_price_data))
        .route("/api/execute_trade", post(execute_trade))
        // Chat
        .route("/api/chat", post(chat))
        .route("/api/chat/history", get(chat_history))
        // Bridge and onchain
        .route("/api/cross_chain_quote", post(cross_chain_quote))
        .route("/api/execute_cross_chain_swap", post(execute_cross_chain_swap))
        .route("/api/execute_dex_swap", post(execute_dex_swap))
        .route("/api/execute_cross_chain", post(execute_cross_chain))
        .route("/api/add_liquidity", post(add_liquidity))
        .route("/api/supported_chains", get(get_supported_chains))
        .route("/api/flare/feeds", get(get_flare_feeds))
        .route("/api/flare/attestation_types", get(get_attestation_types))
        .route("/api/flare/network_stats", get(get_network_stats))
        .route("/api/flare/token_info/{address}", get(get_token_info))
        .route("/api/flare/fdc_request", post(submit_fdc_request))
        // Wallet
        .route("/api/wallet/connect", post(wallet_connect))
        .route("/api/wallet/disconnect", post(wallet_disconnect))
        .route("/api/wallet/status", get(wallet_status))
        .route("/api/wallet/config", get(wallet_config))
        // Streams and metrics
        .route("/ws", get(ws_handler))
        .route("/metrics", get(get_metrics))
        .layer(middleware::from_fn_with_state(state.clone(), require_basic_auth))
        .with_state(state)
}

async fn page(html: &'static str) -> Html<&'static str> {
    Html(html)
}

async fn serve_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        include_str!("../static/app.js"),
    )
}

// -------------------------------------------------------------------------
// Ledger
// -------------------------------------------------------------------------

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.collect_snapshot())
}

async fn get_portfolio(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.ledger().portfolio_summary())
}

async fn get_tokens(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.ledger().tokens())
}

async fn refresh_prices(State(state): State<AppState>) -> Json<TokenList> {
    let updated = state.dashboard.refresh_prices().await;
    debug!(updated, "Prices refreshed on request");
    Json(TokenList {
        tokens: state.dashboard.token_quotes(),
    })
}

async fn get_price_data(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
    let history = Symbol::new(&symbol).ok().and_then(|s| {
        state
            .dashboard
            .ledger()
            .price_history(&s, &mut rand::thread_rng())
            .ok()
    });
    match history {
        Some(history) => Json(history).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Token not found" }))).into_response(),
    }
}

async fn execute_trade(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TradeBody>,
) -> DashboardResult<Json<TradeResponse>> {
    let outcome = state.dashboard.execute_trade(&body)?;
    Ok(Json(TradeResponse {
        success: true,
        message: outcome.message,
        trade: Some(outcome.trade),
    }))
}

// -------------------------------------------------------------------------
// Chat
// -------------------------------------------------------------------------

async fn chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatBody>,
) -> DashboardResult<Json<ChatResponse>> {
    match state.dashboard.chat(&body.message) {
        Ok(reply) => Ok(Json(ChatResponse {
            response: reply.response,
            trade_executed: reply.trade_executed.is_some(),
            trade_info: reply.trade_executed,
        })),
        Err(DashboardError::Chat(e @ ChatError::EmptyMessage)) => Ok(Json(ChatResponse {
            response: e.to_string(),
            trade_executed: false,
            trade_info: None,
        })),
        Err(e) => Err(e),
    }
}

async fn chat_history(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.ledger().recent_chats(CHAT_HISTORY_LIMIT))
}

// -------------------------------------------------------------------------
// Bridge and onchain
// -------------------------------------------------------------------------

async fn cross_chain_quote(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<QuoteBody>,
) -> DashboardResult<Json<QuoteResponse>> {
    let quote = state.dashboard.quote(&body)?;
    Ok(Json(QuoteResponse {
        success: true,
        quote,
    }))
}

async fn execute_cross_chain_swap(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<QuoteBody>,
) -> DashboardResult<Json<TradeResponse>> {
    let (quote, record) = state.dashboard.submit_cross_chain(&body)?;
    let message = format!(
        "Cross-chain swap initiated: {} {} on {} → {} {} on {} (est. {})",
        quote.amount_in,
        quote.from_token,
        quote.from_chain.display_name(),
        quote.amount_out,
        quote.to_token,
        quote.to_chain.display_name(),
        quote.estimated_time,
    );
    Ok(Json(TradeResponse {
        success: true,
        message,
        trade: Some(record),
    }))
}

fn prepared(tx: PreparedTx) -> Json<PreparedTxResponse> {
    Json(PreparedTxResponse {
        success: true,
        message: tx.summary.clone(),
        transaction: tx,
    })
}

async fn execute_dex_swap(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DexSwapBody>,
) -> DashboardResult<Json<PreparedTxResponse>> {
    Ok(prepared(state.dashboard.prepare_dex_swap(&body).await?))
}

async fn execute_cross_chain(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CrossChainBody>,
) -> DashboardResult<Json<PreparedTxResponse>> {
    Ok(prepared(state.dashboard.prepare_cross_chain(&body).await?))
}

async fn add_liquidity(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LiquidityBody>,
) -> DashboardResult<Json<PreparedTxResponse>> {
    Ok(prepared(state.dashboard.prepare_add_liquidity(&body).await?))
}

async fn get_supported_chains(State(state): State<AppState>) -> impl IntoResponse {
    let connected = state.dashboard.flare_connected().await;
    Json(json!({
        "success": true,
        "chains": supported_chains(connected),
    }))
}

fn flare_api(state: &AppState) -> DashboardResult<&FlareApiClient> {
    state
        .dashboard
        .flare_api()
        .ok_or(DashboardError::ChainUnavailable)
}

async fn get_flare_feeds(State(state): State<AppState>) -> DashboardResult<Json<Value>> {
    Ok(Json(flare_api(&state)?.ftso_feed_data(&[]).await?))
}

async fn get_attestation_types(State(state): State<AppState>) -> DashboardResult<Json<Value>> {
    let types = flare_api(&state)?.attestation_types();
    Ok(Json(json!({ "attestation_types": types })))
}

async fn get_network_stats(State(state): State<AppState>) -> DashboardResult<Json<Value>> {
    Ok(Json(flare_api(&state)?.network_stats().await?))
}

async fn get_token_info(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> DashboardResult<Json<Value>> {
    if !validate_address(&address) {
        return Err(DashboardError::InvalidRequest(format!(
            "Invalid token address: {address}"
        )));
    }
    Ok(Json(flare_api(&state)?.token_info(&address).await?))
}

async fn submit_fdc_request(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<FdcRequestBody>,
) -> DashboardResult<Json<Value>> {
    let client = flare_api(&state)?;
    Ok(Json(
        client
            .submit_fdc_request(&body.attestation_type, &body.request_data)
            .await?,
    ))
}

// -------------------------------------------------------------------------
// Wallet
// -------------------------------------------------------------------------

async fn wallet_connect(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<WalletConnectBody>,
) -> DashboardResult<Json<Ack>> {
    state.dashboard.wallet().connect(&body.address, body.chain_id)?;

    // Holdings follow the real wallet only when onchain services are wired.
    match state.dashboard.sync_wallet_holdings().await {
        Ok(read) => debug!(read, "Wallet balances read"),
        Err(DashboardError::ChainUnavailable) => {}
        Err(e) => warn!(error = %e, "Wallet balance sync failed"),
    }
    Ok(Json(Ack::ok("Wallet connected")))
}

async fn wallet_disconnect(State(state): State<AppState>) -> Json<Ack> {
    state.dashboard.wallet().disconnect();
    Json(Ack::ok("Wallet disconnected"))
}

async fn wallet_status(State(state): State<AppState>) -> Json<WalletStatus> {
    Json(state.dashboard.wallet().status())
}

async fn wallet_config(State(state): State<AppState>) -> Json<WalletConfig> {
    Json(WalletConfig::from_dashboard(&state.config))
}

// -------------------------------------------------------------------------
// WebSocket and metrics
// -------------------------------------------------------------------------

async fn get_metrics() -> Response {
    match Metrics::render() {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// WebSocket upgrade handler.
async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let Some(guard) = state.connection_limiter.try_acquire() else {
        warn!(
            current = state.connection_limiter.current_count(),
            max = state.config.max_connections,
            "WebSocket connection limit reached"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections").into_response();
    };

    info!(
        connections = state.connection_limiter.current_count(),
        "New WebSocket connection"
    );
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state, guard))
}

/// Handle a WebSocket connection.
async fn handle_ws_connection(socket: WebSocket, state: AppState, _guard: ConnectionGuard) {
    let (mut sender, mut receiver) = socket.split();
    let mut broadcast_rx = state.broadcast_tx.subscribe();

    let initial = DashboardMessage::Snapshot(state.dashboard.collect_snapshot());
    if let Ok(json) = serde_json::to_string(&initial) {
        if sender.send(Message::Text(json.into())).await.is_err() {
            debug!("Failed to send initial snapshot, client disconnected");
            return;
        }
    }

    // Drain client frames so close is noticed; pings are answered by axum.
    let mut incoming_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "WebSocket receive error");
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            result = broadcast_rx.recv() => {
                match result {
                    Ok(msg) => {
                        if sender.send(Message::Text(msg.into())).await.is_err() {
                            debug!("Failed to send message, client disconnected");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "WebSocket client lagged, catching up");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed");
                        break;
                    }
                }
            }
            _ = &mut incoming_task => {
                debug!("Incoming task completed, closing connection");
                break;
            }
        }
    }

    incoming_task.abort();
    info!("WebSocket connection closed");
}

// -------------------------------------------------------------------------
// Basic auth
// -------------------------------------------------------------------------

async fn require_basic_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.config.auth_enabled() && !check_basic_auth(request.headers(), &state.config) {
        return unauthorized_response();
    }
    next.run(request).await
}

/// Check basic authentication.
fn check_basic_auth(headers: &HeaderMap, config: &DashboardConfig) -> bool {
    let Some(encoded) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Basic "))
    else {
        return false;
    };

    let Some(decoded) = BASE64
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
    else {
        return false;
    };

    decoded == format!("{}:{}", config.username, config.password)
}

/// Create an unauthorized response.
fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"Flare Trading\"")],
        "Unauthorized",
    )
        .into_response()
}

/// Run the dashboard HTTP server until `shutdown` resolves.
pub async fn run_server(
    dashboard: DashboardState,
    config: DashboardConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> DashboardResult<()> {
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| DashboardError::Bind {
            addr: addr.clone(),
            source,
        })?;

    // 16 messages of backlog per client.
    let (broadcast_tx, _) = broadcast::channel::<String>(16);
    let broadcaster = tokio::spawn(crate::broadcast::run_broadcaster(
        dashboard.clone(),
        broadcast_tx.clone(),
        config.update_interval_ms,
    ));

    let app = create_router(AppState::new(dashboard, broadcast_tx, config));
    info!(%addr, "Starting dashboard server");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(DashboardError::Serve);
    broadcaster.abort();
    result
}
