//! WebSocket broadcast functionality.
//!
//! The broadcaster reads the ledger's price table at a fixed interval and
//! pushes it to every connected WebSocket client. Price fetching itself runs
//! elsewhere; this task only publishes what the ledger currently holds.

use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::state::DashboardState;

/// Run the broadcaster task.
pub async fn run_broadcaster(state: DashboardState, tx: broadcast::Sender<String>, interval_ms: u64) {
    let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(100)));

    loop {
        interval.tick().await;

        if tx.receiver_count() == 0 {
            continue;
        }

        match serde_json::to_string(&state.price_message()) {
            Ok(json) => match tx.send(json) {
                Ok(n) => trace!(receivers = n, "Price update sent"),
                Err(_) => trace!("No WebSocket receivers connected"),
            },
            Err(e) => debug!(error = %e, "Failed to serialize price update"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_feed::PriceAggregator;
    use flare_ledger::Ledger;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_broadcaster_publishes_prices() {
        let state = DashboardState::new(Ledger::seeded(), Arc::new(PriceAggregator::new(vec![])));
        let (tx, mut rx) = broadcast::channel::<String>(4);

        let task = tokio::spawn(run_broadcaster(state, tx, 100));
        let msg = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        task.abort();

        let value: serde_json::Value = serde_json::from_str(&msg).unwrap();
        assert_eq!(value["type"], "prices");
        assert_eq!(value["tokens"].as_array().unwrap().len(), 7);
    }
}
