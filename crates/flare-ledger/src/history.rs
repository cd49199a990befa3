//! Synthetic price series for the trading chart.

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone};
use rand::Rng;
use serde::Serialize;

use flare_core::Price;

/// Number of hourly points in a chart.
pub const HISTORY_POINTS: usize = 24;

/// Maximum fluctuation applied at the oldest point.
const MAX_SWING: f64 = 0.05;

/// Chart payload: `labels[i]` is the `HH:MM` time of `data[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub current_price: f64,
}

impl PriceHistory {
    /// Generate 24 hourly points ending at `now`, labelled in `now`'s zone.
    ///
    /// Point `i` is `current * (1 + u * i / 24)` with `u` uniform in ±5%,
    /// rounded to 6 decimal places.
    pub fn generate<Tz, R>(current: Price, now: DateTime<Tz>, rng: &mut R) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
        R: Rng,
    {
        let current_price = current.to_f64();
        let mut labels = Vec::with_capacity(HISTORY_POINTS);
        let mut data = Vec::with_capacity(HISTORY_POINTS);

        for i in 0..HISTORY_POINTS {
            let at = now.clone() - Duration::hours((HISTORY_POINTS - 1 - i) as i64);
            let change: f64 = rng.gen_range(-MAX_SWING..=MAX_SWING);
            let price = current_price * (1.0 + change * (i as f64 / HISTORY_POINTS as f64));

            labels.push(at.format("%H:%M").to_string());
            data.push((price * 1e6).round() / 1e6);
        }

        Self {
            labels,
            data,
            current_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    #[test]
    fn test_shape_and_labels() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let history = PriceHistory::generate(Price::new(dec!(2)), now, &mut rng);

        assert_eq!(history.labels.len(), 24);
        assert_eq!(history.data.len(), 24);
        assert_eq!(history.labels[23], "12:30");
        assert_eq!(history.labels[0], "13:30");
        assert_eq!(history.current_price, 2.0);
    }

    #[test]
    fn test_labels_follow_time_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = tokyo.with_ymd_and_hms(2024, 5, 1, 21, 30, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let history = PriceHistory::generate(Price::new(dec!(2)), now, &mut rng);

        assert_eq!(history.labels[23], "21:30");
        assert_eq!(history.labels[22], "20:30");
    }

    #[test]
    fn test_first_point_is_current_and_swing_bounded() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(42);
        let history = PriceHistory::generate(Price::new(dec!(100)), now, &mut rng);

        assert_eq!(history.data[0], 100.0);
        for p in &history.data {
            assert!(*p >= 95.0 && *p <= 105.0, "point {p} out of range");
        }
    }
}
