use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV observation for a trading pair.
///
/// Prices are taken as reported by the exchange. The usual
/// `high >= max(open, close)` and `low <= min(open, close)` relationships are
/// not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Trading pair this candle belongs to (e.g., BTC-USDT)
    pub symbol: String,
    /// Start of the candle period, whole-second resolution
    pub time: DateTime<Utc>,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    /// Traded quantity in the base asset
    pub volume: f64,
}
