pub mod kucoin;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    models::{Account, Candle, Order, Position, Side},
    Error, Result,
};
use tokio::sync::mpsc;

/// Historical candle retrieval from an exchange
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Get candles for `pair` between `start` and `end`
    async fn candles_by_period(
        &self,
        pair: &str,
        period: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>>;

    /// Get at most `limit` of the most recent candles for `pair`
    async fn candles_by_limit(&self, pair: &str, period: &str, limit: usize) -> Result<Vec<Candle>>;
}

/// Account and order management on an exchange
#[async_trait]
pub trait Broker: Send + Sync {
    async fn account(&self) -> Result<Account>;

    async fn position(&self, symbol: &str) -> Result<Position>;

    async fn order(&self, symbol: &str, id: i64) -> Result<Order>;

    /// Place a one-cancels-the-other pair: a limit order at `price` and a
    /// stop-limit order triggered at `stop`
    async fn order_oco(
        &self,
        side: Side,
        symbol: &str,
        size: f64,
        price: f64,
        stop: f64,
        stop_limit: f64,
    ) -> Result<Vec<Order>>;

    async fn order_limit(&self, side: Side, symbol: &str, size: f64, limit: f64) -> Result<Order>;

    async fn order_market(&self, side: Side, symbol: &str, size: f64) -> Result<Order>;

    async fn cancel(&self, order: &Order) -> Result<()>;
}

/// Receiving ends of a live candle subscription. Both channels close together
/// when the subscription ends.
pub type CandleStream = (mpsc::Receiver<Candle>, mpsc::Receiver<Error>);

/// Live candle updates
pub trait CandleFeed: Send + Sync {
    fn candles_subscription(&self, pair: &str, period: &str) -> Result<CandleStream>;
}
