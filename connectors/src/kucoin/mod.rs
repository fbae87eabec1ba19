mod config;
mod klines;
mod period;
mod response;
mod rest;

pub use config::{Credentials, KucoinConfig, KUCOIN_API_URL};
pub use klines::{parse_klines, KlineRow};
pub use period::translate_period;
pub use response::{ApiResponse, SUCCESS_CODE};
pub use rest::{KlineApi, RestClient};

use crate::{Broker, CandleFeed, CandleSource, CandleStream};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{
    models::{Account, Candle, Order, Position, Side},
    Error, Result,
};
use tracing::{debug, warn};

/// KuCoin spot connector.
///
/// Only candle retrieval is backed by the exchange. The trading surface
/// reports [`Error::NotImplemented`].
pub struct KucoinConnector {
    api: Box<dyn KlineApi>,
    config: KucoinConfig,
}

impl KucoinConnector {
    pub fn new(config: KucoinConfig) -> Self {
        Self {
            api: Box::new(RestClient::new(config.base_url.clone())),
            config,
        }
    }

    /// Use `api` instead of the REST client for kline queries
    pub fn with_api(api: impl KlineApi + 'static) -> Self {
        Self {
            api: Box::new(api),
            config: KucoinConfig::default(),
        }
    }

    pub fn config(&self) -> &KucoinConfig {
        &self.config
    }

    async fn fetch(&self, pair: &str, period: &str, start_at: i64, end_at: i64) -> Result<Vec<Candle>> {
        let kind = translate_period(period);

        debug!(
            "Fetching KuCoin klines for {} (type: {}, start: {}, end: {})",
            pair, kind, start_at, end_at
        );

        let response = self.api.klines(pair, &kind, start_at, end_at).await?;
        let candles = parse_klines(&response, pair)?;

        debug!("Parsed {} candles for {}", candles.len(), pair);

        Ok(candles)
    }

    fn unsupported(&self, operation: &'static str) -> Error {
        warn!("KuCoin {} requested but not implemented", operation);
        Error::NotImplemented(operation)
    }
}

#[async_trait]
impl CandleSource for KucoinConnector {
    async fn candles_by_period(
        &self,
        pair: &str,
        period: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>> {
        let (start_at, end_at) = (start.timestamp(), end.timestamp());

        // KuCoin reads a 0 bound as open
        if start_at <= 0 || end_at <= 0 {
            return Err(Error::ParseError(format!(
                "candle range {} - {} starts before the Unix epoch",
                start, end
            )));
        }

        self.fetch(pair, period, start_at, end_at).await
    }

    async fn candles_by_limit(&self, pair: &str, period: &str, limit: usize) -> Result<Vec<Candle>> {
        // KuCoin has no count parameter. Ask for the default window, which
        // arrives newest first, and keep the head.
        let mut candles = self.fetch(pair, period, 0, 0).await?;
        candles.truncate(limit);
        Ok(candles)
    }
}

#[async_trait]
impl Broker for KucoinConnector {
    async fn account(&self) -> Result<Account> {
        Err(self.unsupported("account"))
    }

    async fn position(&self, _symbol: &str) -> Result<Position> {
        Err(self.unsupported("position"))
    }

    async fn order(&self, _symbol: &str, _id: i64) -> Result<Order> {
        Err(self.unsupported("order lookup"))
    }

    async fn order_oco(
        &self,
        _side: Side,
        _symbol: &str,
        _size: f64,
        _price: f64,
        _stop: f64,
        _stop_limit: f64,
    ) -> Result<Vec<Order>> {
        Err(self.unsupported("OCO order"))
    }

    async fn order_limit(&self, _side: Side, _symbol: &str, _size: f64, _limit: f64) -> Result<Order> {
        Err(self.unsupported("limit order"))
    }

    async fn order_market(&self, _side: Side, _symbol: &str, _size: f64) -> Result<Order> {
        Err(self.unsupported("market order"))
    }

    async fn cancel(&self, _order: &Order) -> Result<()> {
        Err(self.unsupported("order cancellation"))
    }
}

impl CandleFeed for KucoinConnector {
    fn candles_subscription(&self, _pair: &str, _period: &str) -> Result<CandleStream> {
        Err(self.unsupported("candle subscription"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::{OrderStatus, OrderType};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    type Call = (String, String, i64, i64);

    /// Records every query and answers with a fixed response
    #[derive(Clone)]
    struct FakeApi {
        calls: Arc<Mutex<Vec<Call>>>,
        response: std::result::Result<ApiResponse, String>,
    }

    impl FakeApi {
        fn returning(data: serde_json::Value) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                response: Ok(ApiResponse::ok(data)),
            }
        }

        fn answering(response: ApiResponse) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                response: Ok(response),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                response: Err(message.to_string()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KlineApi for FakeApi {
        async fn klines(
            &self,
            symbol: &str,
            kind: &str,
            start_at: i64,
            end_at: i64,
        ) -> Result<ApiResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((symbol.to_string(), kind.to_string(), start_at, end_at));

            self.response.clone().map_err(Error::ExchangeError)
        }
    }

    fn rows() -> serde_json::Value {
        json!([
            ["1609466400", "3", "3", "3", "3", "3", "3"],
            ["1609462800", "2", "2", "2", "2", "2", "2"],
            ["1609459200", "1", "1", "1", "1", "1", "1"],
        ])
    }

    #[tokio::test]
    async fn by_period_sends_translated_type_and_bounds() {
        let api = FakeApi::returning(rows());
        let connector = KucoinConnector::with_api(api.clone());
        let start = DateTime::from_timestamp(1609459200, 0).unwrap();
        let end = DateTime::from_timestamp(1609466400, 0).unwrap();

        let candles = connector
            .candles_by_period("BTC-USDT", "1h", start, end)
            .await
            .unwrap();

        assert_eq!(candles.len(), 3);
        assert!(candles.iter().all(|c| c.symbol == "BTC-USDT"));
        assert_eq!(
            api.calls(),
            vec![(
                "BTC-USDT".to_string(),
                "1hour".to_string(),
                1609459200,
                1609466400
            )]
        );
    }

    #[tokio::test]
    async fn by_limit_queries_default_window_and_keeps_head() {
        let api = FakeApi::returning(rows());
        let connector = KucoinConnector::with_api(api.clone());

        let candles = connector.candles_by_limit("ETH-USDT", "1d", 2).await.unwrap();

        assert_eq!(api.calls(), vec![("ETH-USDT".to_string(), "1day".to_string(), 0, 0)]);
        let times: Vec<i64> = candles.iter().map(|c| c.time.timestamp()).collect();
        assert_eq!(times, vec![1609466400, 1609462800]);
    }

    #[tokio::test]
    async fn by_limit_larger_than_window_returns_everything() {
        let api = FakeApi::returning(rows());
        let connector = KucoinConnector::with_api(api.clone());

        let candles = connector.candles_by_limit("ETH-USDT", "1w", 500).await.unwrap();

        assert_eq!(candles.len(), 3);
        assert_eq!(api.calls()[0].1, "1week");
        assert_eq!((api.calls()[0].2, api.calls()[0].3), (0, 0));
    }

    #[tokio::test]
    async fn remote_error_is_propagated_unchanged() {
        let connector = KucoinConnector::with_api(FakeApi::failing("400100 - Unsupported type"));

        let err = connector.candles_by_limit("BTC-USDT", "7x", 10).await.unwrap_err();

        match err {
            Error::ExchangeError(msg) => assert_eq!(msg, "400100 - Unsupported type"),
            other => panic!("expected exchange error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rejected_envelope_from_any_api_is_exchange_error() {
        let response =
            ApiResponse::from_slice(br#"{"code":"400100","msg":"Unsupported type"}"#).unwrap();
        let connector = KucoinConnector::with_api(FakeApi::answering(response));

        let err = connector.candles_by_limit("BTC-USDT", "1m", 10).await.unwrap_err();

        assert!(matches!(err, Error::ExchangeError(_)));
    }

    #[tokio::test]
    async fn range_before_epoch_is_rejected_without_a_query() {
        let api = FakeApi::returning(rows());
        let connector = KucoinConnector::with_api(api.clone());
        let start = DateTime::from_timestamp(-86400, 0).unwrap();
        let end = DateTime::from_timestamp(1609459200, 0).unwrap();

        let result = connector.candles_by_period("BTC-USDT", "1d", start, end).await;

        assert!(matches!(result, Err(Error::ParseError(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn parse_error_yields_no_candles() {
        let api = FakeApi::returning(json!([
            ["1609459200", "1", "1", "1", "1", "1", "1"],
            ["1609462800", "2", "oops", "2", "2", "2", "2"],
        ]));
        let connector = KucoinConnector::with_api(api);
        let start = DateTime::from_timestamp(1609459200, 0).unwrap();

        let result = connector
            .candles_by_period("BTC-USDT", "1h", start, start)
            .await;

        assert!(matches!(
            result,
            Err(Error::FieldParseError { row: 1, field: "close", .. })
        ));
    }

    #[tokio::test]
    async fn trading_surface_is_not_implemented() {
        let connector = KucoinConnector::with_api(FakeApi::returning(json!([])));
        let now = Utc::now();
        let order = Order {
            id: 1,
            exchange_id: "5bd6e9286d99522a52e458de".to_string(),
            symbol: "BTC-USDT".to_string(),
            side: Side::Buy,
            order_type: OrderType::Limit,
            status: OrderStatus::New,
            price: 30000.0,
            quantity: 0.1,
            created_at: now,
            updated_at: now,
            stop: None,
            group_id: None,
        };

        assert!(matches!(connector.account().await, Err(Error::NotImplemented(_))));
        assert!(matches!(connector.position("BTC-USDT").await, Err(Error::NotImplemented(_))));
        assert!(matches!(connector.order("BTC-USDT", 1).await, Err(Error::NotImplemented(_))));
        assert!(matches!(
            connector
                .order_oco(Side::Sell, "BTC-USDT", 0.1, 32000.0, 29000.0, 28900.0)
                .await,
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(
            connector.order_limit(Side::Buy, "BTC-USDT", 0.1, 30000.0).await,
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(
            connector.order_market(Side::Buy, "BTC-USDT", 0.1).await,
            Err(Error::NotImplemented(_))
        ));
        assert!(matches!(connector.cancel(&order).await, Err(Error::NotImplemented(_))));
        assert!(matches!(
            connector.candles_subscription("BTC-USDT", "1m"),
            Err(Error::NotImplemented("candle subscription"))
        ));
    }

    #[test]
    fn new_keeps_config() {
        let config = KucoinConfig {
            base_url: "https://openapi-sandbox.kucoin.com".to_string(),
            credentials: None,
        };

        let connector = KucoinConnector::new(config);
        assert_eq!(connector.config().base_url, "https://openapi-sandbox.kucoin.com");
    }
}
