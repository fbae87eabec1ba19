use crate::config::ApiConfig;
use chrono::{DateTime, Utc};
use common::{
    models::{Account, Candle, Position},
    Error, Result,
};
use connectors::{Broker, CandleSource};
use std::sync::Arc;
use tracing::debug;

/// Service exposing exchange market data and account state
pub struct CandleService {
    /// Historical candle source
    candles: Arc<dyn CandleSource>,
    /// Account and order access
    broker: Arc<dyn Broker>,
    default_period: String,
    default_limit: usize,
}

impl CandleService {
    pub fn new(candles: Arc<dyn CandleSource>, broker: Arc<dyn Broker>, config: &ApiConfig) -> Self {
        Self {
            candles,
            broker,
            default_period: config.default_period.clone(),
            default_limit: config.default_limit,
        }
    }

    /// Get candles for a pair, either over a time range or as the most recent `limit`
    pub async fn fetch_candles(
        &self,
        pair: &str,
        period: Option<&str>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<Candle>> {
        let pair = pair.to_uppercase();
        let period = period.unwrap_or(self.default_period.as_str());

        match (start, end) {
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(Error::ParseError(format!(
                        "start {} is after end {}",
                        start, end
                    )));
                }

                debug!("Getting {} candles for {} from {} to {}", period, pair, start, end);
                self.candles.candles_by_period(&pair, period, start, end).await
            }
            (None, None) => {
                let limit = limit.unwrap_or(self.default_limit);
                debug!("Getting last {} {} candles for {}", limit, period, pair);
                self.candles.candles_by_limit(&pair, period, limit).await
            }
            _ => Err(Error::ParseError(
                "start and end must be given together".to_string(),
            )),
        }
    }

    pub async fn account(&self) -> Result<Account> {
        self.broker.account().await
    }

    pub async fn position(&self, pair: &str) -> Result<Position> {
        self.broker.position(&pair.to_uppercase()).await
    }
}
