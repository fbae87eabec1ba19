use super::response::ApiResponse;
use async_trait::async_trait;
use common::{Error, Result};
use tracing::{debug, error};

/// Raw access to KuCoin's kline endpoint
#[async_trait]
pub trait KlineApi: Send + Sync {
    /// Query klines of KuCoin candle type `kind` (e.g. "1min", "1day").
    /// `start_at` and `end_at` are Unix seconds; 0 leaves the bound open.
    async fn klines(&self, symbol: &str, kind: &str, start_at: i64, end_at: i64)
        -> Result<ApiResponse>;
}

/// HTTP client for KuCoin's public REST API
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("Fetching {} from KuCoin with {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(Error::HttpError)?;

        let status = response.status();
        let body = response.bytes().await.map_err(Error::HttpError)?;

        decode_body(status, &body)
    }
}

/// Map an HTTP status and body to the KuCoin envelope or the matching error
fn decode_body(status: reqwest::StatusCode, body: &[u8]) -> Result<ApiResponse> {
    if !status.is_success() {
        let error_text = String::from_utf8_lossy(body);
        error!("KuCoin API error: {} - {}", status, error_text);
        return Err(Error::ExchangeError(format!(
            "KuCoin API error: {} - {}",
            status, error_text
        )));
    }

    let response = ApiResponse::from_slice(body)?;

    if let Err(e) = response.check() {
        error!("KuCoin rejected request: {}", e);
        return Err(e);
    }

    Ok(response)
}

fn kline_params(symbol: &str, kind: &str, start_at: i64, end_at: i64) -> Vec<(&'static str, String)> {
    let mut params = vec![("symbol", symbol.to_string()), ("type", kind.to_string())];

    if start_at != 0 {
        params.push(("startAt", start_at.to_string()));
    }

    if end_at != 0 {
        params.push(("endAt", end_at.to_string()));
    }

    params
}

#[async_trait]
impl KlineApi for RestClient {
    async fn klines(
        &self,
        symbol: &str,
        kind: &str,
        start_at: i64,
        end_at: i64,
    ) -> Result<ApiResponse> {
        let params = kline_params(symbol, kind, start_at, end_at);
        self.get("/api/v1/market/candles", &params).await
    }
}
