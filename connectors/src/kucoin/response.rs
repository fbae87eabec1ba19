use common::{Error, Result};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

/// Code KuCoin puts in the envelope of every successful response
pub const SUCCESS_CODE: &str = "200000";

/// KuCoin response envelope: `{"code": "...", "msg": "...", "data": ...}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    /// `None` when the field is absent, `Some(Value::Null)` for `"data": null`
    #[serde(default, deserialize_with = "present")]
    pub data: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl ApiResponse {
    /// Wrap an already successful payload
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            code: SUCCESS_CODE.to_string(),
            msg: None,
            data: Some(data),
        }
    }

    /// Decode a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| Error::DecodeError(format!("Failed to parse KuCoin response: {}", e)))
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Fail with [`Error::ExchangeError`] when KuCoin rejected the request.
    pub fn check(&self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }

        Err(Error::ExchangeError(format!(
            "KuCoin API error: {} - {}",
            self.code,
            self.msg.as_deref().unwrap_or_default()
        )))
    }

    /// Decode the `data` field into `T`.
    pub fn read_data<T: DeserializeOwned>(&self) -> Result<T> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| Error::DecodeError("response has no data field".to_string()))?;

        T::deserialize(data).map_err(|e| Error::DecodeError(e.to_string()))
    }
}
