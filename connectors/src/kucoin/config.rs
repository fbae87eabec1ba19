use common::{Error, Result};

pub const KUCOIN_API_URL: &str = "https://api.kucoin.com";

/// API credentials for the private endpoints
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub api_passphrase: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("api_passphrase", &"<redacted>")
            .finish()
    }
}

/// Configuration for a KuCoin connector
#[derive(Debug, Clone)]
pub struct KucoinConfig {
    /// REST endpoint, without a trailing slash
    pub base_url: String,
    /// Only needed for account and order endpoints
    pub credentials: Option<Credentials>,
}

impl Default for KucoinConfig {
    fn default() -> Self {
        Self {
            base_url: KUCOIN_API_URL.to_string(),
            credentials: None,
        }
    }
}

impl KucoinConfig {
    /// Create a configuration from environment variables.
    ///
    /// `KUCOIN_BASE_URL` overrides the endpoint. `API_KEY`, `API_SECRET` and
    /// `API_PASSPHRASE` must be set together or not at all.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("KUCOIN_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| KUCOIN_API_URL.to_string());

        let credentials = match (lookup("API_KEY"), lookup("API_SECRET"), lookup("API_PASSPHRASE")) {
            (Some(api_key), Some(api_secret), Some(api_passphrase)) => Some(Credentials {
                api_key,
                api_secret,
                api_passphrase,
            }),
            (None, None, None) => None,
            _ => {
                return Err(Error::ConfigError(
                    "API_KEY, API_SECRET and API_PASSPHRASE must be set together".to_string(),
                ))
            }
        };

        Ok(Self {
            base_url,
            credentials,
        })
    }
}
