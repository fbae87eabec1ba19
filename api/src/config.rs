use common::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Candle period served when a request does not name one
pub const DEFAULT_PERIOD: &str = "1h";
/// Number of candles returned when neither a time range nor a limit is given
pub const DEFAULT_LIMIT: usize = 100;

/// HTTP listener settings and request defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub addr: SocketAddr,
    pub default_period: String,
    pub default_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000),
            default_period: DEFAULT_PERIOD.to_string(),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Read `API_HOST`, `API_PORT`, `API_DEFAULT_PERIOD` and
    /// `API_DEFAULT_LIMIT`, falling back to [`ApiConfig::default`] for unset
    /// variables. A set but unparsable value is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host: IpAddr = parse_var(&lookup, "API_HOST")?.unwrap_or(defaults.addr.ip());
        let port: u16 = parse_var(&lookup, "API_PORT")?.unwrap_or(defaults.addr.port());
        let default_limit = parse_var(&lookup, "API_DEFAULT_LIMIT")?.unwrap_or(defaults.default_limit);
        let default_period = lookup("API_DEFAULT_PERIOD")
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.default_period);

        Ok(Self {
            addr: SocketAddr::new(host, port),
            default_period,
            default_limit,
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value
                .parse()
                .map_err(|e| Error::ConfigError(format!("{}={:?}: {}", name, value, e)))
        })
        .transpose()
}
