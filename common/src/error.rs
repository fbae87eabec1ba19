use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Exchange API error: {0}")]
    ExchangeError(String),

    #[error("Decoding error: {0}")]
    DecodeError(String),

    /// A single cell of a kline row could not be converted.
    #[error("Invalid {field} in row {row} ({value:?}): {reason}")]
    FieldParseError {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Parsing error: {0}")]
    ParseError(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
