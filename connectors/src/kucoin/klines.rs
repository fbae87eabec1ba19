use super::response::ApiResponse;
use chrono::{DateTime, Utc};
use common::{models::Candle, Error, Result};
use std::str::FromStr;

/// One row of `/api/v1/market/candles`:
/// [time, open, close, high, low, volume, turnover]
pub type KlineRow = [String; 7];

const FIELDS: [&str; 6] = ["time", "open", "close", "high", "low", "volume"];

/// Convert a KuCoin kline response into candles for `symbol`.
///
/// Rows keep the order the exchange sent them in. The first malformed field
/// fails the whole response; no partial result is returned. `"data": null`
/// reads as no rows.
pub fn parse_klines(response: &ApiResponse, symbol: &str) -> Result<Vec<Candle>> {
    response.check()?;
    let rows: Vec<KlineRow> = response.read_data::<Option<Vec<KlineRow>>>()?.unwrap_or_default();

    rows.iter()
        .enumerate()
        .map(|(row, kline)| parse_row(row, kline, symbol))
        .collect()
}

fn parse_row(row: usize, kline: &KlineRow, symbol: &str) -> Result<Candle> {
    let seconds: i64 = parse_field(row, 0, &kline[0])?;
    let time = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(|| Error::FieldParseError {
        row,
        field: FIELDS[0],
        value: kline[0].clone(),
        reason: "timestamp out of range".to_string(),
    })?;

    // kline[6] is turnover, not carried into the candle
    Ok(Candle {
        symbol: symbol.to_string(),
        time,
        open: parse_field(row, 1, &kline[1])?,
        close: parse_field(row, 2, &kline[2])?,
        high: parse_field(row, 3, &kline[3])?,
        low: parse_field(row, 4, &kline[4])?,
        volume: parse_field(row, 5, &kline[5])?,
    })
}

fn parse_field<T>(row: usize, column: usize, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| Error::FieldParseError {
        row,
        field: FIELDS[column],
        value: value.to_string(),
        reason: e.to_string(),
    })
}
