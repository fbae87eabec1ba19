/// Convert a short period code (1m, 4h, 1d, 1w) to KuCoin's candle type
/// (1min, 4hour, 1day, 1week). Anything else is passed through as is and left
/// for the exchange to reject.
pub fn translate_period(period: &str) -> String {
    let suffix = match period.chars().last() {
        Some('w') => "eek",
        Some('d') => "ay",
        Some('h') => "our",
        Some('m') => "in",
        _ => return period.to_string(),
    };

    format!("{}{}", period, suffix)
}
