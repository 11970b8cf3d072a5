//! Text formatting for brief values.

/// Literal shown in place of any value that could not be fetched.
pub const UNAVAILABLE: &str = "N/A";

const RISING: &str = "🟢";
const FALLING: &str = "🔴";

/// `$1,234.56`-style amount with thousands separators.
pub fn usd(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$}");
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("${sign}{grouped}.{fraction}"),
        None => format!("${sign}{grouped}"),
    }
}

/// `usd` or the unavailable marker.
pub fn usd_or_unavailable(value: Option<f64>, digits: usize) -> String {
    finite(value).map_or_else(|| UNAVAILABLE.to_owned(), |v| usd(v, digits))
}

/// Signed percentage with two decimals, e.g. `+1.25%`.
pub fn signed_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

pub fn signed_percent_or_unavailable(value: Option<f64>) -> String {
    finite(value).map_or_else(|| UNAVAILABLE.to_owned(), signed_percent)
}

/// Direction of a 24h change. A missing change reads as flat, i.e. rising.
pub fn direction_marker(change: Option<f64>) -> &'static str {
    if finite(change).unwrap_or(0.0) >= 0.0 {
        RISING
    } else {
        FALLING
    }
}

/// Marker for values shown without a direction of their own.
pub const fn neutral_marker() -> &'static str {
    RISING
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
