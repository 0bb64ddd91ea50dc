//! Amount arithmetic and formatting.
//!
//! Order amounts travel as integer minor units (fen for CNY) and are stored
//! and compared as decimal strings with exactly two fractional digits.
//!
//! Settlement amounts reported by the provider's query API go through
//! [`parse_settled_amount`], which keeps a legacy truncation rule:
//!
//! | Input        | Result | Why                                      |
//! |--------------|--------|------------------------------------------|
//! | `"10.00"`    | 10     | fraction dropped                         |
//! | `"10.99"`    | 10     | truncated, never rounded                 |
//! | `"12abc"`    | 12     | parsing stops at the first non-digit     |
//! | `"1e3"`      | 1      | scientific notation is not interpreted   |
//! | `"-5"`       | 0      | a sign is a non-digit                    |
//! | `""`         | 0      | nothing to parse                         |

/// Smallest order accepted, in CNY minor units (5.00 CNY).
pub const MIN_ORDER_AMOUNT_FEN: i64 = 500;

/// Formats integer minor units as a major-unit decimal with two fractional digits.
///
/// `1000` becomes `"10.00"`, `5` becomes `"0.05"`.
pub fn format_major(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Converts CNY major units returned by a conversion lookup into minor units,
/// rounding half up.
pub fn cny_minor_from_major(major: f64) -> i64 {
    (major * 100.0 + 0.5).floor() as i64
}

/// Parses a provider settlement amount, truncating at the decimal point.
///
/// Everything from the first `.` on is discarded, then leading ASCII digits
/// are accumulated until the first non-digit. Values too large for `u64`
/// saturate instead of wrapping.
pub fn parse_settled_amount(raw: &str) -> u64 {
    let integral = raw.split('.').next().unwrap_or_default();
    integral
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

/// Normalizes a callback-reported major amount to the ledger's two-decimal form.
///
/// Accepts plain decimals with at most two fractional digits (`"10"`,
/// `"10.5"`, `"10.00"`). Signs, exponents, and extra precision such as
/// `"10.004"` return `None`.
pub fn normalize_major(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (whole, frac) = raw.split_once('.').unwrap_or((raw, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits_only(whole) || !digits_only(frac) || frac.len() > 2 {
        return None;
    }
    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    Some(format!("{}.{:0<2}", whole, frac))
}
