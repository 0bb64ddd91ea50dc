//! Supported order currencies and their minor-unit divisors.

use std::fmt;
use std::str::FromStr;

use super::errors::OrderError;

/// Currencies accepted on order creation.
///
/// Everything except [`Currency::Cny`] is converted to CNY before the
/// minimum-amount check and before the order is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Cny,
    Usd,
    Eur,
    Gbp,
    Jpy,
    Hkd,
    Sgd,
    Krw,
    Inr,
    Rub,
    Brl,
    Aud,
    Cad,
    Chf,
}

impl Currency {
    /// ISO 4217 code in upper case.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cny => "CNY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Hkd => "HKD",
            Currency::Sgd => "SGD",
            Currency::Krw => "KRW",
            Currency::Inr => "INR",
            Currency::Rub => "RUB",
            Currency::Brl => "BRL",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
        }
    }

    /// Number of minor units in one major unit.
    pub fn minor_unit_divisor(&self) -> u32 {
        match self {
            Currency::Jpy | Currency::Krw => 1,
            _ => 100,
        }
    }

    /// Converts an amount in this currency's minor units to major units.
    pub fn to_major(&self, minor: i64) -> f64 {
        minor as f64 / f64::from(self.minor_unit_divisor())
    }

    pub fn is_cny(&self) -> bool {
        matches!(self, Currency::Cny)
    }
}

impl FromStr for Currency {
    type Err = OrderError;

    /// Parses a currency code case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let currency = match s.trim().to_ascii_uppercase().as_str() {
            "CNY" => Currency::Cny,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "JPY" => Currency::Jpy,
            "HKD" => Currency::Hkd,
            "SGD" => Currency::Sgd,
            "KRW" => Currency::Krw,
            "INR" => Currency::Inr,
            "RUB" => Currency::Rub,
            "BRL" => Currency::Brl,
            "AUD" => Currency::Aud,
            "CAD" => Currency::Cad,
            "CHF" => Currency::Chf,
            _ => return Err(OrderError::unsupported_currency(s)),
        };
        Ok(currency)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("cny".parse::<Currency>().unwrap(), Currency::Cny);
        assert_eq!("Usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("JPY".parse::<Currency>().unwrap(), Currency::Jpy);
    }

    #[test]
    fn unknown_code_is_unsupported() {
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert!(matches!(err, OrderError::UnsupportedCurrency(code) if code == "XYZ"));
    }

    #[test]
    fn empty_code_is_unsupported() {
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn zero_decimal_currencies_use_divisor_one() {
        assert_eq!(Currency::Jpy.minor_unit_divisor(), 1);
        assert_eq!(Currency::Krw.minor_unit_divisor(), 1);
        assert_eq!(Currency::Usd.minor_unit_divisor(), 100);
        assert_eq!(Currency::Cny.minor_unit_divisor(), 100);
    }

    #[test]
    fn to_major_divides_by_minor_units() {
        assert_eq!(Currency::Usd.to_major(1050), 10.5);
        assert_eq!(Currency::Jpy.to_major(1050), 1050.0);
    }

    #[test]
    fn display_uses_iso_code() {
        assert_eq!(Currency::Hkd.to_string(), "HKD");
        assert!(Currency::Cny.is_cny());
        assert!(!Currency::Eur.is_cny());
    }
}
