//! Currency Registry
//!
//! Static table of the currencies a transfer can be denominated in, plus
//! USD-base conversion between them. Rate *sourcing* is out of scope: the
//! table carries indicative rates only, and anything needing live rates
//! must inject its own.
//!
//! All amounts are `rust_decimal::Decimal`. The `decimals` field is the
//! authoritative fractional-digit count for parsing, comparison, and
//! display of amounts in that currency.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurrencyError {
    #[error("Unsupported currency: {0}")]
    Unsupported(String),
}

/// A registered currency.
///
/// `usd_rate` is the USD value of one unit of this currency (so USD itself
/// is 1). Conversion always goes through the USD base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub country: String,
    pub usd_rate: Decimal,
}

fn entry(
    code: &str,
    symbol: &str,
    name: &str,
    decimals: u32,
    country: &str,
    usd_rate: Decimal,
) -> (String, Currency) {
    (
        code.to_string(),
        Currency {
            code: code.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            country: country.to_string(),
            usd_rate,
        },
    )
}

static REGISTRY: Lazy<BTreeMap<String, Currency>> = Lazy::new(|| {
    BTreeMap::from([
        entry("USD", "$", "US Dollar", 2, "United States", Decimal::ONE),
        entry("EUR", "€", "Euro", 2, "European Union", Decimal::new(92, 2)),
        entry("GBP", "£", "British Pound", 2, "United Kingdom", Decimal::new(79, 2)),
        // JPY has no minor unit
        entry("JPY", "¥", "Japanese Yen", 0, "Japan", Decimal::new(65, 4)),
        entry("AUD", "A$", "Australian Dollar", 2, "Australia", Decimal::new(66, 2)),
        entry("CAD", "C$", "Canadian Dollar", 2, "Canada", Decimal::new(73, 2)),
        entry("NGN", "₦", "Nigerian Naira", 2, "Nigeria", Decimal::new(67, 5)),
    ])
});

/// Look up a currency by its code (case-insensitive).
pub fn get(code: &str) -> Result<Currency, CurrencyError> {
    REGISTRY
        .get(code.trim().to_uppercase().as_str())
        .cloned()
        .ok_or_else(|| CurrencyError::Unsupported(code.to_string()))
}

/// All registered currencies, ordered by code.
pub fn all() -> impl Iterator<Item = &'static Currency> {
    REGISTRY.values()
}

/// Convert an amount between two registered currencies through the USD base.
///
/// The result is rounded to the target currency's fractional digits.
pub fn convert(amount: Decimal, from: &str, to: &str) -> Result<Decimal, CurrencyError> {
    let from = get(from)?;
    let to = get(to)?;

    let in_usd = amount * from.usd_rate;
    let converted = in_usd / to.usd_rate;
    Ok(converted.round_dp(to.decimals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_lookup_known_codes() {
        for code in ["USD", "EUR", "GBP", "JPY", "AUD", "CAD", "NGN"] {
            let currency = get(code).unwrap();
            assert_eq!(currency.code, code);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(get("usd").unwrap().code, "USD");
        assert_eq!(get(" eur ").unwrap().code, "EUR");
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(matches!(get("XXX"), Err(CurrencyError::Unsupported(_))));
        assert!(matches!(get(""), Err(CurrencyError::Unsupported(_))));
    }

    #[test]
    fn test_jpy_has_no_minor_unit() {
        assert_eq!(get("JPY").unwrap().decimals, 0);
        assert_eq!(get("USD").unwrap().decimals, 2);
    }

    #[test]
    fn test_convert_identity() {
        let amount = Decimal::from_str("123.45").unwrap();
        assert_eq!(convert(amount, "USD", "USD").unwrap(), amount);
    }

    #[test]
    fn test_convert_usd_to_eur_and_back() {
        let amount = Decimal::from_str("100.00").unwrap();
        let eur = convert(amount, "USD", "EUR").unwrap();
        // 100 USD / 0.92 = 108.70 EUR (rounded to 2dp)
        assert_eq!(eur, Decimal::from_str("108.70").unwrap());

        let back = convert(eur, "EUR", "USD").unwrap();
        // Round-trip within one minor unit of rounding drift
        assert!((back - amount).abs() <= Decimal::new(1, 2));
    }

    #[test]
    fn test_convert_rounds_to_target_decimals() {
        let amount = Decimal::from_str("10.00").unwrap();
        let jpy = convert(amount, "USD", "JPY").unwrap();
        assert_eq!(jpy.scale(), 0);
    }
}
