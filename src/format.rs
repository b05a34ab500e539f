//! Display Formatting
//!
//! Canonical display forms shared by every surface that shows a transfer
//! (entry form, preview, receipt). Keeping these here means an amount or
//! phone number always renders identically across the flow.

use crate::currency::Currency;
use crate::validation::CanonicalPhone;
use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount in its currency: `$50.00`, `¥1200`.
///
/// Always exactly `currency.decimals` fractional digits.
pub fn format_money(amount: Decimal, currency: &Currency) -> String {
    let rounded =
        amount.round_dp_with_strategy(currency.decimals, RoundingStrategy::MidpointAwayFromZero);
    format!(
        "{}{:.prec$}",
        currency.symbol,
        rounded,
        prec = currency.decimals as usize
    )
}

/// Render an amount with its code suffix: `$50.00 USD`.
pub fn format_money_with_code(amount: Decimal, currency: &Currency) -> String {
    format!("{} {}", format_money(amount, currency), currency.code)
}

/// Human-readable grouping of a canonical phone number.
///
/// A number whose national part is 10 digits renders as
/// `+CC NNN-NNN-NNNN` (shortest country code wins); anything else passes
/// through unchanged rather than guessing a grouping.
pub fn format_phone_for_display(phone: &CanonicalPhone) -> String {
    let digits = phone.digits();

    for cc_len in 1..=3 {
        if digits.len() == cc_len + 10 {
            let (cc, national) = digits.split_at(cc_len);
            return format!(
                "+{} {}-{}-{}",
                cc,
                &national[0..3],
                &national[3..6],
                &national[6..10]
            );
        }
    }

    phone.as_str().to_string()
}

/// Abbreviate a long account address: `GBRPYHIL...SW7QC7OX`.
///
/// Addresses shorter than 16 characters are returned unchanged.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < 16 {
        return address.to_string();
    }

    let prefix: String = chars[..8].iter().collect();
    let suffix: String = chars[chars.len() - 8..].iter().collect();
    format!("{prefix}...{suffix}")
}
