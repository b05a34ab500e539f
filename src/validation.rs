//! Field Validation
//!
//! Pure validators for the three user-entered transfer fields: amount,
//! ledger address, and phone number. Every function is total - malformed
//! input comes back as a tagged [`ValidationError`], never a panic.
//!
//! Validated values are returned as normalized types ([`Decimal`],
//! trimmed `String`, [`CanonicalPhone`]) so downstream code never has to
//! re-check them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Validation Errors
// ============================================================================

/// Field-level validation error kinds.
///
/// These are recoverable by construction: they surface as per-field
/// messages on the form and never abort the flow.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Field is required")]
    Required,

    #[error("Amount is not a number")]
    NotANumber,

    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Amount exceeds the per-transfer limit")]
    ExceedsMax,

    #[error("Address is too short")]
    TooShort,

    #[error("Address format is invalid")]
    InvalidFormat,

    #[error("Phone number is invalid")]
    InvalidPhone,
}

impl ValidationError {
    /// Stable error code for presentation-layer message lookup
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Required => "REQUIRED",
            ValidationError::NotANumber => "NOT_A_NUMBER",
            ValidationError::NotPositive => "NOT_POSITIVE",
            ValidationError::ExceedsMax => "EXCEEDS_MAX",
            ValidationError::TooShort => "TOO_SHORT",
            ValidationError::InvalidFormat => "INVALID_FORMAT",
            ValidationError::InvalidPhone => "INVALID_PHONE",
        }
    }
}

// ============================================================================
// Amount
// ============================================================================

/// Parse and validate a raw amount string.
///
/// Locale-invariant: `.` is the only accepted decimal separator, no digit
/// grouping. The result is normalized to `decimals` fractional digits
/// (half-away-from-zero), then checked against the optional ceiling.
///
/// # Errors
/// * `Required` - empty or whitespace-only input
/// * `NotANumber` - unparseable input
/// * `NotPositive` - zero or negative
/// * `ExceedsMax` - above the configured ceiling
pub fn validate_amount(
    raw: &str,
    decimals: u32,
    ceiling: Option<Decimal>,
) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required);
    }

    let amount = Decimal::from_str(raw).map_err(|_| ValidationError::NotANumber)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive);
    }

    let amount = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    // Rounding a sub-minor-unit amount (e.g. "0.001" at 2dp) can hit zero
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive);
    }

    if let Some(max) = ceiling
        && amount > max
    {
        return Err(ValidationError::ExceedsMax);
    }

    Ok(amount)
}

// ============================================================================
// Address
// ============================================================================

/// Which shape of recipient address the active flow accepts.
///
/// Both observed policies are supported as configuration: a loose
/// minimum-length heuristic, and the strict fixed-length uppercase
/// ledger-account format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AddressPolicy {
    /// Anything at least `min` characters with no embedded whitespace
    MinLength { min: usize },
    /// Fixed-length account identifier, alphabet `[A-Z0-9]`
    Ledger { length: usize },
}

impl AddressPolicy {
    /// The conventional ledger account format: 56 uppercase base32-ish chars
    pub fn ledger() -> Self {
        AddressPolicy::Ledger { length: 56 }
    }
}

impl Default for AddressPolicy {
    fn default() -> Self {
        AddressPolicy::MinLength { min: 10 }
    }
}

/// Validate a recipient address against the active [`AddressPolicy`].
///
/// Returns the trimmed address on success.
pub fn validate_address(raw: &str, policy: &AddressPolicy) -> Result<String, ValidationError> {
    let addr = raw.trim();
    if addr.is_empty() {
        return Err(ValidationError::Required);
    }

    match policy {
        AddressPolicy::MinLength { min } => {
            if addr.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(ValidationError::InvalidFormat);
            }
            if addr.chars().count() < *min {
                return Err(ValidationError::TooShort);
            }
        }
        AddressPolicy::Ledger { length } => {
            let count = addr.chars().count();
            if count < *length {
                return Err(ValidationError::TooShort);
            }
            if count > *length {
                return Err(ValidationError::InvalidFormat);
            }
            if !addr
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            {
                return Err(ValidationError::InvalidFormat);
            }
        }
    }

    Ok(addr.to_string())
}

// ============================================================================
// Phone Number
// ============================================================================

/// E.164-normalized phone number (guaranteed `+` plus 7-15 digits).
///
/// Fields are private to force construction through
/// [`validate_phone_number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalPhone(String);

impl CanonicalPhone {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digits after the `+`
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate and canonicalize a phone number.
///
/// Accepts digits, `+`, spaces, hyphens, dots, and parentheses; strips all
/// formatting. The input must carry its own `+`-prefixed country calling
/// code, or `default_country_code` (digits, e.g. `"1"`) is prepended.
/// Plausibility bound: 7-15 significant digits.
pub fn validate_phone_number(
    raw: &str,
    default_country_code: Option<&str>,
) -> Result<CanonicalPhone, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required);
    }

    let mut digits = String::with_capacity(raw.len());
    for (i, c) in raw.chars().enumerate() {
        match c {
            '0'..='9' => digits.push(c),
            '+' if i == 0 => {}
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(ValidationError::InvalidPhone),
        }
    }

    if digits.is_empty() {
        return Err(ValidationError::InvalidPhone);
    }

    let has_cc = raw.starts_with('+');
    let full = if has_cc {
        digits
    } else {
        match default_country_code {
            Some(cc) if cc.chars().all(|c| c.is_ascii_digit()) && !cc.is_empty() => {
                format!("{cc}{digits}")
            }
            // No way to tell which country this number belongs to
            _ => return Err(ValidationError::InvalidPhone),
        }
    };

    if full.len() < 7 || full.len() > 15 {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(CanonicalPhone(format!("+{full}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Amount
    // ------------------------------------------------------------------------

    #[test]
    fn test_amount_accepts_positive_decimal() {
        let amount = validate_amount("50.00", 2, None).unwrap();
        assert_eq!(amount, Decimal::new(5000, 2));
    }

    #[test]
    fn test_amount_rejects_empty() {
        assert_eq!(validate_amount("", 2, None), Err(ValidationError::Required));
        assert_eq!(
            validate_amount("   ", 2, None),
            Err(ValidationError::Required)
        );
    }

    #[test]
    fn test_amount_rejects_garbage() {
        for raw in ["abc", "12,5", "1.2.3", "5 usd", "NaN"] {
            assert_eq!(
                validate_amount(raw, 2, None),
                Err(ValidationError::NotANumber),
                "should reject {raw:?}"
            );
        }
    }

    #[test]
    fn test_amount_rejects_zero_and_negative() {
        assert_eq!(
            validate_amount("0", 2, None),
            Err(ValidationError::NotPositive)
        );
        assert_eq!(
            validate_amount("0.00", 2, None),
            Err(ValidationError::NotPositive)
        );
        assert_eq!(
            validate_amount("-5", 2, None),
            Err(ValidationError::NotPositive)
        );
    }

    #[test]
    fn test_amount_normalizes_to_currency_decimals() {
        // Half-away-from-zero at 2dp
        assert_eq!(
            validate_amount("10.005", 2, None).unwrap(),
            Decimal::new(1001, 2)
        );
        // JPY-style zero-decimal currency
        assert_eq!(validate_amount("100.4", 0, None).unwrap(), Decimal::from(100));
    }

    #[test]
    fn test_amount_rounded_to_zero_is_not_positive() {
        assert_eq!(
            validate_amount("0.001", 2, None),
            Err(ValidationError::NotPositive)
        );
    }

    #[test]
    fn test_amount_ceiling() {
        let max = Some(Decimal::from(1000));
        assert_eq!(
            validate_amount("1000.00", 2, max).unwrap(),
            Decimal::new(100000, 2)
        );
        assert_eq!(
            validate_amount("1000.01", 2, max),
            Err(ValidationError::ExceedsMax)
        );
    }

    // ------------------------------------------------------------------------
    // Address
    // ------------------------------------------------------------------------

    const LEDGER_ADDR: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    #[test]
    fn test_address_ledger_accepts_valid() {
        assert_eq!(LEDGER_ADDR.len(), 56);
        let addr = validate_address(LEDGER_ADDR, &AddressPolicy::ledger()).unwrap();
        assert_eq!(addr, LEDGER_ADDR);
    }

    #[test]
    fn test_address_ledger_rejects_wrong_length_and_case() {
        let policy = AddressPolicy::ledger();
        assert_eq!(
            validate_address(&LEDGER_ADDR[..40], &policy),
            Err(ValidationError::TooShort)
        );
        let too_long = format!("{LEDGER_ADDR}AB");
        assert_eq!(
            validate_address(&too_long, &policy),
            Err(ValidationError::InvalidFormat)
        );
        let lowercase = LEDGER_ADDR.to_lowercase();
        assert_eq!(
            validate_address(&lowercase, &policy),
            Err(ValidationError::InvalidFormat)
        );
    }

    #[test]
    fn test_address_min_length_heuristic() {
        let policy = AddressPolicy::default();
        assert!(validate_address("wallet-id-12345", &policy).is_ok());
        assert_eq!(
            validate_address("short", &policy),
            Err(ValidationError::TooShort)
        );
        assert_eq!(
            validate_address("has a space inside", &policy),
            Err(ValidationError::InvalidFormat)
        );
        assert_eq!(validate_address("", &policy), Err(ValidationError::Required));
    }

    #[test]
    fn test_address_trims_surrounding_whitespace() {
        let padded = format!("  {LEDGER_ADDR}  ");
        let addr = validate_address(&padded, &AddressPolicy::ledger()).unwrap();
        assert_eq!(addr, LEDGER_ADDR);
    }

    // ------------------------------------------------------------------------
    // Phone
    // ------------------------------------------------------------------------

    #[test]
    fn test_phone_strips_formatting() {
        let phone = validate_phone_number("+1 (555) 222-3333", None).unwrap();
        assert_eq!(phone.as_str(), "+15552223333");
    }

    #[test]
    fn test_phone_applies_default_country_code() {
        let phone = validate_phone_number("555 000 1111", Some("1")).unwrap();
        assert_eq!(phone.as_str(), "+15550001111");
    }

    #[test]
    fn test_phone_without_cc_or_default_rejected() {
        assert_eq!(
            validate_phone_number("5550001111", None),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn test_phone_rejects_empty_and_garbage() {
        assert_eq!(validate_phone_number("", None), Err(ValidationError::Required));
        assert_eq!(
            validate_phone_number("+1 555 CALL-NOW", None),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(
            validate_phone_number("+()- ", None),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn test_phone_length_bounds() {
        assert_eq!(
            validate_phone_number("+123456", None),
            Err(ValidationError::InvalidPhone)
        ); // 6 digits
        assert!(validate_phone_number("+1234567", None).is_ok()); // 7 digits
        assert!(validate_phone_number("+123456789012345", None).is_ok()); // 15 digits
        assert_eq!(
            validate_phone_number("+1234567890123456", None),
            Err(ValidationError::InvalidPhone)
        ); // 16 digits
    }

    #[test]
    fn test_phone_plus_only_allowed_first() {
        assert_eq!(
            validate_phone_number("55+1234567", None),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn test_phone_canonical_is_fixed_point() {
        let first = validate_phone_number("+1 (555) 222-3333", None).unwrap();
        let second = validate_phone_number(first.as_str(), None).unwrap();
        assert_eq!(first, second);
    }
}
