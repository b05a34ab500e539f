//! Flow Policy
//!
//! One configurable policy object drives every variant of the send flow.
//! The observed variants differ only in which recipient fields are
//! mandatory, whether a step-up challenge guards submission, the amount
//! ceiling, and which fields stay editable on the preview screen - so
//! those knobs live here and the state machine stays singular.

use crate::validation::AddressPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user-editable field of the transfer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    RecipientName,
    RecipientAddress,
    Country,
    PhoneNumber,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::RecipientName => "recipient_name",
            Field::RecipientAddress => "recipient_address",
            Field::Country => "country",
            Field::PhoneNumber => "phone_number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration of one send-flow variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPolicy {
    pub require_address: bool,
    pub require_phone: bool,
    pub require_country: bool,
    pub require_recipient_name: bool,

    /// Interpose a phone verification challenge between confirm and submit
    pub require_otp: bool,

    /// Per-transfer amount ceiling in the flow currency, if any
    #[serde(default)]
    pub amount_ceiling: Option<Decimal>,

    #[serde(default)]
    pub address: AddressPolicy,

    /// Fields the user may correct in place on the preview screen
    #[serde(default)]
    pub editable_in_preview: Vec<Field>,

    #[serde(default = "default_otp_code_length")]
    pub otp_code_length: usize,

    #[serde(default = "default_otp_max_attempts")]
    pub otp_max_attempts: u8,

    /// Country calling code assumed for phone input without a `+` prefix
    #[serde(default)]
    pub default_country_code: Option<String>,
}

fn default_otp_code_length() -> usize {
    6
}

fn default_otp_max_attempts() -> u8 {
    3
}

impl FlowPolicy {
    /// Wallet-to-wallet transfer: strict ledger address, no step-up.
    pub fn ledger_transfer() -> Self {
        Self {
            require_address: true,
            require_phone: false,
            require_country: false,
            require_recipient_name: false,
            require_otp: false,
            amount_ceiling: None,
            address: AddressPolicy::ledger(),
            editable_in_preview: Vec::new(),
            otp_code_length: default_otp_code_length(),
            otp_max_attempts: default_otp_max_attempts(),
            default_country_code: None,
        }
    }

    /// Cross-border remittance to a contact: name, country, and phone are
    /// mandatory, submission is guarded by an OTP challenge, and the
    /// contact fields stay correctable on the preview screen.
    pub fn remittance() -> Self {
        Self {
            require_address: false,
            require_phone: true,
            require_country: true,
            require_recipient_name: true,
            require_otp: true,
            amount_ceiling: Some(Decimal::from(1000)),
            address: AddressPolicy::default(),
            editable_in_preview: vec![Field::Country, Field::PhoneNumber],
            otp_code_length: default_otp_code_length(),
            otp_max_attempts: default_otp_max_attempts(),
            default_country_code: Some("1".to_string()),
        }
    }

    /// Whether the draft must carry a value for `field`.
    ///
    /// A step-up challenge needs somewhere to send the code, so
    /// `require_otp` implies the phone number is mandatory.
    pub fn requires(&self, field: Field) -> bool {
        match field {
            Field::Amount => true,
            Field::RecipientName => self.require_recipient_name,
            Field::RecipientAddress => self.require_address,
            Field::Country => self.require_country,
            Field::PhoneNumber => self.require_phone || self.require_otp,
        }
    }

    /// Whether `field` may be reopened for correction from the preview.
    pub fn can_edit_in_preview(&self, field: Field) -> bool {
        self.editable_in_preview.contains(&field)
    }
}

impl Default for FlowPolicy {
    fn default() -> Self {
        Self::ledger_transfer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_preset() {
        let policy = FlowPolicy::ledger_transfer();
        assert!(policy.requires(Field::Amount));
        assert!(policy.requires(Field::RecipientAddress));
        assert!(!policy.requires(Field::PhoneNumber));
        assert!(!policy.require_otp);
        assert_eq!(policy.address, AddressPolicy::Ledger { length: 56 });
    }

    #[test]
    fn test_remittance_preset() {
        let policy = FlowPolicy::remittance();
        assert!(policy.requires(Field::RecipientName));
        assert!(policy.requires(Field::Country));
        assert!(policy.requires(Field::PhoneNumber));
        assert!(!policy.requires(Field::RecipientAddress));
        assert_eq!(policy.amount_ceiling, Some(Decimal::from(1000)));
        assert!(policy.can_edit_in_preview(Field::Country));
        assert!(policy.can_edit_in_preview(Field::PhoneNumber));
        assert!(!policy.can_edit_in_preview(Field::Amount));
    }

    #[test]
    fn test_otp_implies_phone_required() {
        let mut policy = FlowPolicy::ledger_transfer();
        policy.require_otp = true;
        assert!(policy.requires(Field::PhoneNumber));
    }
}
