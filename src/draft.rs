//! Transfer Draft
//!
//! The live, editable form state. Every setter re-runs the relevant
//! validator, updates the per-field error map, and recomputes the derived
//! `valid` flag against the active policy's required-field set. The draft
//! never reaches the wire: submission works off an immutable
//! [`TransferData`] snapshot taken at the single validation gate, so
//! later edits can never change what was confirmed.

use crate::currency::Currency;
use crate::policy::{Field, FlowPolicy};
use crate::validation::{
    CanonicalPhone, ValidationError, validate_address, validate_amount, validate_phone_number,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Immutable, validated copy of a draft, taken on entering preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferData {
    pub amount: Decimal,
    pub currency: Currency,
    pub recipient: RecipientIdentity,
}

/// Who the money goes to. At least one of `address` / `phone_number` is
/// present and validated by the time this exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipientIdentity {
    pub display_name: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<CanonicalPhone>,
}

/// The editable transfer form.
#[derive(Debug, Clone)]
pub struct TransferDraft {
    policy: FlowPolicy,
    currency: Currency,

    amount_raw: String,
    amount: Option<Decimal>,

    recipient_name: String,

    address_raw: String,
    address: Option<String>,

    country: String,

    phone_raw: String,
    phone: Option<CanonicalPhone>,

    field_errors: BTreeMap<Field, ValidationError>,
    valid: bool,
}

impl TransferDraft {
    pub fn new(policy: FlowPolicy, currency: Currency) -> Self {
        let mut draft = Self {
            policy,
            currency,
            amount_raw: String::new(),
            amount: None,
            recipient_name: String::new(),
            address_raw: String::new(),
            address: None,
            country: String::new(),
            phone_raw: String::new(),
            phone: None,
            field_errors: BTreeMap::new(),
            valid: false,
        };
        draft.recompute_valid();
        draft
    }

    // ========================================================================
    // Mutation - one setter per user input event
    // ========================================================================

    pub fn set_amount(&mut self, raw: &str) {
        self.amount_raw = raw.to_string();
        match validate_amount(raw, self.currency.decimals, self.policy.amount_ceiling) {
            Ok(amount) => {
                self.amount = Some(amount);
                self.field_errors.remove(&Field::Amount);
            }
            Err(e) => {
                self.amount = None;
                self.field_errors.insert(Field::Amount, e);
            }
        }
        self.recompute_valid();
    }

    /// Switching currency re-validates the drafted amount against the new
    /// fractional-digit configuration and ceiling semantics.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
        let raw = self.amount_raw.clone();
        if raw.is_empty() {
            self.recompute_valid();
        } else {
            self.set_amount(&raw);
        }
    }

    pub fn set_recipient_name(&mut self, raw: &str) {
        self.recipient_name = raw.trim().to_string();
        if self.recipient_name.is_empty() && self.policy.requires(Field::RecipientName) {
            self.field_errors
                .insert(Field::RecipientName, ValidationError::Required);
        } else {
            self.field_errors.remove(&Field::RecipientName);
        }
        self.recompute_valid();
    }

    pub fn set_recipient_address(&mut self, raw: &str) {
        self.address_raw = raw.to_string();
        if raw.trim().is_empty() && !self.policy.requires(Field::RecipientAddress) {
            // Optional field left blank is fine
            self.address = None;
            self.field_errors.remove(&Field::RecipientAddress);
        } else {
            match validate_address(raw, &self.policy.address) {
                Ok(addr) => {
                    self.address = Some(addr);
                    self.field_errors.remove(&Field::RecipientAddress);
                }
                Err(e) => {
                    self.address = None;
                    self.field_errors.insert(Field::RecipientAddress, e);
                }
            }
        }
        self.recompute_valid();
    }

    pub fn set_country(&mut self, raw: &str) {
        self.country = raw.trim().to_string();
        if self.country.is_empty() && self.policy.requires(Field::Country) {
            self.field_errors
                .insert(Field::Country, ValidationError::Required);
        } else {
            self.field_errors.remove(&Field::Country);
        }
        self.recompute_valid();
    }

    pub fn set_phone_number(&mut self, raw: &str) {
        self.phone_raw = raw.to_string();
        if raw.trim().is_empty() && !self.policy.requires(Field::PhoneNumber) {
            self.phone = None;
            self.field_errors.remove(&Field::PhoneNumber);
        } else {
            match validate_phone_number(raw, self.policy.default_country_code.as_deref()) {
                Ok(phone) => {
                    self.phone = Some(phone);
                    self.field_errors.remove(&Field::PhoneNumber);
                }
                Err(e) => {
                    self.phone = None;
                    self.field_errors.insert(Field::PhoneNumber, e);
                }
            }
        }
        self.recompute_valid();
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    fn recompute_valid(&mut self) {
        // Presence of required fields that have never been touched
        let missing_required = [
            (Field::Amount, self.amount.is_none()),
            (
                Field::RecipientName,
                self.recipient_name.is_empty(),
            ),
            (Field::RecipientAddress, self.address.is_none()),
            (Field::Country, self.country.is_empty()),
            (Field::PhoneNumber, self.phone.is_none()),
        ]
        .into_iter()
        .any(|(field, absent)| self.policy.requires(field) && absent);

        self.valid = !missing_required && self.field_errors.is_empty();
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn field_errors(&self) -> &BTreeMap<Field, ValidationError> {
        &self.field_errors
    }

    pub fn error_for(&self, field: Field) -> Option<ValidationError> {
        self.field_errors.get(&field).copied()
    }

    /// Surface presence errors for untouched required fields, mirroring
    /// the blanket required-fields check at the continue gate.
    pub fn flag_missing_required(&mut self) {
        let checks = [
            (Field::Amount, self.amount.is_none()),
            (Field::RecipientName, self.recipient_name.is_empty()),
            (Field::RecipientAddress, self.address.is_none()),
            (Field::Country, self.country.is_empty()),
            (Field::PhoneNumber, self.phone.is_none()),
        ];
        for (field, absent) in checks {
            if self.policy.requires(field) && absent {
                self.field_errors
                    .entry(field)
                    .or_insert(ValidationError::Required);
            }
        }
        self.recompute_valid();
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn amount_raw(&self) -> &str {
        &self.amount_raw
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn recipient_address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn phone_number(&self) -> Option<&CanonicalPhone> {
        self.phone.as_ref()
    }

    pub fn policy(&self) -> &FlowPolicy {
        &self.policy
    }

    /// Produce the immutable confirmation snapshot.
    ///
    /// Returns `None` unless the draft is currently valid; the caller
    /// (the state machine's continue gate) decides how to surface that.
    pub fn snapshot(&self) -> Option<TransferData> {
        if !self.valid {
            return None;
        }

        let amount = self.amount?;
        Some(TransferData {
            amount,
            currency: self.currency.clone(),
            recipient: RecipientIdentity {
                display_name: (!self.recipient_name.is_empty())
                    .then(|| self.recipient_name.clone()),
                address: self.address.clone(),
                country: (!self.country.is_empty()).then(|| self.country.clone()),
                phone_number: self.phone.clone(),
            },
        })
    }
}
