//! remitflow - Peer-to-Peer Transfer Flow Engine
//!
//! The client-side contract for sending money to another person: enter an
//! amount and a recipient, confirm a validated preview, optionally pass a
//! phone verification challenge, and submit - with retry on failure and
//! an idempotent terminal receipt.
//!
//! # Modules
//!
//! - [`validation`] - pure field validators (amount, address, phone)
//! - [`format`] - canonical display forms (money, phone, short address)
//! - [`currency`] - supported-currency registry and conversion
//! - [`policy`] - flow variant configuration (required fields, OTP, ceiling)
//! - [`draft`] - the editable form state and its immutable snapshot
//! - [`session`] - the transfer state machine and gateway boundaries
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod currency;
pub mod draft;
pub mod format;
pub mod logging;
pub mod policy;
pub mod session;
pub mod validation;

// Convenient re-exports at crate root
pub use currency::Currency;
pub use draft::{RecipientIdentity, TransferData, TransferDraft};
pub use policy::{Field, FlowPolicy};
pub use session::{
    FlowError, OtpChallenge, OtpGateway, OtpSendError, OtpStatus, OtpVerifyError, Receipt,
    SubmissionError, SubmissionGateway, TransferFlow, TransferOrder, TransferState,
};
pub use validation::{AddressPolicy, CanonicalPhone, ValidationError};

#[cfg(any(test, feature = "mock-gateways"))]
pub use session::{MockOtpGateway, MockSubmissionGateway};
