//! Gateway Boundaries
//!
//! The flow consumes two external services through async trait objects:
//! the submission gateway (the opaque "move the money" operation) and the
//! OTP gateway (step-up code delivery and verification). Neither is owned
//! by the flow; both are injected as `Arc<dyn _>`.
//!
//! Gateways report outcomes as tagged `Result`s - the flow never sees a
//! raw transport error.

use crate::draft::{RecipientIdentity, TransferData};
use crate::session::error::{OtpSendError, OtpVerifyError, SubmissionError};
use crate::validation::CanonicalPhone;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Wire payload for one submission attempt.
///
/// `client_ref` is minted once per session (on entering preview) and is
/// stable across retries, so a gateway can deduplicate the same logical
/// transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferOrder {
    pub client_ref: Uuid,
    pub amount: Decimal,
    pub currency_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl TransferOrder {
    pub fn from_snapshot(client_ref: Uuid, data: &TransferData) -> Self {
        Self {
            client_ref,
            amount: data.amount,
            currency_code: data.currency.code.clone(),
            recipient_address: data.recipient.address.clone(),
            recipient_name: data.recipient.display_name.clone(),
            phone_number: data
                .recipient
                .phone_number
                .as_ref()
                .map(|p| p.as_str().to_string()),
            country: data.recipient.country.clone(),
        }
    }
}

/// Terminal record of an accepted transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    /// Gateway-assigned reference for the executed transfer
    pub reference: String,
    pub client_ref: Uuid,
    pub amount: Decimal,
    pub currency_code: String,
    pub recipient: RecipientIdentity,
    pub timestamp: DateTime<Utc>,
}

/// The opaque transfer execution boundary.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Execute the transfer. Must be safe to retry with the same
    /// `client_ref`.
    async fn submit(&self, order: &TransferOrder) -> Result<Receipt, SubmissionError>;
}

/// Step-up phone verification boundary.
#[async_trait]
pub trait OtpGateway: Send + Sync {
    /// Deliver a fresh code to the given number.
    async fn send_code(&self, phone: &CanonicalPhone) -> Result<(), OtpSendError>;

    /// Check a user-entered code. Expiry is the gateway's call and
    /// surfaces as [`OtpVerifyError::Expired`].
    async fn verify(&self, phone: &CanonicalPhone, code: &str) -> Result<(), OtpVerifyError>;
}

/// In-process gateways for tests and demos.
#[cfg(any(test, feature = "mock-gateways"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock submission gateway with configurable failure behavior.
    #[derive(Debug, Default)]
    pub struct MockSubmissionGateway {
        submit_count: AtomicUsize,
        /// Fail the next N submissions with this error
        fail_next: Mutex<Option<(SubmissionError, usize)>>,
        last_order: Mutex<Option<TransferOrder>>,
    }

    impl MockSubmissionGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the next `times` submissions fail with `error`.
        pub fn fail_next(&self, error: SubmissionError, times: usize) {
            *self.fail_next.lock().unwrap() = Some((error, times));
        }

        pub fn submit_count(&self) -> usize {
            self.submit_count.load(Ordering::SeqCst)
        }

        pub fn last_order(&self) -> Option<TransferOrder> {
            self.last_order.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubmissionGateway for MockSubmissionGateway {
        async fn submit(&self, order: &TransferOrder) -> Result<Receipt, SubmissionError> {
            self.submit_count.fetch_add(1, Ordering::SeqCst);
            *self.last_order.lock().unwrap() = Some(order.clone());

            let failure = {
                let mut fail = self.fail_next.lock().unwrap();
                match fail.take() {
                    Some((error, times)) if times > 0 => {
                        if times > 1 {
                            *fail = Some((error.clone(), times - 1));
                        }
                        Some(error)
                    }
                    other => {
                        *fail = other;
                        None
                    }
                }
            };
            if let Some(e) = failure {
                return Err(e);
            }

            Ok(Receipt {
                reference: format!("mock-{}", Uuid::new_v4().simple()),
                client_ref: order.client_ref,
                amount: order.amount,
                currency_code: order.currency_code.clone(),
                recipient: RecipientIdentity {
                    display_name: order.recipient_name.clone(),
                    address: order.recipient_address.clone(),
                    country: order.country.clone(),
                    phone_number: None,
                },
                timestamp: Utc::now(),
            })
        }
    }

    /// Mock OTP gateway accepting one fixed code.
    #[derive(Debug)]
    pub struct MockOtpGateway {
        accepted_code: String,
        send_count: AtomicUsize,
        verify_count: AtomicUsize,
        fail_send: Mutex<Option<OtpSendError>>,
        /// Report every code as expired, regardless of match
        force_expired: Mutex<bool>,
        rate_limit_verify: Mutex<bool>,
    }

    impl Default for MockOtpGateway {
        fn default() -> Self {
            Self::new("123456")
        }
    }

    impl MockOtpGateway {
        pub fn new(accepted_code: &str) -> Self {
            Self {
                accepted_code: accepted_code.to_string(),
                send_count: AtomicUsize::new(0),
                verify_count: AtomicUsize::new(0),
                fail_send: Mutex::new(None),
                force_expired: Mutex::new(false),
                rate_limit_verify: Mutex::new(false),
            }
        }

        pub fn accepted_code(&self) -> &str {
            &self.accepted_code
        }

        pub fn set_fail_send(&self, error: Option<OtpSendError>) {
            *self.fail_send.lock().unwrap() = error;
        }

        pub fn set_force_expired(&self, expired: bool) {
            *self.force_expired.lock().unwrap() = expired;
        }

        pub fn set_rate_limit_verify(&self, limited: bool) {
            *self.rate_limit_verify.lock().unwrap() = limited;
        }

        pub fn send_count(&self) -> usize {
            self.send_count.load(Ordering::SeqCst)
        }

        pub fn verify_count(&self) -> usize {
            self.verify_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OtpGateway for MockOtpGateway {
        async fn send_code(&self, _phone: &CanonicalPhone) -> Result<(), OtpSendError> {
            self.send_count.fetch_add(1, Ordering::SeqCst);
            match self.fail_send.lock().unwrap().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn verify(&self, _phone: &CanonicalPhone, code: &str) -> Result<(), OtpVerifyError> {
            self.verify_count.fetch_add(1, Ordering::SeqCst);

            if *self.rate_limit_verify.lock().unwrap() {
                return Err(OtpVerifyError::RateLimited);
            }
            if *self.force_expired.lock().unwrap() {
                return Err(OtpVerifyError::Expired);
            }
            if code == self.accepted_code {
                Ok(())
            } else {
                Err(OtpVerifyError::Mismatch)
            }
        }
    }

}

#[cfg(any(test, feature = "mock-gateways"))]
pub use mock::{MockOtpGateway, MockSubmissionGateway};
