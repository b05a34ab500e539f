//! Flow Error Types
//!
//! Gateway outcomes are normalized into these enums before any state
//! transition is attempted; nothing from a gateway escapes uncaught.

use crate::policy::Field;
use crate::session::state::TransferState;
use thiserror::Error;

/// Submission gateway failures. Always retryable from preview.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Transfer rejected: {0}")]
    Rejected(String),

    #[error("Submission timed out")]
    Timeout,
}

/// Failures sending the step-up code. Retryable; the session stays in
/// preview.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OtpSendError {
    #[error("Code delivery failed: {0}")]
    Delivery(String),

    #[error("Resend rate limited")]
    RateLimited,
}

/// Verdicts on a submitted step-up code. `Mismatch` and `Expired` consume
/// an attempt; `RateLimited` does not.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OtpVerifyError {
    #[error("Code does not match")]
    Mismatch,

    #[error("Code has expired")]
    Expired,

    #[error("Verification rate limited")]
    RateLimited,
}

impl OtpVerifyError {
    /// Whether this verdict spends one of the attempt budget
    pub fn consumes_attempt(&self) -> bool {
        matches!(self, OtpVerifyError::Mismatch | OtpVerifyError::Expired)
    }
}

/// Everything that can go wrong driving the flow.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FlowError {
    // === Action preconditions ===
    #[error("Action '{action}' not allowed in state {state}")]
    InvalidTransition {
        state: TransferState,
        action: &'static str,
    },

    #[error("Draft has validation errors")]
    DraftInvalid,

    #[error("Field '{0}' is not editable from the preview")]
    FieldNotEditable(Field),

    #[error("Code must be exactly {expected} digits")]
    CodeFormat { expected: usize },

    // === Normalized gateway outcomes ===
    #[error("Verification attempts exhausted")]
    AttemptsExhausted,

    #[error(transparent)]
    OtpSend(#[from] OtpSendError),

    #[error(transparent)]
    OtpVerify(#[from] OtpVerifyError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl FlowError {
    /// Stable error code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            FlowError::InvalidTransition { .. } => "INVALID_TRANSITION",
            FlowError::DraftInvalid => "DRAFT_INVALID",
            FlowError::FieldNotEditable(_) => "FIELD_NOT_EDITABLE",
            FlowError::CodeFormat { .. } => "CODE_FORMAT",
            FlowError::AttemptsExhausted => "ATTEMPTS_EXHAUSTED",
            FlowError::OtpSend(OtpSendError::Delivery(_)) => "OTP_SEND_FAILED",
            FlowError::OtpSend(OtpSendError::RateLimited) => "OTP_SEND_RATE_LIMITED",
            FlowError::OtpVerify(OtpVerifyError::Mismatch) => "OTP_MISMATCH",
            FlowError::OtpVerify(OtpVerifyError::Expired) => "OTP_EXPIRED",
            FlowError::OtpVerify(OtpVerifyError::RateLimited) => "OTP_RATE_LIMITED",
            FlowError::Submission(SubmissionError::Network(_)) => "SUBMISSION_NETWORK",
            FlowError::Submission(SubmissionError::Rejected(_)) => "SUBMISSION_REJECTED",
            FlowError::Submission(SubmissionError::Timeout) => "SUBMISSION_TIMEOUT",
        }
    }

    /// Whether the same action can simply be tried again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowError::OtpSend(_) | FlowError::Submission(_) | FlowError::OtpVerify(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FlowError::Submission(SubmissionError::Timeout).code(),
            "SUBMISSION_TIMEOUT"
        );
        assert_eq!(
            FlowError::OtpVerify(OtpVerifyError::Mismatch).code(),
            "OTP_MISMATCH"
        );
        assert_eq!(FlowError::DraftInvalid.code(), "DRAFT_INVALID");
    }

    #[test]
    fn test_attempt_consumption() {
        assert!(OtpVerifyError::Mismatch.consumes_attempt());
        assert!(OtpVerifyError::Expired.consumes_attempt());
        assert!(!OtpVerifyError::RateLimited.consumes_attempt());
    }

    #[test]
    fn test_display() {
        let err = FlowError::InvalidTransition {
            state: TransferState::Submitting,
            action: "confirm",
        };
        assert_eq!(
            err.to_string(),
            "Action 'confirm' not allowed in state SUBMITTING"
        );
    }
}
