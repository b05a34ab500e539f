//! Transfer Flow State Definitions

use std::fmt;

/// States of one transfer flow instance.
///
/// Terminal states: SUCCESS, FAILED, ABANDONED.
/// Transient states (a gateway call is in flight): STEP_UP_VERIFYING,
/// SUBMITTING - every user action is refused while in one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferState {
    /// Form entry - the draft is freely mutable
    Editing,

    /// Read-only confirmation of the validated snapshot
    Preview,

    /// Challenge sent, waiting for the user to type the code
    StepUpPending,

    /// Code dispatched to the OTP gateway, waiting on its verdict
    StepUpVerifying,

    /// Snapshot dispatched to the submission gateway
    Submitting,

    /// Terminal: transfer accepted, receipt recorded
    Success,

    /// Terminal: step-up attempts exhausted
    Failed,

    /// Terminal: user navigated away before completion
    Abandoned,
}

impl TransferState {
    /// No further transitions possible
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferState::Success | TransferState::Failed | TransferState::Abandoned
        )
    }

    /// A gateway call is pending; duplicate actions must be refused
    #[inline]
    pub fn is_awaiting_gateway(&self) -> bool {
        matches!(
            self,
            TransferState::StepUpVerifying | TransferState::Submitting
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Editing => "EDITING",
            TransferState::Preview => "PREVIEW",
            TransferState::StepUpPending => "STEP_UP_PENDING",
            TransferState::StepUpVerifying => "STEP_UP_VERIFYING",
            TransferState::Submitting => "SUBMITTING",
            TransferState::Success => "SUCCESS",
            TransferState::Failed => "FAILED",
            TransferState::Abandoned => "ABANDONED",
        }
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(TransferState::Success.is_terminal());
        assert!(TransferState::Failed.is_terminal());
        assert!(TransferState::Abandoned.is_terminal());

        assert!(!TransferState::Editing.is_terminal());
        assert!(!TransferState::Preview.is_terminal());
        assert!(!TransferState::StepUpPending.is_terminal());
        assert!(!TransferState::StepUpVerifying.is_terminal());
        assert!(!TransferState::Submitting.is_terminal());
    }

    #[test]
    fn test_awaiting_gateway_states() {
        assert!(TransferState::StepUpVerifying.is_awaiting_gateway());
        assert!(TransferState::Submitting.is_awaiting_gateway());

        assert!(!TransferState::Editing.is_awaiting_gateway());
        assert!(!TransferState::Preview.is_awaiting_gateway());
        assert!(!TransferState::StepUpPending.is_awaiting_gateway());
        assert!(!TransferState::Success.is_awaiting_gateway());
    }

    #[test]
    fn test_display() {
        assert_eq!(TransferState::Editing.to_string(), "EDITING");
        assert_eq!(TransferState::StepUpPending.to_string(), "STEP_UP_PENDING");
        assert_eq!(TransferState::Success.to_string(), "SUCCESS");
    }
}
