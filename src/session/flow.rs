//! Transfer Flow
//!
//! Orchestrates one transfer from form entry to terminal state. This is
//! the central component that drives state transitions.
//!
//! # Return convention
//!
//! Every action returns `Result<TransferState, FlowError>`:
//! - `Err(_)` means the action was *refused* and nothing changed
//!   (wrong state, field not editable, malformed code, invalid draft).
//! - `Ok(state)` means a transition happened. A gateway-reported failure
//!   still transitions (back to preview, or to FAILED on exhausted
//!   step-up attempts) and is surfaced through [`TransferFlow::last_error`].
//!
//! # Re-entrancy
//!
//! The state is moved into its transient value (SUBMITTING,
//! STEP_UP_VERIFYING) *before* the gateway call is awaited, so a
//! duplicate action arriving mid-flight is refused by the state guard
//! rather than producing a second gateway call.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::draft::{TransferData, TransferDraft};
use crate::policy::{Field, FlowPolicy};
use crate::session::error::FlowError;
use crate::session::gateway::{OtpGateway, Receipt, SubmissionGateway, TransferOrder};
use crate::session::otp::OtpChallenge;
use crate::session::state::TransferState;

/// Confirmation-phase state: exists from the moment the draft passes the
/// continue gate until the flow reaches a terminal state.
#[derive(Debug, Clone)]
struct TransferSession {
    /// Idempotency token, stable across retries of this session
    client_ref: Uuid,
    /// The validated snapshot being confirmed; later draft edits only
    /// reach it through an explicit `save()`
    data: TransferData,
    otp: Option<OtpChallenge>,
    step_up_verified: bool,
    submission_attempts: u32,
    last_error: Option<FlowError>,
    receipt: Option<Receipt>,
}

impl TransferSession {
    fn new(data: TransferData) -> Self {
        Self {
            client_ref: Uuid::new_v4(),
            data,
            otp: None,
            step_up_verified: false,
            submission_attempts: 0,
            last_error: None,
            receipt: None,
        }
    }
}

/// The transfer flow state machine.
pub struct TransferFlow {
    policy: FlowPolicy,
    draft: TransferDraft,
    state: TransferState,
    session: Option<TransferSession>,
    /// Fields reopened for in-place correction from the preview
    open_fields: Vec<Field>,
    submission: Arc<dyn SubmissionGateway>,
    otp_gateway: Arc<dyn OtpGateway>,
}

impl TransferFlow {
    pub fn new(
        policy: FlowPolicy,
        currency: crate::currency::Currency,
        submission: Arc<dyn SubmissionGateway>,
        otp_gateway: Arc<dyn OtpGateway>,
    ) -> Self {
        let draft = TransferDraft::new(policy.clone(), currency);
        Self {
            policy,
            draft,
            state: TransferState::Editing,
            session: None,
            open_fields: Vec::new(),
            submission,
            otp_gateway,
        }
    }

    // ========================================================================
    // Read-only surface for the presentation layer
    // ========================================================================

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    /// The confirmed snapshot, once the flow has passed the continue gate
    pub fn snapshot(&self) -> Option<&TransferData> {
        self.session.as_ref().map(|s| &s.data)
    }

    pub fn otp_challenge(&self) -> Option<&OtpChallenge> {
        self.session.as_ref().and_then(|s| s.otp.as_ref())
    }

    pub fn last_error(&self) -> Option<&FlowError> {
        self.session.as_ref().and_then(|s| s.last_error.as_ref())
    }

    /// Terminal receipt. Idempotent: repeated reads return the same
    /// receipt, and no action can re-trigger submission from SUCCESS.
    pub fn receipt(&self) -> Option<&Receipt> {
        self.session.as_ref().and_then(|s| s.receipt.as_ref())
    }

    pub fn submission_attempts(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.submission_attempts)
    }

    pub fn client_ref(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.client_ref)
    }

    // ========================================================================
    // Draft mutation - gated on the current state
    // ========================================================================

    pub fn set_amount(&mut self, raw: &str) -> Result<(), FlowError> {
        self.ensure_editable(Field::Amount, "set_amount")?;
        self.draft.set_amount(raw);
        Ok(())
    }

    pub fn set_recipient_name(&mut self, raw: &str) -> Result<(), FlowError> {
        self.ensure_editable(Field::RecipientName, "set_recipient_name")?;
        self.draft.set_recipient_name(raw);
        Ok(())
    }

    pub fn set_recipient_address(&mut self, raw: &str) -> Result<(), FlowError> {
        self.ensure_editable(Field::RecipientAddress, "set_recipient_address")?;
        self.draft.set_recipient_address(raw);
        Ok(())
    }

    pub fn set_country(&mut self, raw: &str) -> Result<(), FlowError> {
        self.ensure_editable(Field::Country, "set_country")?;
        self.draft.set_country(raw);
        Ok(())
    }

    pub fn set_phone_number(&mut self, raw: &str) -> Result<(), FlowError> {
        self.ensure_editable(Field::PhoneNumber, "set_phone_number")?;
        self.draft.set_phone_number(raw);
        Ok(())
    }

    /// Currency can only change during initial form entry, never once a
    /// snapshot exists.
    pub fn set_currency(&mut self, currency: crate::currency::Currency) -> Result<(), FlowError> {
        if self.state != TransferState::Editing || self.session.is_some() {
            return Err(FlowError::InvalidTransition {
                state: self.state,
                action: "set_currency",
            });
        }
        self.draft.set_currency(currency);
        Ok(())
    }

    fn ensure_editable(&self, field: Field, action: &'static str) -> Result<(), FlowError> {
        match self.state {
            TransferState::Editing if self.session.is_none() => Ok(()),
            TransferState::Editing if self.open_fields.contains(&field) => Ok(()),
            TransferState::Editing => Err(FlowError::FieldNotEditable(field)),
            state => Err(FlowError::InvalidTransition { state, action }),
        }
    }

    // ========================================================================
    // EDITING -> PREVIEW: the single validation gate
    // ========================================================================

    /// Take the draft into preview. Refused (with field errors raised on
    /// the draft) while any required field is missing or invalid.
    pub fn continue_to_preview(&mut self) -> Result<TransferState, FlowError> {
        if self.state != TransferState::Editing || self.session.is_some() {
            return Err(FlowError::InvalidTransition {
                state: self.state,
                action: "continue",
            });
        }

        let Some(data) = self.draft.snapshot() else {
            self.draft.flag_missing_required();
            debug!(errors = self.draft.field_errors().len(), "Continue refused");
            return Err(FlowError::DraftInvalid);
        };

        let session = TransferSession::new(data);
        info!(client_ref = %session.client_ref, "Entering preview");
        self.session = Some(session);
        self.state = TransferState::Preview;
        Ok(self.state)
    }

    // ========================================================================
    // PREVIEW <-> EDITING: in-place correction
    // ========================================================================

    /// Reopen specific fields for correction without discarding the rest
    /// of the snapshot. Only policy-listed fields qualify.
    pub fn edit(&mut self, fields: &[Field]) -> Result<TransferState, FlowError> {
        self.guard(TransferState::Preview, "edit")?;
        if fields.is_empty() {
            return Err(FlowError::InvalidTransition {
                state: self.state,
                action: "edit",
            });
        }
        for field in fields {
            if !self.policy.can_edit_in_preview(*field) {
                return Err(FlowError::FieldNotEditable(*field));
            }
        }

        self.open_fields = fields.to_vec();
        self.state = TransferState::Editing;
        debug!(?fields, "Preview fields reopened");
        Ok(self.state)
    }

    /// Merge corrected fields back into the snapshot and return to
    /// preview. Only the reopened fields are re-validated; everything
    /// else in the snapshot is untouched.
    pub fn save(&mut self) -> Result<TransferState, FlowError> {
        if self.state != TransferState::Editing || self.open_fields.is_empty() {
            return Err(FlowError::InvalidTransition {
                state: self.state,
                action: "save",
            });
        }

        for field in &self.open_fields {
            if self.draft.error_for(*field).is_some() {
                return Err(FlowError::DraftInvalid);
            }
        }

        let Some(session) = self.session.as_mut() else {
            return Err(FlowError::InvalidTransition {
                state: self.state,
                action: "save",
            });
        };

        for field in self.open_fields.drain(..) {
            match field {
                Field::Amount => {
                    let Some(amount) = self.draft.amount() else {
                        return Err(FlowError::DraftInvalid);
                    };
                    session.data.amount = amount;
                }
                Field::RecipientName => {
                    let name = self.draft.recipient_name();
                    session.data.recipient.display_name =
                        (!name.is_empty()).then(|| name.to_string());
                }
                Field::RecipientAddress => {
                    session.data.recipient.address =
                        self.draft.recipient_address().map(str::to_string);
                }
                Field::Country => {
                    let country = self.draft.country();
                    session.data.recipient.country =
                        (!country.is_empty()).then(|| country.to_string());
                }
                Field::PhoneNumber => {
                    session.data.recipient.phone_number = self.draft.phone_number().cloned();
                }
            }
        }

        self.state = TransferState::Preview;
        debug!("Corrections saved, back to preview");
        Ok(self.state)
    }

    /// Discard an in-place correction and return to preview unchanged.
    pub fn cancel_edit(&mut self) -> Result<TransferState, FlowError> {
        if self.state != TransferState::Editing || self.open_fields.is_empty() {
            return Err(FlowError::InvalidTransition {
                state: self.state,
                action: "cancel_edit",
            });
        }

        self.open_fields.clear();
        self.state = TransferState::Preview;
        Ok(self.state)
    }

    /// Leave preview for full re-editing. The session (and its
    /// idempotency token) is discarded; the draft keeps its values.
    pub fn back_to_editing(&mut self) -> Result<TransferState, FlowError> {
        self.guard(TransferState::Preview, "back")?;
        self.session = None;
        self.open_fields.clear();
        self.state = TransferState::Editing;
        Ok(self.state)
    }

    // ========================================================================
    // PREVIEW -> (STEP_UP | SUBMITTING)
    // ========================================================================

    /// Confirm the previewed transfer. Interposes the step-up challenge
    /// when the policy demands one and it has not been passed yet;
    /// otherwise submits directly.
    pub async fn confirm(&mut self) -> Result<TransferState, FlowError> {
        self.guard(TransferState::Preview, "confirm")?;
        self.dispatch_confirm("confirm").await
    }

    /// Explicit resubmission after a failure. Equivalent to `confirm` -
    /// a verified step-up is not repeated.
    pub async fn retry(&mut self) -> Result<TransferState, FlowError> {
        self.guard(TransferState::Preview, "retry")?;
        self.dispatch_confirm("retry").await
    }

    async fn dispatch_confirm(&mut self, action: &'static str) -> Result<TransferState, FlowError> {
        let step_up_needed = {
            let session = self.session_ref(action)?;
            self.policy.require_otp && !session.step_up_verified
        };

        if step_up_needed {
            self.begin_step_up(action).await
        } else {
            self.submit_order(action).await
        }
    }

    async fn begin_step_up(&mut self, action: &'static str) -> Result<TransferState, FlowError> {
        let phone = self
            .session_ref(action)?
            .data
            .recipient
            .phone_number
            .clone()
            .ok_or(FlowError::DraftInvalid)?;

        // Transient state set before the call: duplicates now refused
        self.state = TransferState::StepUpPending;

        match self.otp_gateway.send_code(&phone).await {
            Ok(()) => {
                let max_attempts = self.policy.otp_max_attempts;
                if let Some(session) = self.session.as_mut() {
                    session.otp = Some(OtpChallenge::new(phone.clone(), max_attempts));
                    session.last_error = None;
                }
                info!(sent_to = %phone, "Step-up code sent");
                Ok(self.state)
            }
            Err(e) => {
                let err = FlowError::from(e);
                warn!(code = err.code(), "Step-up code send failed");
                if let Some(session) = self.session.as_mut() {
                    session.last_error = Some(err);
                }
                self.state = TransferState::Preview;
                Ok(self.state)
            }
        }
    }

    /// Resend the step-up code. The attempt budget carries over - a
    /// resend never refreshes it.
    pub async fn resend_code(&mut self) -> Result<TransferState, FlowError> {
        self.guard(TransferState::StepUpPending, "resend_code")?;

        let (phone, remaining) = {
            let session = self.session_ref("resend_code")?;
            let challenge = session.otp.as_ref().ok_or(FlowError::InvalidTransition {
                state: self.state,
                action: "resend_code",
            })?;
            (challenge.sent_to().clone(), challenge.attempts_remaining())
        };

        match self.otp_gateway.send_code(&phone).await {
            Ok(()) => {
                if let Some(session) = self.session.as_mut() {
                    session.otp = Some(OtpChallenge::new(phone.clone(), remaining));
                    session.last_error = None;
                }
                info!(sent_to = %phone, attempts_remaining = remaining, "Step-up code resent");
                Ok(self.state)
            }
            Err(e) => {
                let err = FlowError::from(e);
                warn!(code = err.code(), "Step-up code resend failed");
                if let Some(session) = self.session.as_mut() {
                    session.last_error = Some(err);
                }
                Ok(self.state)
            }
        }
    }

    /// Back out of the challenge to the preview. The challenge is
    /// discarded; confirming again sends a fresh code.
    pub fn cancel_step_up(&mut self) -> Result<TransferState, FlowError> {
        self.guard(TransferState::StepUpPending, "cancel_step_up")?;
        if let Some(session) = self.session.as_mut() {
            session.otp = None;
            session.last_error = None;
        }
        self.state = TransferState::Preview;
        Ok(self.state)
    }

    // ========================================================================
    // STEP_UP_PENDING -> STEP_UP_VERIFYING -> (SUBMITTING | FAILED)
    // ========================================================================

    /// Check a user-entered code against the gateway.
    ///
    /// A code of the wrong shape is refused outright and does not spend
    /// an attempt. Mismatched and expired codes spend one; at zero the
    /// flow fails terminally. A rate-limited verdict spends nothing.
    pub async fn verify_code(&mut self, code: &str) -> Result<TransferState, FlowError> {
        self.guard(TransferState::StepUpPending, "verify_code")?;

        let expected = self.policy.otp_code_length;
        if code.len() != expected || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(FlowError::CodeFormat { expected });
        }

        let phone = {
            let session = self.session_ref("verify_code")?;
            let challenge = session.otp.as_ref().ok_or(FlowError::InvalidTransition {
                state: self.state,
                action: "verify_code",
            })?;
            challenge.sent_to().clone()
        };

        self.state = TransferState::StepUpVerifying;

        match self.otp_gateway.verify(&phone, code).await {
            Ok(()) => {
                if let Some(session) = self.session.as_mut() {
                    if let Some(challenge) = session.otp.as_mut() {
                        challenge.mark_verified();
                    }
                    // Challenge is done with; only the outcome survives
                    session.otp = None;
                    session.step_up_verified = true;
                    session.last_error = None;
                }
                info!("Step-up verified");
                self.submit_order("verify_code").await
            }
            Err(e) => {
                let consumes = e.consumes_attempt();
                let Some(session) = self.session.as_mut() else {
                    self.state = TransferState::StepUpPending;
                    return Ok(self.state);
                };

                if consumes {
                    let remaining = session.otp.as_mut().map_or(0, |c| c.spend_attempt());
                    if remaining == 0 {
                        session.otp = None;
                        session.last_error = Some(FlowError::AttemptsExhausted);
                        self.state = TransferState::Failed;
                        warn!("Step-up attempts exhausted, flow failed");
                        return Ok(self.state);
                    }
                    session.last_error = Some(FlowError::from(e));
                    self.state = TransferState::StepUpPending;
                    debug!(attempts_remaining = remaining, "Step-up code rejected");
                } else {
                    session.last_error = Some(FlowError::from(e));
                    self.state = TransferState::StepUpPending;
                }
                Ok(self.state)
            }
        }
    }

    // ========================================================================
    // SUBMITTING -> (SUCCESS | PREVIEW)
    // ========================================================================

    async fn submit_order(&mut self, action: &'static str) -> Result<TransferState, FlowError> {
        let order = {
            let session = self.session_ref(action)?;
            TransferOrder::from_snapshot(session.client_ref, &session.data)
        };

        // Transient state set before the call: duplicates now refused
        self.state = TransferState::Submitting;

        match self.submission.submit(&order).await {
            Ok(receipt) => {
                if let Some(session) = self.session.as_mut() {
                    session.receipt = Some(receipt);
                    session.last_error = None;
                }
                self.state = TransferState::Success;
                info!(client_ref = %order.client_ref, "Transfer accepted");
                Ok(self.state)
            }
            Err(e) => {
                let err = FlowError::from(e);
                if let Some(session) = self.session.as_mut() {
                    session.submission_attempts += 1;
                    session.last_error = Some(err.clone());
                    warn!(
                        client_ref = %order.client_ref,
                        attempts = session.submission_attempts,
                        code = err.code(),
                        "Submission failed, returning to preview"
                    );
                }
                self.state = TransferState::Preview;
                Ok(self.state)
            }
        }
    }

    // ========================================================================
    // Any non-terminal state -> ABANDONED
    // ========================================================================

    /// Navigate away. Discards the session and its challenge entirely;
    /// no callback fires.
    pub fn abandon(&mut self) -> Result<TransferState, FlowError> {
        if self.state.is_terminal() {
            return Err(FlowError::InvalidTransition {
                state: self.state,
                action: "abandon",
            });
        }

        self.session = None;
        self.open_fields.clear();
        self.state = TransferState::Abandoned;
        info!("Flow abandoned");
        Ok(self.state)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn guard(&self, expected: TransferState, action: &'static str) -> Result<(), FlowError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    fn session_ref(&self, action: &'static str) -> Result<&TransferSession, FlowError> {
        self.session.as_ref().ok_or(FlowError::InvalidTransition {
            state: self.state,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency;
    use crate::session::gateway::{MockOtpGateway, MockSubmissionGateway};
    use crate::validation::ValidationError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const LEDGER_ADDR: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    fn ledger_flow() -> (TransferFlow, Arc<MockSubmissionGateway>, Arc<MockOtpGateway>) {
        let submission = Arc::new(MockSubmissionGateway::new());
        let otp = Arc::new(MockOtpGateway::default());
        let flow = TransferFlow::new(
            FlowPolicy::ledger_transfer(),
            currency::get("USD").unwrap(),
            submission.clone(),
            otp.clone(),
        );
        (flow, submission, otp)
    }

    #[test]
    fn test_continue_refused_while_invalid() {
        let (mut flow, _, _) = ledger_flow();
        assert_eq!(flow.continue_to_preview(), Err(FlowError::DraftInvalid));
        assert_eq!(flow.state(), TransferState::Editing);
        assert_eq!(
            flow.draft().error_for(Field::Amount),
            Some(ValidationError::Required)
        );
    }

    #[test]
    fn test_continue_takes_snapshot() {
        let (mut flow, _, _) = ledger_flow();
        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        assert_eq!(flow.continue_to_preview().unwrap(), TransferState::Preview);

        let snapshot = flow.snapshot().unwrap();
        assert_eq!(snapshot.amount, Decimal::from_str("50.00").unwrap());
        assert!(flow.client_ref().is_some());
    }

    #[test]
    fn test_draft_mutation_refused_in_preview() {
        let (mut flow, _, _) = ledger_flow();
        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();

        assert!(matches!(
            flow.set_amount("999"),
            Err(FlowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_back_to_editing_discards_session() {
        let (mut flow, _, _) = ledger_flow();
        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();
        let first_ref = flow.client_ref().unwrap();

        flow.back_to_editing().unwrap();
        assert_eq!(flow.state(), TransferState::Editing);
        assert!(flow.snapshot().is_none());

        // Draft kept its values; a new session gets a new token
        flow.continue_to_preview().unwrap();
        assert_ne!(flow.client_ref().unwrap(), first_ref);
    }

    #[tokio::test]
    async fn test_confirm_without_step_up_submits() {
        let (mut flow, submission, otp) = ledger_flow();
        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();

        assert_eq!(flow.confirm().await.unwrap(), TransferState::Success);
        assert_eq!(submission.submit_count(), 1);
        assert_eq!(otp.send_count(), 0);

        let receipt = flow.receipt().unwrap();
        assert_eq!(receipt.amount, Decimal::from_str("50.00").unwrap());
    }

    #[tokio::test]
    async fn test_success_is_terminal_and_receipt_idempotent() {
        let (mut flow, submission, _) = ledger_flow();
        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();
        flow.confirm().await.unwrap();

        let first = flow.receipt().unwrap().clone();
        assert!(matches!(
            flow.confirm().await,
            Err(FlowError::InvalidTransition { .. })
        ));
        assert!(matches!(
            flow.retry().await,
            Err(FlowError::InvalidTransition { .. })
        ));
        assert_eq!(flow.receipt().unwrap(), &first);
        assert_eq!(submission.submit_count(), 1);
    }

    #[tokio::test]
    async fn test_submission_failure_returns_to_preview_with_error() {
        let (mut flow, submission, _) = ledger_flow();
        submission.fail_next(crate::session::error::SubmissionError::Timeout, 1);

        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();

        assert_eq!(flow.confirm().await.unwrap(), TransferState::Preview);
        assert_eq!(flow.submission_attempts(), 1);
        assert_eq!(flow.last_error().unwrap().code(), "SUBMISSION_TIMEOUT");

        // Snapshot preserved; explicit retry succeeds
        assert!(flow.snapshot().is_some());
        assert_eq!(flow.retry().await.unwrap(), TransferState::Success);
        assert_eq!(submission.submit_count(), 2);
    }

    #[tokio::test]
    async fn test_client_ref_stable_across_retries() {
        let (mut flow, submission, _) = ledger_flow();
        submission.fail_next(crate::session::error::SubmissionError::Timeout, 2);

        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();
        let client_ref = flow.client_ref().unwrap();

        flow.confirm().await.unwrap();
        flow.retry().await.unwrap();
        flow.retry().await.unwrap();

        assert_eq!(flow.state(), TransferState::Success);
        assert_eq!(flow.receipt().unwrap().client_ref, client_ref);
        assert_eq!(submission.last_order().unwrap().client_ref, client_ref);
    }

    #[test]
    fn test_abandon_from_preview() {
        let (mut flow, _, _) = ledger_flow();
        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();

        assert_eq!(flow.abandon().unwrap(), TransferState::Abandoned);
        assert!(flow.snapshot().is_none());
        assert!(matches!(
            flow.abandon(),
            Err(FlowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_edit_refused_for_non_editable_field() {
        let (mut flow, _, _) = ledger_flow();
        flow.set_amount("50.00").unwrap();
        flow.set_recipient_address(LEDGER_ADDR).unwrap();
        flow.continue_to_preview().unwrap();

        // Ledger policy lists no preview-editable fields
        assert_eq!(
            flow.edit(&[Field::Amount]),
            Err(FlowError::FieldNotEditable(Field::Amount))
        );
    }
}
