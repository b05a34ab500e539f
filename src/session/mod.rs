//! Transfer Session State Machine
//!
//! Drives one transfer from form entry to a terminal state.
//!
//! # State Machine
//!
//! ```text
//! EDITING → PREVIEW → (STEP_UP_PENDING → STEP_UP_VERIFYING)? → SUBMITTING → SUCCESS
//!    ↑         ↑  ↑            ↓                                    ↓
//!    └── edit ─┘  └─ cancel ───┘                                    │
//!              └──────────────── failure (retry) ───────────────────┘
//!
//! STEP_UP attempts exhausted → FAILED          any non-terminal → ABANDONED
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Single validation gate**: a snapshot only exists if the draft was
//!    valid at `continue`; preview never re-validates untouched fields.
//! 2. **Set-state-before-call**: the transient state is recorded before a
//!    gateway call is awaited, so duplicate actions are refused instead
//!    of producing a second call.
//! 3. **Snapshot immutability**: draft edits after the gate only reach
//!    the snapshot through an explicit `save()` of reopened fields.
//! 4. **Exactly-once success**: the receipt is recorded on one SUCCESS
//!    transition; every later action is refused and reads are idempotent.

pub mod error;
pub mod flow;
pub mod gateway;
pub mod otp;
pub mod state;


// Re-exports for convenience
pub use error::{FlowError, OtpSendError, OtpVerifyError, SubmissionError};
pub use flow::TransferFlow;
pub use gateway::{OtpGateway, Receipt, SubmissionGateway, TransferOrder};
pub use otp::{OtpChallenge, OtpStatus};
pub use state::TransferState;

#[cfg(any(test, feature = "mock-gateways"))]
pub use gateway::{MockOtpGateway, MockSubmissionGateway};
