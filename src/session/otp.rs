//! Step-up Challenge State
//!
//! Lives only inside an active session, between code send and either
//! verification or abandonment. The gateway owns the real expiry; the
//! window recorded here exists purely so a surface can display time
//! remaining.

use crate::validation::CanonicalPhone;
use chrono::{DateTime, Duration, Utc};

/// Gateway-conventional freshness window for a sent code.
pub const CODE_VALIDITY_MINUTES: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStatus {
    Pending,
    Verified,
    Failed,
}

#[derive(Debug, Clone)]
pub struct OtpChallenge {
    sent_to: CanonicalPhone,
    attempts_remaining: u8,
    status: OtpStatus,
    sent_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn new(sent_to: CanonicalPhone, max_attempts: u8) -> Self {
        Self {
            sent_to,
            attempts_remaining: max_attempts,
            status: OtpStatus::Pending,
            sent_at: Utc::now(),
        }
    }

    pub fn sent_to(&self) -> &CanonicalPhone {
        &self.sent_to
    }

    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    pub fn status(&self) -> OtpStatus {
        self.status
    }

    pub fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Display-only deadline; an expired code still surfaces as the
    /// gateway's own `Expired` verdict.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.sent_at + Duration::minutes(CODE_VALIDITY_MINUTES)
    }

    /// Spend one attempt. Returns the remaining budget; at zero the
    /// challenge is marked failed.
    pub(crate) fn spend_attempt(&mut self) -> u8 {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        if self.attempts_remaining == 0 {
            self.status = OtpStatus::Failed;
        }
        self.attempts_remaining
    }

    pub(crate) fn mark_verified(&mut self) {
        self.status = OtpStatus::Verified;
    }
}
