//! remitflow demo driver
//!
//! Runs one scripted remittance flow against the in-process mock
//! gateways, logging every transition:
//!
//! ```text
//! EDITING → PREVIEW → STEP_UP_PENDING → STEP_UP_VERIFYING → SUBMITTING → SUCCESS
//! ```
//!
//! No real funds move; the mock submission gateway fabricates a receipt.

use std::sync::Arc;

use anyhow::{Context, Result};
use remitflow::config::AppConfig;
use remitflow::format::{format_money_with_code, format_phone_for_display, short_address};
use remitflow::logging::init_logging;
use remitflow::session::{MockOtpGateway, MockSubmissionGateway, TransferFlow};
use remitflow::{Field, TransferState, currency};
use tracing::info;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--env" && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "default".to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(&get_env());
    let _guard = init_logging(&config);

    let policy = config.flow.policy();
    let flow_currency = currency::get(&config.flow.currency)
        .with_context(|| format!("unknown currency in config: {}", config.flow.currency))?;

    let submission = Arc::new(MockSubmissionGateway::new());
    let otp = Arc::new(MockOtpGateway::default());
    let mut flow = TransferFlow::new(policy, flow_currency, submission.clone(), otp.clone());

    // Fill the form the way a user would
    flow.set_amount("100.00")?;
    flow.set_recipient_name("Ada Obi")?;
    flow.set_country("Nigeria")?;
    flow.set_phone_number("+1 (555) 000-1111")?;

    flow.continue_to_preview()?;
    let snapshot = flow.snapshot().expect("snapshot exists in preview");
    info!(
        amount = %format_money_with_code(snapshot.amount, &snapshot.currency),
        recipient = snapshot.recipient.display_name.as_deref().unwrap_or("-"),
        phone = %snapshot
            .recipient
            .phone_number
            .as_ref()
            .map(format_phone_for_display)
            .unwrap_or_default(),
        address = %snapshot
            .recipient
            .address
            .as_deref()
            .map(short_address)
            .unwrap_or_default(),
        "Preview"
    );

    // Correct the phone number in place, as the preview screen allows
    flow.edit(&[Field::PhoneNumber])?;
    flow.set_phone_number("+1 (555) 222-3333")?;
    flow.save()?;

    // Confirm; the remittance policy interposes a step-up challenge
    let mut state = flow.confirm().await?;
    if state == TransferState::StepUpPending {
        // The mock gateway accepts a fixed code; a real surface would
        // collect it from the user
        state = flow.verify_code(otp.accepted_code()).await?;
    }

    match state {
        TransferState::Success => {
            let receipt = flow.receipt().expect("receipt recorded on success");
            info!(
                reference = %receipt.reference,
                client_ref = %receipt.client_ref,
                amount = %receipt.amount,
                "Demo transfer complete"
            );
        }
        other => {
            info!(state = %other, error = ?flow.last_error(), "Demo transfer did not complete");
        }
    }

    Ok(())
}
