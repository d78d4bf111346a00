//! Gateway-return verification flow, modeled as an explicit state
//! machine instead of a pile of boolean flags.
//!
//! `Idle -> Verifying -> {Verified -> FetchingDetails -> {Ready, FetchFailed},
//! Failed}`, plus the mount-only terminal `InvalidReference` when the
//! gateway sent the guest back without a reference.

use std::time::Duration;

use tokio::task::JoinHandle;

use super::resolver::resolve_destination;
use super::schemas::{CallbackQuery, Destination};
use crate::payment_client::{PaymentClient, PaymentStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationState {
    Idle,
    /// No usable reference in the callback query. Reachable only at
    /// construction; no network call is ever issued from here.
    InvalidReference,
    Verifying,
    Failed { message: String },
    FetchingDetails,
    FetchFailed { message: String },
    Ready { destination: Destination },
}

impl VerificationState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VerificationState::InvalidReference
                | VerificationState::Failed { .. }
                | VerificationState::FetchFailed { .. }
                | VerificationState::Ready { .. }
        )
    }

    /// Manual recoveries offered by a terminal failure state. No state
    /// retries automatically.
    pub fn recoveries(&self) -> &'static [VerificationRecovery] {
        match self {
            VerificationState::Failed { .. } | VerificationState::FetchFailed { .. } => &[
                VerificationRecovery::Reload,
                VerificationRecovery::BackToCheckout,
            ],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerificationRecovery {
    Reload,
    BackToCheckout,
}

#[derive(Debug)]
pub struct VerificationFlow {
    reference: Option<String>,
    state: VerificationState,
    attempted: bool,
}

impl VerificationFlow {
    pub fn new(query: &CallbackQuery) -> Self {
        match query.reference() {
            Some(reference) => Self {
                reference: Some(reference.to_string()),
                state: VerificationState::Idle,
                attempted: false,
            },
            None => Self {
                reference: None,
                state: VerificationState::InvalidReference,
                attempted: false,
            },
        }
    }

    pub fn state(&self) -> &VerificationState {
        &self.state
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Drives the flow to a terminal state. Verification is attempted at
    /// most once per flow instance; re-running after the first attempt is
    /// a no-op, so re-renders cannot duplicate the verify call.
    /// Fetch-by-reference is only issued once verification succeeded.
    #[tracing::instrument(name = "verify gateway callback", skip(self, client), fields(reference = ?self.reference))]
    pub async fn run(&mut self, client: &PaymentClient) -> &VerificationState {
        let Some(reference) = self.reference.clone() else {
            return &self.state;
        };
        if self.attempted {
            return &self.state;
        }
        self.attempted = true;

        self.state = VerificationState::Verifying;
        let verification = match client.verify_payment(&reference).await {
            Ok(verification) => verification,
            Err(err) => {
                tracing::error!("Payment verification failed: {:?}", err);
                self.state = VerificationState::Failed {
                    message: err.to_string(),
                };
                return &self.state;
            }
        };
        if matches!(
            verification.status,
            PaymentStatus::Failed | PaymentStatus::Cancelled
        ) {
            self.state = VerificationState::Failed {
                message: format!("Payment was not successful ({})", reference),
            };
            return &self.state;
        }

        self.state = VerificationState::FetchingDetails;
        match client.get_payment_by_reference(&reference).await {
            Ok(record) => {
                self.state = VerificationState::Ready {
                    destination: resolve_destination(&record),
                };
            }
            Err(err) => {
                tracing::error!("Failed to fetch payment details: {:?}", err);
                self.state = VerificationState::FetchFailed {
                    message: err.to_string(),
                };
            }
        }
        &self.state
    }
}

/// Handle to the one-shot post-verification redirect. Dropping it before
/// the delay elapses cancels the navigation, so a torn-down view can
/// never navigate.
#[derive(Debug)]
pub struct ScheduledRedirect {
    handle: JoinHandle<()>,
}

impl ScheduledRedirect {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for ScheduledRedirect {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn schedule_redirect<F>(
    destination: Destination,
    delay: Duration,
    navigate: F,
) -> ScheduledRedirect
where
    F: FnOnce(Destination) + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        navigate(destination);
    });
    ScheduledRedirect { handle }
}
