use bigdecimal::BigDecimal;

use super::errors::PaymentFlowError;
use super::schemas::PaymentLaunch;
use crate::errors::GenericError;
use crate::payment_client::{
    InitializePaymentRequest, PaymentClient, PaymentMethod, PaymentTarget,
};
use crate::schemas::UserIdentity;

/// Starts a payment session for an already-created business object and
/// decides what the browser does next. Callers must only invoke this
/// after the creation request has resolved; the target id comes from
/// that response.
#[tracing::instrument(name = "launch payment", skip(client))]
pub async fn launch_payment(
    client: &PaymentClient,
    identity: &UserIdentity,
    target: PaymentTarget,
    amount: BigDecimal,
    method: PaymentMethod,
) -> Result<PaymentLaunch, GenericError> {
    if amount <= BigDecimal::from(0) {
        return Err(PaymentFlowError::ValidationError(
            "Payment amount must be greater than zero".to_string(),
        )
        .into());
    }
    let request = InitializePaymentRequest::new(
        identity.id,
        amount,
        method,
        identity.email.clone(),
        identity.name.clone(),
        target,
    );
    let data = client.initialize_payment(&request).await?;
    match data.authorization_url {
        Some(url) if !url.trim().is_empty() => {
            tracing::info!("Handing off to payment gateway for reference {}", data.reference);
            Ok(PaymentLaunch::Redirect(url))
        }
        _ => {
            tracing::info!("No authorization URL returned; payment {} treated as complete", data.payment_id);
            Ok(PaymentLaunch::Completed)
        }
    }
}
