use std::time::Duration;

use crate::booking_client::BookingClient;
use crate::configuration::Settings;
use crate::payment_client::PaymentClient;

/// Shared context handed to the flows. Views receive this explicitly
/// instead of reaching for globals.
#[derive(Debug)]
pub struct AppContext {
    pub booking_client: BookingClient,
    pub payment_client: PaymentClient,
    pub redirect_delay: Duration,
}

impl AppContext {
    pub fn build(settings: &Settings) -> Self {
        let booking_client = BookingClient::new(
            settings.backend.base_url.clone(),
            settings.backend.authorization_token.clone(),
            settings.backend.timeout(),
        );
        let payment_client = PaymentClient::new(
            settings.backend.base_url.clone(),
            settings.backend.authorization_token.clone(),
            settings.backend.timeout(),
        );
        Self {
            booking_client,
            payment_client,
            redirect_delay: settings.redirect.delay(),
        }
    }
}
