use serde::{Deserialize, Serialize};

/// In-app page the guest lands on once a payment completes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    OrderHistory,
    ReservationHistory,
    RoomBookingHistory,
    Dashboard,
}

impl Destination {
    pub fn as_path(&self) -> &'static str {
        match self {
            Destination::OrderHistory => "/dashboard/orders",
            Destination::ReservationHistory => "/dashboard/reservations",
            Destination::RoomBookingHistory => "/dashboard/room-bookings",
            Destination::Dashboard => "/dashboard",
        }
    }
}

/// What happens after payment initialization succeeds.
#[derive(Debug, PartialEq, Clone)]
pub enum PaymentLaunch {
    /// Hand the browser to the external gateway. Client state is
    /// abandoned on purpose; the gateway owns the next phase.
    Redirect(String),
    /// No authorization URL means nothing left to pay.
    Completed,
}

/// Query string the gateway appends when it sends the guest back.
/// Some gateways use `trxref` instead of `reference`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CallbackQuery {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub trxref: Option<String>,
}

impl CallbackQuery {
    /// A blank `reference` must not shadow a usable `trxref`, so each
    /// candidate is screened for blankness before the fallback.
    pub fn reference(&self) -> Option<&str> {
        non_blank(self.reference.as_deref()).or_else(|| non_blank(self.trxref.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
