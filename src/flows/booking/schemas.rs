use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::payment_client::PaymentMethod;

/// Form-local booking state. Lives for the lifetime of the booking form
/// and is discarded on submit or close; dates stay optional until the
/// guest has picked both.
#[derive(Debug, Deserialize, Validate, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingIntent {
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub number_of_guests: u32,
    pub customer_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub nightly_rate: BigDecimal,
    pub max_guests: u32,
}
