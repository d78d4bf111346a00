use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    errors::GenericError,
    schemas::{CurrencyType, GenericResponse},
    utils::customer_message_or,
};

#[derive(Debug)]
pub struct PaymentClient {
    http_client: Client,
    base_url: String,
    authorization_token: SecretString,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
    Refunded,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Transfer,
    Cash,
    Wallet,
}

/// The business object a payment pays for. Exactly one of the flat id
/// fields goes on the wire, which the enum guarantees by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentTarget {
    Order(Uuid),
    Reservation(Uuid),
    RoomBooking(Uuid),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentRequest {
    pub user_id: Uuid,
    pub amount: BigDecimal,
    pub method: PaymentMethod,
    pub customer_email: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_booking_id: Option<Uuid>,
}

impl InitializePaymentRequest {
    pub fn new(
        user_id: Uuid,
        amount: BigDecimal,
        method: PaymentMethod,
        customer_email: String,
        customer_name: String,
        target: PaymentTarget,
    ) -> Self {
        let (order_id, reservation_id, room_booking_id) = match target {
            PaymentTarget::Order(id) => (Some(id), None, None),
            PaymentTarget::Reservation(id) => (None, Some(id), None),
            PaymentTarget::RoomBooking(id) => (None, None, Some(id)),
        };
        Self {
            user_id,
            amount,
            method,
            customer_email,
            customer_name,
            order_id,
            reservation_id,
            room_booking_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitData {
    #[serde(default)]
    pub authorization_url: Option<String>,
    pub access_code: String,
    pub reference: String,
    pub payment_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    pub status: PaymentStatus,
    pub payment_id: Uuid,
    pub amount: BigDecimal,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Nested relation object on a payment record. Only the identifier is
/// relevant for redirect resolution.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RelatedRecord {
    pub id: String,
}

/// Full payment record as returned by fetch-by-reference. The backend is
/// inconsistent about how it links a payment to its business object: a
/// nested relation object, a flat foreign-key field, or a metadata blob
/// (sometimes a JSON-encoded string) may each carry the link. All shapes
/// are kept here verbatim; `flows::payment::resolver` normalizes them.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub reference: String,
    pub amount: BigDecimal,
    pub currency: CurrencyType,
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub order: Option<RelatedRecord>,
    #[serde(default)]
    pub reservation: Option<RelatedRecord>,
    #[serde(default)]
    pub room_booking: Option<RelatedRecord>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub reservation_id: Option<String>,
    #[serde(default)]
    pub room_booking_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl PaymentClient {
    #[tracing::instrument]
    pub fn new(
        base_url: String,
        authorization_token: SecretString,
        timeout: std::time::Duration,
    ) -> Self {
        tracing::info!("Establishing connection to the payment service.");
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            http_client,
            base_url,
            authorization_token,
        }
    }

    fn get_auth_token(&self) -> String {
        format!("Bearer {}", self.authorization_token.expose_secret())
    }

    fn map_error_response(status: StatusCode, customer_message: String) -> GenericError {
        match status {
            StatusCode::BAD_REQUEST => GenericError::ValidationError(customer_message_or(
                customer_message,
                "Invalid payment request",
            )),
            StatusCode::NOT_FOUND | StatusCode::GONE => GenericError::DataNotFound(
                customer_message_or(customer_message, "Payment not found"),
            ),
            _ => GenericError::UnexpectedCustomError(customer_message_or(
                customer_message,
                "Something went wrong while contacting the payment service",
            )),
        }
    }

    #[tracing::instrument(name = "initialize payment", skip(self))]
    pub async fn initialize_payment(
        &self,
        request_body: &InitializePaymentRequest,
    ) -> Result<PaymentInitData, GenericError> {
        let url = format!("{}/payments/initialize", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.get_auth_token())
            .json(request_body)
            .send()
            .await
            .map_err(|err| {
                GenericError::UnexpectedError(anyhow::anyhow!("Request error: {}", err))
            })?;

        let status = response.status();
        let response_body: GenericResponse<PaymentInitData> =
            response.json().await.map_err(|err| {
                GenericError::SerializationError(format!("Failed to parse response: {}", err))
            })?;
        if status.is_success() {
            response_body
                .data
                .ok_or_else(|| GenericError::DataNotFound("Payment session not found".to_string()))
        } else {
            Err(Self::map_error_response(
                status,
                response_body.customer_message,
            ))
        }
    }

    #[tracing::instrument(name = "verify payment", skip(self))]
    pub async fn verify_payment(
        &self,
        reference: &str,
    ) -> Result<PaymentVerification, GenericError> {
        let url = format!("{}/payments/verify/{}", self.base_url, reference);
        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.get_auth_token())
            .send()
            .await
            .map_err(|err| {
                GenericError::UnexpectedError(anyhow::anyhow!("Request error: {}", err))
            })?;

        let status = response.status();
        let response_body: GenericResponse<PaymentVerification> =
            response.json().await.map_err(|err| {
                GenericError::SerializationError(format!("Failed to parse response: {}", err))
            })?;
        if status.is_success() {
            response_body
                .data
                .ok_or_else(|| GenericError::DataNotFound("Payment not found".to_string()))
        } else {
            Err(Self::map_error_response(
                status,
                response_body.customer_message,
            ))
        }
    }

    #[tracing::instrument(name = "fetch payment by reference", skip(self))]
    pub async fn get_payment_by_reference(
        &self,
        reference: &str,
    ) -> Result<PaymentRecord, GenericError> {
        let url = format!("{}/payments/reference/{}", self.base_url, reference);
        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.get_auth_token())
            .send()
            .await
            .map_err(|err| {
                GenericError::UnexpectedError(anyhow::anyhow!("Request error: {}", err))
            })?;

        let status = response.status();
        let response_body: GenericResponse<PaymentRecord> =
            response.json().await.map_err(|err| {
                GenericError::SerializationError(format!("Failed to parse response: {}", err))
            })?;
        if status.is_success() {
            response_body
                .data
                .ok_or_else(|| GenericError::DataNotFound("Payment not found".to_string()))
        } else {
            Err(Self::map_error_response(
                status,
                response_body.customer_message,
            ))
        }
    }
}
