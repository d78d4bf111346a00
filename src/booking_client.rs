use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{
    errors::GenericError,
    schemas::{GenericResponse, Paginated, Pagination},
    utils::{customer_message_or, fmt_json},
};

#[derive(Debug)]
pub struct BookingClient {
    http_client: Client,
    base_url: String,
    authorization_token: SecretString,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Completed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomBookingRequest {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: u32,
    pub total_price: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl fmt::Display for CreateRoomBookingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_json(self, f)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoomBookingRecord {
    pub id: Uuid,
    pub booking_number: String,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: u32,
    pub total_price: BigDecimal,
    pub status: BookingStatus,
    #[serde(default)]
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Query parameters are assembled by hand in `list_room_bookings`, so
/// this stays a plain struct.
#[derive(Debug, Default)]
pub struct BookingListFilter {
    pub status: Option<BookingStatus>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBookingStatusRequest {
    status: BookingStatus,
}

impl BookingClient {
    #[tracing::instrument]
    pub fn new(
        base_url: String,
        authorization_token: SecretString,
        timeout: std::time::Duration,
    ) -> Self {
        tracing::info!("Establishing connection to the booking service.");
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
                "Invalid booking request",
            )),
            StatusCode::NOT_FOUND | StatusCode::GONE => GenericError::DataNotFound(
                customer_message_or(customer_message, "Booking not found"),
            ),
            _ => GenericError::UnexpectedCustomError(customer_message_or(
                customer_message,
                "Something went wrong while contacting the booking service",
            )),
        }
    }

    #[tracing::instrument(name = "create room booking", skip(self))]
    pub async fn create_room_booking(
        &self,
        request_body: &CreateRoomBookingRequest,
    ) -> Result<RoomBookingRecord, GenericError> {
        let url = format!("{}/room-bookings", self.base_url);
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
        let response_body: GenericResponse<RoomBookingRecord> =
            response.json().await.map_err(|err| {
                GenericError::SerializationError(format!("Failed to parse response: {}", err))
            })?;
        if status.is_success() {
            response_body
                .data
                .ok_or_else(|| GenericError::DataNotFound("Room booking not found".to_string()))
        } else {
            Err(Self::map_error_response(
                status,
                response_body.customer_message,
            ))
        }
    }

    #[tracing::instrument(name = "list room bookings", skip(self))]
    pub async fn list_room_bookings(
        &self,
        filter: &BookingListFilter,
    ) -> Result<Paginated<RoomBookingRecord>, GenericError> {
        let url = format!("{}/room-bookings", self.base_url);
        let mut request = self
            .http_client
            .get(&url)
            .header("Authorization", self.get_auth_token())
            .query(&[
                ("page", filter.pagination.page.to_string()),
                ("perPage", filter.pagination.per_page.to_string()),
            ]);
        if let Some(status) = filter.status {
            request = request.query(&[("status", status.to_string())]);
        }

        let response = request.send().await.map_err(|err| {
            GenericError::UnexpectedError(anyhow::anyhow!("Request error: {}", err))
        })?;

        let status = response.status();
        let response_body: GenericResponse<Paginated<RoomBookingRecord>> =
            response.json().await.map_err(|err| {
                GenericError::SerializationError(format!("Failed to parse response: {}", err))
            })?;
        if status.is_success() {
            response_body
                .data
                .ok_or_else(|| GenericError::DataNotFound("Room booking list not found".to_string()))
        } else {
            Err(Self::map_error_response(
                status,
                response_body.customer_message,
            ))
        }
    }

    #[tracing::instrument(name = "update room booking status", skip(self))]
    pub async fn update_booking_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<RoomBookingRecord, GenericError> {
        let url = format!("{}/room-bookings/{}/status", self.base_url, booking_id);
        let response = self
            .http_client
            .patch(&url)
            .header("Authorization", self.get_auth_token())
            .json(&UpdateBookingStatusRequest { status: new_status })
            .send()
            .await
            .map_err(|err| {
                GenericError::UnexpectedError(anyhow::anyhow!("Request error: {}", err))
            })?;

        let status = response.status();
        let response_body: GenericResponse<RoomBookingRecord> =
            response.json().await.map_err(|err| {
                GenericError::SerializationError(format!("Failed to parse response: {}", err))
            })?;
        if status.is_success() {
            response_body
                .data
                .ok_or_else(|| GenericError::DataNotFound("Room booking not found".to_string()))
        } else {
            Err(Self::map_error_response(
                status,
                response_body.customer_message,
            ))
        }
    }
}
