use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use validator::Validate;

use super::errors::BookingFlowError;
use super::schemas::{BookingIntent, Room};
use crate::booking_client::{BookingClient, CreateRoomBookingRequest, RoomBookingRecord};
use crate::errors::GenericError;
use crate::schemas::UserIdentity;

/// Whole nights between two dates. Missing, equal or inverted dates all
/// count as zero nights; submission is blocked on zero.
pub fn nights_between(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> u32 {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) if check_out > check_in => {
            (check_out - check_in).num_days() as u32
        }
        _ => 0,
    }
}

pub fn stay_total(nights: u32, nightly_rate: &BigDecimal) -> BigDecimal {
    BigDecimal::from(nights) * nightly_rate
}

/// Validates the intent and assembles the creation payload. All checks
/// happen before any network call.
pub fn build_booking_request(
    intent: &BookingIntent,
    room: &Room,
    identity: &UserIdentity,
) -> Result<CreateRoomBookingRequest, BookingFlowError> {
    let check_in_date = intent.check_in_date.ok_or_else(|| {
        BookingFlowError::ValidationError("Please select a check-in date".to_string())
    })?;
    let check_out_date = intent.check_out_date.ok_or_else(|| {
        BookingFlowError::ValidationError("Please select a check-out date".to_string())
    })?;
    let nights = nights_between(Some(check_in_date), Some(check_out_date));
    if nights == 0 {
        return Err(BookingFlowError::ValidationError(
            "Check-out date must be after check-in date".to_string(),
        ));
    }
    if intent.number_of_guests == 0 {
        return Err(BookingFlowError::ValidationError(
            "Number of guests must be at least 1".to_string(),
        ));
    }
    intent
        .validate()
        .map_err(|err| BookingFlowError::ValidationError(err.to_string()))?;
    Ok(CreateRoomBookingRequest {
        room_id: room.id,
        user_id: identity.id,
        check_in_date,
        check_out_date,
        number_of_guests: intent.number_of_guests,
        total_price: stay_total(nights, &room.nightly_rate),
        special_requests: intent.special_requests.clone(),
    })
}

#[tracing::instrument(name = "submit room booking", skip(client))]
pub async fn submit_booking(
    client: &BookingClient,
    intent: &BookingIntent,
    room: &Room,
    identity: &UserIdentity,
) -> Result<RoomBookingRecord, GenericError> {
    let request = build_booking_request(intent, room, identity)?;
    let record = client.create_room_booking(&request).await?;
    tracing::info!("Created room booking {}", record.booking_number);
    Ok(record)
}
